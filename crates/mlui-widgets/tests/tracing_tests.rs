#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Widget spans and menu events enabled:
//!   cargo test -p mlui-widgets --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p mlui-widgets --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mlui_core::geometry::{Rect, Size};
use mlui_render::frame::Frame;
use mlui_render::overlay::OverlayHost;
use mlui_style::StyleSheet;
use mlui_widgets::{
    ActionsMenu, ActionsMenuConfig, ActionsMenuState, DataItem, MenuItem, StatefulWidget,
};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// A captured span or event with its fields.
#[derive(Debug, Clone)]
struct Captured {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

impl Capture {
    fn spans(&self) -> Vec<Captured> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }
}

/// Visitor that extracts fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        self.events.lock().unwrap().push(Captured {
            name: fields.get("message").cloned().unwrap_or_default(),
            fields,
        });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

fn render_open_menu() {
    let styles = StyleSheet::with_defaults();
    let (mut host, overlay) = OverlayHost::with_default_layer(Size::new(40, 12));
    let mut state = ActionsMenuState::new(
        ActionsMenuConfig::new(vec![MenuItem::new("Edit", |_: &DataItem| {})], overlay)
            .edge_offset(2),
    );
    let menu = ActionsMenu::new(&styles);
    let mut base = Frame::new(40, 12);

    menu.render(Rect::new(2, 2, 1, 1), &mut base, &mut state);
    state.pointer_enter();
    menu.render_overlay(&mut host, &mut state).unwrap();
    state.activate(2, Size::new(40, 12));
    menu.render_overlay(&mut host, &mut state).unwrap();
}

#[test]
#[cfg(feature = "tracing")]
fn render_spans_cover_both_layers() {
    let capture = with_capture(render_open_menu);
    let layers: Vec<String> = capture
        .spans()
        .into_iter()
        .filter(|s| s.name == "widget_render")
        .filter(|s| s.fields.get("widget").is_some_and(|w| w.contains("ActionsMenu")))
        .filter_map(|s| s.fields.get("layer").cloned())
        .collect();
    assert!(layers.iter().any(|l| l.contains("base")), "layers: {layers:?}");
    assert_eq!(layers.iter().filter(|l| l.contains("overlay")).count(), 2);
}

#[test]
#[cfg(feature = "tracing")]
fn activation_is_logged_with_position() {
    let capture = with_capture(render_open_menu);
    let toggled = capture
        .events()
        .into_iter()
        .find(|e| e.name.contains("actions menu toggled"))
        .expect("toggle event");
    assert_eq!(toggled.fields.get("open").map(String::as_str), Some("true"));
    assert_eq!(toggled.fields.get("top").map(String::as_str), Some("3"));
    assert_eq!(toggled.fields.get("left").map(String::as_str), Some("2"));
}

#[test]
#[cfg(feature = "tracing")]
fn missing_overlay_is_logged_as_error() {
    let capture = with_capture(|| {
        let styles = StyleSheet::new();
        let (mut host, overlay) = OverlayHost::with_default_layer(Size::new(10, 4));
        host.unregister(overlay);
        let mut state = ActionsMenuState::new(ActionsMenuConfig::new(Vec::new(), overlay));
        assert!(ActionsMenu::new(&styles).render_overlay(&mut host, &mut state).is_err());
    });
    assert!(
        capture
            .events()
            .iter()
            .any(|e| e.name.contains("overlay is missing")),
        "events: {:?}",
        capture.events()
    );
}

#[test]
fn zero_overhead_without_feature() {
    let capture = with_capture(render_open_menu);
    if cfg!(feature = "tracing") {
        assert!(!capture.spans().is_empty());
    } else {
        assert!(capture.spans().is_empty());
        assert!(capture.events().is_empty());
    }
}
