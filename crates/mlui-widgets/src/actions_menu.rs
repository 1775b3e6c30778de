#![forbid(unsafe_code)]

//! Floating actions menu.
//!
//! A small trigger glyph rendered inline (typically in a table row) that,
//! when clicked, opens a dropdown panel of actions for that row's data item.
//! The panel is drawn into an overlay layer rather than the frame the trigger
//! lives in, so it can float over neighbouring rows and is never clipped by
//! the trigger's container.
//!
//! # Lifecycle
//!
//! ```text
//!  hover trigger ─► mounted (hidden, measured)
//!  click trigger ─► open at a position computed from the measured boxes
//!  pointer leaves ─► dismissal scheduled after `dismiss_delay`
//!  pointer returns ─► dismissal cancelled
//!  deadline passes ─► closed and unmounted
//!  click panel ─► item action runs, closed (still mounted)
//! ```
//!
//! The panel counts as part of the trigger's container for hover tracking:
//! moving from the trigger into the open panel never schedules dismissal.
//!
//! # Placement
//!
//! [`compute_position`] places the panel's top-left corner. It opens below
//! the trigger at the pointer column, shifts left when it would cross the
//! right edge (never closer than `edge_offset` to the left edge), and opens
//! upward when it would come within `edge_offset` of the bottom edge.
//!
//! # Invariants
//!
//! 1. At most one dismissal is pending per menu.
//! 2. Hidden items are never drawn; visible ones keep their relative order.
//! 3. When any item (hidden ones included) has an icon, every row reserves
//!    the icon gutter.
//! 4. A closed panel is still measured while mounted but paints nothing and
//!    registers no hit regions.

use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use mlui_core::dismiss::{DEFAULT_DISMISS_DELAY, DismissTimer};
use mlui_core::event::Event;
use mlui_core::geometry::{BoundingBox, Rect, Size};
use mlui_render::cell::Cell;
use mlui_render::frame::{Frame, HitId, HitRegion};
use mlui_render::overlay::{OverlayError, OverlayHandle, OverlayHost};
use mlui_style::{ACTIONS_MENU_BODY, ACTIONS_MENU_BODY_SHOW, Style, StyleSheet};

use crate::actions_menu_item::ActionsMenuItem;
use crate::menu::{DataItem, MenuItem, MenuSource};
use crate::{StatefulWidget, Widget, clear_area, draw_text_span};

/// Default margin kept between the panel and the viewport edges.
pub const DEFAULT_EDGE_OFFSET: i32 = 35;

/// Environment variable overriding the dismissal delay, in milliseconds.
pub const ENV_DISMISS_MS: &str = "MLUI_ACTIONS_MENU_DISMISS_MS";
/// Environment variable overriding the edge offset, in cells.
pub const ENV_EDGE_OFFSET: &str = "MLUI_ACTIONS_MENU_OFFSET";

/// Default hit id registered by the trigger and the panel.
pub const DEFAULT_HIT_ID: HitId = HitId::new(0x414d);

/// Glyph drawn by the trigger.
pub const TRIGGER_GLYPH: char = '⋯';

/// Style class of the trigger button (optional).
pub const ACTIONS_MENU_BUTTON: &str = "actions-menu__button";
/// Style class of item rows (optional).
pub const ACTIONS_MENU_ITEM: &str = "actions-menu__item";
/// Style class of item icons (optional).
pub const ACTIONS_MENU_ICON: &str = "actions-menu__icon";

/// Columns of padding between the panel border and its rows.
const PANEL_PADDING: u16 = 1;

/// Top-left corner of the panel in viewport cells.
///
/// Signed: a trigger near the top edge can place an upward panel above the
/// viewport. Drawing clips negative coordinates to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionStyle {
    pub top: i32,
    pub left: i32,
}

/// Compute the panel position for a click at `pointer_x`.
///
/// Missing boxes count as all zeros.
pub fn compute_position(
    pointer_x: i32,
    trigger: Option<BoundingBox>,
    panel: Option<BoundingBox>,
    viewport: Size,
    edge_offset: i32,
) -> PositionStyle {
    let trigger = trigger.unwrap_or_default();
    let panel = panel.unwrap_or_default();
    let viewport_width = i32::from(viewport.width);
    let viewport_height = i32::from(viewport.height);

    let left = if pointer_x + panel.width > viewport_width {
        let shifted = pointer_x - (pointer_x + panel.width - viewport_width + edge_offset);
        shifted.max(edge_offset)
    } else {
        pointer_x
    };

    let top = if trigger.top + trigger.height + edge_offset + panel.height >= viewport_height {
        trigger.bottom() - trigger.height - panel.height
    } else {
        trigger.top + trigger.height
    };

    PositionStyle { top, left }
}

/// Errors raised while rendering the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionsMenuError {
    /// The overlay layer the panel renders into is not available.
    Overlay(OverlayError),
}

impl fmt::Display for ActionsMenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlay(e) => write!(f, "actions menu panel cannot be shown: {e}"),
        }
    }
}

impl std::error::Error for ActionsMenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Overlay(e) => Some(e),
        }
    }
}

impl From<OverlayError> for ActionsMenuError {
    fn from(e: OverlayError) -> Self {
        Self::Overlay(e)
    }
}

/// Configuration of one menu instance.
#[derive(Debug, Clone)]
pub struct ActionsMenuConfig {
    /// Record the menu acts on.
    pub data_item: DataItem,
    /// Where the items come from.
    pub menu: MenuSource,
    /// Grace period between pointer-leave and dismissal.
    pub dismiss_delay: Duration,
    /// Margin kept from the viewport edges when placing the panel.
    pub edge_offset: i32,
    /// Overlay layer the panel renders into.
    pub overlay: OverlayHandle,
    /// Hit id registered for the trigger and panel cells.
    pub hit_id: HitId,
}

impl ActionsMenuConfig {
    /// Configuration with the default delay and offset and an empty data item.
    pub fn new(menu: impl Into<MenuSource>, overlay: OverlayHandle) -> Self {
        Self {
            data_item: DataItem::default(),
            menu: menu.into(),
            dismiss_delay: DEFAULT_DISMISS_DELAY,
            edge_offset: DEFAULT_EDGE_OFFSET,
            overlay,
            hit_id: DEFAULT_HIT_ID,
        }
    }

    #[must_use]
    pub fn data_item(mut self, data_item: impl Into<DataItem>) -> Self {
        self.data_item = data_item.into();
        self
    }

    #[must_use]
    pub fn dismiss_delay(mut self, delay: Duration) -> Self {
        self.dismiss_delay = delay;
        self
    }

    #[must_use]
    pub fn edge_offset(mut self, offset: i32) -> Self {
        self.edge_offset = offset;
        self
    }

    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = id;
        self
    }

    /// Apply overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `get_env`.
    ///
    /// `MLUI_ACTIONS_MENU_DISMISS_MS` takes a millisecond count and
    /// `MLUI_ACTIONS_MENU_OFFSET` a non-negative cell count. Values that do
    /// not parse are ignored with a warning.
    #[must_use]
    pub fn with_env_from<F>(mut self, get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = get_env(ENV_DISMISS_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.dismiss_delay = Duration::from_millis(ms),
                Err(_) => {
                    mlui_core::warn!(var = ENV_DISMISS_MS, value = %raw, "ignoring invalid value");
                }
            }
        }
        if let Some(raw) = get_env(ENV_EDGE_OFFSET) {
            match raw.trim().parse::<u16>() {
                Ok(offset) => self.edge_offset = i32::from(offset),
                Err(_) => {
                    mlui_core::warn!(var = ENV_EDGE_OFFSET, value = %raw, "ignoring invalid value");
                }
            }
        }
        self
    }
}

/// Outcome of [`ActionsMenuState::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionsMenuEvent {
    /// Nothing changed.
    Ignored,
    /// The pointer entered the container.
    Entered,
    /// The pointer left the container.
    Left,
    /// The trigger was clicked; `open` is the new state.
    Toggled { open: bool },
    /// A visible item was clicked and its action ran.
    Selected { label: String },
    /// The panel was clicked outside any item.
    Closed,
    /// The dismissal delay elapsed.
    Dismissed,
}

/// State of one menu instance.
#[derive(Debug)]
pub struct ActionsMenuState {
    data_item: DataItem,
    menu: MenuSource,
    items: Vec<MenuItem>,
    icon_displayed: bool,
    open: bool,
    mounted: bool,
    hovered: bool,
    position: PositionStyle,
    trigger_area: Option<Rect>,
    panel_area: Option<Rect>,
    timer: DismissTimer,
    edge_offset: i32,
    overlay: OverlayHandle,
    hit_id: HitId,
}

impl ActionsMenuState {
    pub fn new(config: ActionsMenuConfig) -> Self {
        let mut state = Self {
            items: config.menu.initial_items(),
            data_item: config.data_item,
            menu: config.menu,
            icon_displayed: false,
            open: false,
            mounted: false,
            hovered: false,
            position: PositionStyle::default(),
            trigger_area: None,
            panel_area: None,
            timer: DismissTimer::new(config.dismiss_delay),
            edge_offset: config.edge_offset,
            overlay: config.overlay,
            hit_id: config.hit_id,
        };
        state.resolve_items();
        state
    }

    /// Replace the data item and re-resolve the items.
    pub fn set_data_item(&mut self, data_item: impl Into<DataItem>) {
        self.data_item = data_item.into();
        self.resolve_items();
    }

    /// Replace the menu source and re-resolve the items.
    pub fn set_menu(&mut self, menu: impl Into<MenuSource>) {
        self.menu = menu.into();
        self.resolve_items();
    }

    /// An empty data item keeps the current items.
    fn resolve_items(&mut self) {
        if !self.data_item.is_empty() {
            self.items = self.menu.resolve(&self.data_item);
        }
        self.icon_displayed = self.items.iter().any(|item| item.icon.is_some());
        let duplicates = duplicate_labels(&self.items);
        if !duplicates.is_empty() {
            mlui_core::warn!(labels = ?duplicates, "actions menu item labels are not unique");
        }
        mlui_core::trace!(
            items = self.items.len(),
            icons = self.icon_displayed,
            "actions menu items resolved"
        );
    }

    // ========== Operations ==========

    /// Toggle the panel and recompute its position.
    ///
    /// Uses the trigger and panel boxes measured by the last render. A panel
    /// that was never measured is sized from the current items.
    pub fn activate(&mut self, pointer_x: u16, viewport: Size) {
        self.open = !self.open;
        let panel = self.panel_area.unwrap_or_else(|| {
            let size = self.panel_size();
            Rect::new(
                clip_coordinate(self.position.left),
                clip_coordinate(self.position.top),
                size.width,
                size.height,
            )
        });
        self.position = compute_position(
            i32::from(pointer_x),
            self.trigger_area.map(BoundingBox::from),
            Some(BoundingBox::from(panel)),
            viewport,
            self.edge_offset,
        );
        mlui_core::debug!(
            open = self.open,
            top = self.position.top,
            left = self.position.left,
            "actions menu toggled"
        );
    }

    /// Pointer entered the container: mount the panel, cancel dismissal.
    pub fn pointer_enter(&mut self) {
        self.mounted = true;
        if self.timer.cancel() {
            mlui_core::trace!("actions menu dismissal cancelled");
        }
    }

    /// Pointer left the container: schedule dismissal if open.
    pub fn pointer_leave(&mut self, now: Instant) {
        if self.open {
            self.timer.schedule(now);
            mlui_core::trace!("actions menu dismissal scheduled");
        }
    }

    /// Fire a due dismissal. Returns `true` if the menu was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.open = false;
        self.mounted = false;
        mlui_core::debug!("actions menu dismissed");
        true
    }

    /// A click anywhere in the panel closes it; the panel stays mounted.
    pub fn select_item(&mut self) {
        self.open = false;
    }

    /// Release the timer and reset all state.
    pub fn unmount(&mut self) {
        self.timer.cancel();
        self.open = false;
        self.mounted = false;
        self.hovered = false;
        self.position = PositionStyle::default();
        self.trigger_area = None;
        self.panel_area = None;
    }

    // ========== Event routing ==========

    fn in_container(&self, x: u16, y: u16) -> bool {
        self.trigger_area.is_some_and(|area| area.contains(x, y)) || self.in_open_panel(x, y)
    }

    fn in_open_panel(&self, x: u16, y: u16) -> bool {
        self.open && self.mounted && self.panel_area.is_some_and(|area| area.contains(x, y))
    }

    /// Visible item under a panel cell, if any.
    fn item_at(&self, x: u16, y: u16) -> Option<&MenuItem> {
        let panel = self.panel_area?;
        let inner = panel.shrink(1);
        if !inner.contains(x, y) {
            return None;
        }
        self.visible_items().nth(usize::from(y - inner.y))
    }

    /// Route one event from the host loop.
    ///
    /// Pointer motion anywhere drives enter/leave, a left click on the
    /// trigger toggles the panel, a left click on the open panel selects
    /// the item under it, and [`Event::Tick`] fires a due dismissal.
    pub fn handle_event(&mut self, event: &Event, now: Instant, viewport: Size) -> ActionsMenuEvent {
        match event {
            Event::Mouse(mouse) => {
                let (x, y) = mouse.position();
                let hover = self.track_hover(x, y, now);
                if !mouse.is_primary_click() {
                    return hover;
                }
                if self.in_open_panel(x, y) {
                    return self.click_panel(x, y);
                }
                if self.trigger_area.is_some_and(|area| area.contains(x, y)) {
                    self.activate(x, viewport);
                    return ActionsMenuEvent::Toggled { open: self.open };
                }
                hover
            }
            Event::Tick => {
                if self.tick(now) {
                    ActionsMenuEvent::Dismissed
                } else {
                    ActionsMenuEvent::Ignored
                }
            }
            Event::Resize { .. } | Event::Focus(_) => ActionsMenuEvent::Ignored,
        }
    }

    fn track_hover(&mut self, x: u16, y: u16, now: Instant) -> ActionsMenuEvent {
        let inside = self.in_container(x, y);
        match (inside, self.hovered) {
            (true, was_hovered) => {
                self.hovered = true;
                self.pointer_enter();
                if was_hovered {
                    ActionsMenuEvent::Ignored
                } else {
                    ActionsMenuEvent::Entered
                }
            }
            (false, true) => {
                self.hovered = false;
                self.pointer_leave(now);
                ActionsMenuEvent::Left
            }
            (false, false) => ActionsMenuEvent::Ignored,
        }
    }

    fn click_panel(&mut self, x: u16, y: u16) -> ActionsMenuEvent {
        let selected = self.item_at(x, y).cloned();
        let outcome = match selected {
            Some(item) => {
                ActionsMenuItem::new(&self.data_item, &item, self.icon_displayed).select();
                ActionsMenuEvent::Selected { label: item.label }
            }
            None => ActionsMenuEvent::Closed,
        };
        self.select_item();
        outcome
    }

    // ========== Accessors ==========

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[inline]
    pub fn position(&self) -> PositionStyle {
        self.position
    }

    #[inline]
    pub fn data_item(&self) -> &DataItem {
        &self.data_item
    }

    /// All resolved items, hidden ones included.
    #[inline]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Resolved items that are drawn, in order.
    pub fn visible_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(|item| !item.hidden)
    }

    /// Whether rows reserve the icon gutter.
    #[inline]
    pub fn is_icon_displayed(&self) -> bool {
        self.icon_displayed
    }

    /// Area the trigger was last rendered in.
    #[inline]
    pub fn trigger_area(&self) -> Option<Rect> {
        self.trigger_area
    }

    /// Area the panel was last measured at.
    #[inline]
    pub fn panel_area(&self) -> Option<Rect> {
        self.panel_area
    }

    /// Pending dismissal deadline, for hosts that sleep until the next tick.
    #[inline]
    pub fn dismiss_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    #[inline]
    pub fn overlay(&self) -> OverlayHandle {
        self.overlay
    }

    #[inline]
    pub fn hit_id(&self) -> HitId {
        self.hit_id
    }

    /// Size of the panel for the current items: border, padding, and rows.
    pub fn panel_size(&self) -> Size {
        let content_width = self
            .visible_items()
            .map(|item| ActionsMenuItem::new(&self.data_item, item, self.icon_displayed).width())
            .max()
            .unwrap_or(0);
        let rows = u16::try_from(self.visible_items().count()).unwrap_or(u16::MAX);
        Size::new(
            content_width.saturating_add(2 * PANEL_PADDING + 2),
            rows.saturating_add(2),
        )
    }
}

/// Renderer for an [`ActionsMenuState`].
///
/// [`StatefulWidget::render`] draws the trigger into the base frame;
/// [`ActionsMenu::render_overlay`] draws the panel into its overlay layer.
#[derive(Debug, Clone, Copy)]
pub struct ActionsMenu<'a> {
    styles: &'a StyleSheet,
    glyph: char,
}

impl<'a> ActionsMenu<'a> {
    pub fn new(styles: &'a StyleSheet) -> Self {
        Self {
            styles,
            glyph: TRIGGER_GLYPH,
        }
    }

    /// Set the trigger glyph.
    #[must_use]
    pub fn glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    /// Draw the panel into the state's overlay layer.
    ///
    /// While mounted the panel is measured at the current position; it is
    /// painted only while open. Fails if the overlay layer is not registered.
    pub fn render_overlay(
        &self,
        host: &mut OverlayHost,
        state: &mut ActionsMenuState,
    ) -> Result<(), ActionsMenuError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "ActionsMenu",
            layer = "overlay",
            open = state.open,
            mounted = state.mounted
        )
        .entered();

        let frame = match host.frame_mut(state.overlay) {
            Ok(frame) => frame,
            Err(err) => {
                mlui_core::error!(error = %err, "actions menu overlay is missing");
                return Err(err.into());
            }
        };

        if !state.mounted {
            state.panel_area = None;
            return Ok(());
        }

        let size = state.panel_size();
        let area = Rect::new(
            clip_coordinate(state.position.left),
            clip_coordinate(state.position.top),
            size.width,
            size.height,
        );
        state.panel_area = Some(area);

        if state.open {
            self.paint_panel(area, frame, state);
        }
        Ok(())
    }

    fn paint_panel(&self, area: Rect, frame: &mut Frame, state: &ActionsMenuState) {
        let body = self
            .styles
            .class(ACTIONS_MENU_BODY_SHOW)
            .merge(&self.styles.class(ACTIONS_MENU_BODY));
        let item_style = self.styles.get_or_default(ACTIONS_MENU_ITEM).merge(&body);
        let icon_style = self.styles.get_or_default(ACTIONS_MENU_ICON);

        clear_area(&mut frame.buffer, area, body);
        draw_border(frame, area, body);
        frame.register_hit(area, state.hit_id, HitRegion::Content, 0);

        let inner = area.shrink(1);
        let rows = Rect::new(
            inner.x.saturating_add(PANEL_PADDING),
            inner.y,
            inner.width.saturating_sub(2 * PANEL_PADDING),
            inner.height,
        );
        let visible = state
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.hidden);
        for (row, (index, item)) in visible.enumerate() {
            let y = rows.y.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
            if y >= rows.bottom() {
                break;
            }
            ActionsMenuItem::new(&state.data_item, item, state.icon_displayed)
                .style(item_style)
                .icon_style(icon_style)
                .hit(state.hit_id, index as u64)
                .render(Rect::new(rows.x, y, rows.width, 1), frame);
        }
    }
}

impl StatefulWidget for ActionsMenu<'_> {
    type State = ActionsMenuState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "ActionsMenu",
            layer = "base",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            state.trigger_area = None;
            return;
        }
        state.trigger_area = Some(area);

        let style = self.styles.get_or_default(ACTIONS_MENU_BUTTON);
        let mut glyph = [0u8; 4];
        draw_text_span(
            &mut frame.buffer,
            area.x,
            area.y,
            self.glyph.encode_utf8(&mut glyph),
            style,
            area.right(),
        );
        frame.register_hit(area, state.hit_id, HitRegion::Button, 0);
    }
}

/// Labels that occur more than once, in first-repeat order.
fn duplicate_labels(items: &[MenuItem]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    for item in items {
        let label = item.label.as_str();
        if !seen.insert(label) && !repeated.contains(&label) {
            repeated.push(label);
        }
    }
    repeated
}

fn clip_coordinate(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

fn draw_border(frame: &mut Frame, area: Rect, style: Style) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let cell = |c: char| {
        let mut cell = Cell::from_char(c);
        style.apply_to(&mut cell);
        cell
    };
    let right = area.right() - 1;
    let bottom = area.bottom() - 1;

    frame.buffer.set(area.x, area.y, cell('┌'));
    frame.buffer.set(right, area.y, cell('┐'));
    frame.buffer.set(area.x, bottom, cell('└'));
    frame.buffer.set(right, bottom, cell('┘'));
    for x in area.x + 1..right {
        frame.buffer.set(x, area.y, cell('─'));
        frame.buffer.set(x, bottom, cell('─'));
    }
    for y in area.y + 1..bottom {
        frame.buffer.set(area.x, y, cell('│'));
        frame.buffer.set(right, y, cell('│'));
    }
}
