//! Property tests for panel placement.
//!
//! 1. A panel that fits opens directly below the trigger at the pointer.
//! 2. A panel crossing the right edge never starts closer than the offset.
//! 3. A panel crossing the bottom edge ends at the trigger's top.
//! 4. Toggling twice restores the open state and yields the same position.

use mlui_core::geometry::{BoundingBox, Rect, Size};
use mlui_render::overlay::OverlayHost;
use mlui_widgets::{
    ActionsMenuConfig, ActionsMenuState, DataItem, MenuItem, PositionStyle, compute_position,
};
use proptest::prelude::*;

const OFFSET: i32 = 35;

fn viewport() -> impl Strategy<Value = Size> {
    (100u16..=400, 60u16..=300).prop_map(|(w, h)| Size::new(w, h))
}

proptest! {
    #[test]
    fn fitting_panel_opens_below_at_pointer(
        vp in viewport(),
        panel_w in 1i32..40,
        panel_h in 1i32..20,
        trigger_h in 1i32..5,
        x_frac in 0.0f64..1.0,
        y_frac in 0.0f64..1.0,
    ) {
        let max_x = i32::from(vp.width) - panel_w;
        let max_top = i32::from(vp.height) - trigger_h - OFFSET - panel_h - 1;
        prop_assume!(max_x >= 0 && max_top >= 0);
        let pointer_x = (f64::from(max_x) * x_frac) as i32;
        let trigger_top = (f64::from(max_top) * y_frac) as i32;

        let trigger = BoundingBox::new(trigger_top, pointer_x, 1, trigger_h);
        let panel = BoundingBox::new(0, 0, panel_w, panel_h);
        let pos = compute_position(pointer_x, Some(trigger), Some(panel), vp, OFFSET);
        prop_assert_eq!(pos, PositionStyle { top: trigger_top + trigger_h, left: pointer_x });
    }

    #[test]
    fn right_overflow_respects_offset(
        vp in viewport(),
        panel_w in 1i32..200,
        pointer_x in 0i32..400,
    ) {
        prop_assume!(pointer_x + panel_w > i32::from(vp.width));
        let panel = BoundingBox::new(0, 0, panel_w, 10);
        let pos = compute_position(pointer_x, None, Some(panel), vp, OFFSET);
        prop_assert!(pos.left >= OFFSET);
        prop_assert!(pos.left <= pointer_x.max(OFFSET));
    }

    #[test]
    fn bottom_overflow_opens_upward(
        vp in viewport(),
        panel_h in 1i32..50,
        trigger_h in 1i32..5,
        trigger_top in 0i32..300,
    ) {
        prop_assume!(trigger_top + trigger_h + OFFSET + panel_h >= i32::from(vp.height));
        let trigger = BoundingBox::new(trigger_top, 0, 1, trigger_h);
        let panel = BoundingBox::new(0, 0, 10, panel_h);
        let pos = compute_position(0, Some(trigger), Some(panel), vp, OFFSET);
        prop_assert_eq!(pos.top + panel_h, trigger.bottom() - trigger_h);
    }

    #[test]
    fn activate_twice_is_identity(
        labels in prop::collection::vec("[A-Za-z]{1,12}", 0..6),
        tx in 0u16..100,
        ty in 0u16..60,
        pointer_dx in 0u16..3,
    ) {
        let (_host, overlay) = OverlayHost::with_default_layer(Size::new(100, 60));
        let items: Vec<MenuItem> = labels
            .iter()
            .map(|label| MenuItem::new(label.clone(), |_: &DataItem| {}))
            .collect();
        let mut state = ActionsMenuState::new(ActionsMenuConfig::new(items, overlay));
        let mut base = mlui_render::frame::Frame::new(100, 60);
        let styles = mlui_style::StyleSheet::new();
        mlui_widgets::StatefulWidget::render(
            &mlui_widgets::ActionsMenu::new(&styles),
            Rect::new(tx, ty, 3, 1),
            &mut base,
            &mut state,
        );

        let viewport = Size::new(100, 60);
        let was_open = state.is_open();
        state.activate(tx + pointer_dx, viewport);
        let first = state.position();
        state.activate(tx + pointer_dx, viewport);
        prop_assert_eq!(state.is_open(), was_open);
        prop_assert_eq!(state.position(), first);
    }
}
