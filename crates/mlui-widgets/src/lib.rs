#![forbid(unsafe_code)]

//! Console widgets: the floating actions menu, its item rows, and the
//! project dashboard table.

pub mod actions_menu;
pub mod actions_menu_item;
pub mod menu;
pub mod project_table;

pub use actions_menu::{
    ActionsMenu, ActionsMenuConfig, ActionsMenuError, ActionsMenuEvent, ActionsMenuState,
    PositionStyle, compute_position,
};
pub use actions_menu_item::ActionsMenuItem;
pub use menu::{DataItem, MenuItem, MenuSource};
pub use project_table::{CellValue, ProjectTable, ProjectTableData, TableCell, TableHeader};

use mlui_core::geometry::Rect;
use mlui_render::buffer::Buffer;
use mlui_render::cell::Cell;
use mlui_render::frame::Frame;
use mlui_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A `Widget` is a renderable component.
///
/// Widgets draw into the frame's buffer within `area` and may register hit
/// regions for the cells they own.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

/// Fill an area with styled blanks.
pub(crate) fn clear_area(buf: &mut Buffer, area: Rect, style: Style) {
    let mut blank = Cell::from_char(' ');
    style.apply_to(&mut blank);
    buf.fill(area, blank);
}

/// Draw a text span into a buffer at the given position.
///
/// Returns the x position after the last drawn character.
/// Stops at `max_x` (exclusive).
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if x as usize + w > max_x as usize {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let mut cell = Cell::from_char(c);
            style.apply_to(&mut cell);
            buf.set(x, y, cell);
        }
        x = x.saturating_add(w as u16);
    }
    x
}
