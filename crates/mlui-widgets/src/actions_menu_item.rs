#![forbid(unsafe_code)]

//! One row of the actions menu panel.
//!
//! The row is `[icon gutter] label`. When any item of the menu has an icon
//! every row reserves the gutter, so labels stay aligned even for items
//! without one.

use mlui_core::geometry::Rect;
use mlui_render::frame::{Frame, HitData, HitId, HitRegion};
use mlui_style::Style;

use crate::menu::{DataItem, MenuItem};
use crate::{Widget, draw_text_span};

/// Width of the icon gutter: the glyph plus one space.
pub const ICON_GUTTER_WIDTH: u16 = 2;

/// Renderer for a single menu item.
#[derive(Debug, Clone)]
pub struct ActionsMenuItem<'a> {
    data_item: &'a DataItem,
    menu_item: &'a MenuItem,
    is_icon_displayed: bool,
    style: Style,
    icon_style: Style,
    hit: Option<(HitId, HitData)>,
}

impl<'a> ActionsMenuItem<'a> {
    pub fn new(data_item: &'a DataItem, menu_item: &'a MenuItem, is_icon_displayed: bool) -> Self {
        Self {
            data_item,
            menu_item,
            is_icon_displayed,
            style: Style::default(),
            icon_style: Style::default(),
            hit: None,
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn icon_style(mut self, style: Style) -> Self {
        self.icon_style = style;
        self
    }

    /// Register the row as a hit region carrying `data`.
    #[must_use]
    pub fn hit(mut self, id: HitId, data: HitData) -> Self {
        self.hit = Some((id, data));
        self
    }

    /// Columns this row needs to show its label in full.
    pub fn width(&self) -> u16 {
        let label = mlui_render::display_width(&self.menu_item.label);
        let label = u16::try_from(label).unwrap_or(u16::MAX);
        if self.is_icon_displayed {
            label.saturating_add(ICON_GUTTER_WIDTH)
        } else {
            label
        }
    }

    /// Run the item's action with the menu's data item.
    pub fn select(&self) {
        mlui_core::debug!(label = %self.menu_item.label, "actions menu item selected");
        self.menu_item.invoke(self.data_item);
    }
}

impl Widget for ActionsMenuItem<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let max_x = area.right();
        let mut x = area.x;
        if self.is_icon_displayed {
            if let Some(icon) = self.menu_item.icon {
                let mut glyph = [0u8; 4];
                draw_text_span(
                    &mut frame.buffer,
                    x,
                    area.y,
                    icon.encode_utf8(&mut glyph),
                    self.icon_style.merge(&self.style),
                    max_x,
                );
            }
            x = x.saturating_add(ICON_GUTTER_WIDTH).min(max_x);
        }
        draw_text_span(&mut frame.buffer, x, area.y, &self.menu_item.label, self.style, max_x);

        if let Some((id, data)) = self.hit {
            frame.register_hit(Rect::new(area.x, area.y, area.width, 1), id, HitRegion::Row, data);
        }
    }
}
