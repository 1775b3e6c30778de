#![forbid(unsafe_code)]

//! Style: optional colors and attributes layered onto cells.
//!
//! Every property is optional so that styles compose: a `None` field leaves
//! whatever is underneath unchanged.

use mlui_render::cell::{Cell, PackedRgba, StyleFlags};

/// A partial cell style.
///
/// # Example
/// ```
/// use mlui_render::cell::PackedRgba;
/// use mlui_style::Style;
///
/// let style = Style::new().fg(PackedRgba::rgb(255, 0, 0)).bold();
/// assert!(!style.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<PackedRgba>,
    /// Background color.
    pub bg: Option<PackedRgba>,
    /// Attribute flags.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[inline]
    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[inline]
    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    #[inline]
    #[must_use]
    fn with_flag(mut self, flag: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default() | flag);
        self
    }

    /// Add bold.
    #[must_use]
    pub fn bold(self) -> Self {
        self.with_flag(StyleFlags::BOLD)
    }

    /// Add dim.
    #[must_use]
    pub fn dim(self) -> Self {
        self.with_flag(StyleFlags::DIM)
    }

    /// Add italic.
    #[must_use]
    pub fn italic(self) -> Self {
        self.with_flag(StyleFlags::ITALIC)
    }

    /// Add underline.
    #[must_use]
    pub fn underline(self) -> Self {
        self.with_flag(StyleFlags::UNDERLINE)
    }

    /// Add reverse video.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.with_flag(StyleFlags::REVERSE)
    }

    /// Whether the attribute is set.
    #[inline]
    pub fn has_attr(&self, flag: StyleFlags) -> bool {
        self.attrs.is_some_and(|attrs| attrs.contains(flag))
    }

    /// Whether no property is set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Merge with a parent style; properties set on `self` win.
    ///
    /// Attribute flags are unioned.
    #[must_use]
    pub fn merge(&self, parent: &Style) -> Style {
        let attrs = match (self.attrs, parent.attrs) {
            (Some(a), Some(b)) => Some(a | b),
            (a, b) => a.or(b),
        };
        Style {
            fg: self.fg.or(parent.fg),
            bg: self.bg.or(parent.bg),
            attrs,
        }
    }

    /// Write the set properties onto a cell, keeping its content.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs |= attrs;
        }
    }
}
