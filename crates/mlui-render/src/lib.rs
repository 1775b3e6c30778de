#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames with hit testing, and overlay layers.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod overlay;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in viewport columns.
#[inline]
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() {
        return text.bytes().filter(|b| !b.is_ascii_control()).count();
    }
    text.graphemes(true).map(grapheme_width).sum()
}

/// Display width of a single grapheme cluster.
#[inline]
pub fn grapheme_width(grapheme: &str) -> usize {
    UnicodeWidthStr::width(grapheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width_ignores_controls() {
        assert_eq!(display_width("Edit"), 4);
        assert_eq!(display_width("a\tb"), 2);
    }

    #[test]
    fn wide_graphemes_count_double() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width("e\u{301}"), 1);
    }
}
