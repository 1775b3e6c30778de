#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s covering the viewport.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Scissor stack intersection monotonically decreases on push
//! 4. The scissor stack always has at least one element

use crate::cell::{Cell, CellContent};
use mlui_core::geometry::Rect;

/// A 2D grid of viewport cells.
///
/// # Example
///
/// ```
/// use mlui_render::buffer::Buffer;
/// use mlui_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// assert_eq!(buffer.row_text(0).trim_end(), "Hi");
/// ```
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    scissor_stack: Vec<Rect>,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// A zero dimension yields an empty buffer that ignores every write.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
            scissor_stack: vec![Rect::from_size(width, height)],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get a reference to the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Set the cell at (x, y).
    ///
    /// Writes outside the bounds or the current scissor are dropped. A wide
    /// character is written atomically: if its tail would be clipped,
    /// nothing is written.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let width = cell.content.width().max(1);
        let scissor = self.current_scissor();
        for dx in 0..width {
            let cx = x as usize + dx;
            if cx > u16::MAX as usize || !scissor.contains(cx as u16, y) {
                return;
            }
        }

        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
        for dx in 1..width {
            if let Some(idx) = self.index(x + dx as u16, y) {
                self.cells[idx] = Cell::CONTINUATION;
            }
        }
    }

    /// Fill a rectangular region with the given cell, respecting the scissor.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.current_scissor().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Clear all cells to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Get raw access to the cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Text of one row; empty cells read as spaces, continuations are skipped.
    ///
    /// Returns an empty string for rows outside the buffer.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .filter_map(|cell| match cell.content {
                CellContent::Char(c) => Some(c),
                CellContent::Empty => Some(' '),
                CellContent::Continuation => None,
            })
            .collect()
    }

    /// Copy every non-empty cell of `src` onto this buffer at the same position.
    ///
    /// Used to compose overlay layers over the base frame.
    pub fn overlay_from(&mut self, src: &Buffer) {
        let width = self.width.min(src.width);
        let height = self.height.min(src.height);
        for y in 0..height {
            for x in 0..width {
                if let Some(cell) = src.get(x, y)
                    && !cell.is_empty()
                    && let Some(idx) = self.index(x, y)
                {
                    self.cells[idx] = *cell;
                }
            }
        }
    }

    // ========== Scissor Stack ==========

    /// Push a scissor (clipping) region onto the stack.
    ///
    /// The effective scissor is the intersection of all pushed rects.
    pub fn push_scissor(&mut self, rect: Rect) {
        let intersected = self.current_scissor().intersection(&rect);
        self.scissor_stack.push(intersected);
    }

    /// Pop a scissor region from the stack.
    ///
    /// Does nothing if only the base scissor remains.
    pub fn pop_scissor(&mut self) {
        if self.scissor_stack.len() > 1 {
            self.scissor_stack.pop();
        }
    }

    /// Get the current effective scissor region.
    #[inline]
    pub fn current_scissor(&self) -> Rect {
        self.scissor_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(4, 2);
        buf.set(1, 1, Cell::from_char('z'));
        assert_eq!(buf.get(1, 1).unwrap().content.as_char(), Some('z'));
        assert!(buf.get(4, 0).is_none());
    }

    #[test]
    fn out_of_bounds_write_is_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 5, Cell::from_char('x'));
        assert!(buf.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn scissor_clips_writes() {
        let mut buf = Buffer::new(5, 1);
        buf.push_scissor(Rect::new(1, 0, 2, 1));
        for x in 0..5 {
            buf.set(x, 0, Cell::from_char('#'));
        }
        buf.pop_scissor();
        assert_eq!(buf.row_text(0), " ##  ");
    }

    #[test]
    fn base_scissor_cannot_be_popped() {
        let mut buf = Buffer::new(3, 3);
        buf.pop_scissor();
        assert_eq!(buf.current_scissor(), buf.bounds());
    }

    #[test]
    fn wide_char_writes_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('日'));
        assert!(buf.get(1, 0).unwrap().is_continuation());
        assert_eq!(buf.row_text(0), "日  ");
    }

    #[test]
    fn clipped_wide_char_is_not_written() {
        let mut buf = Buffer::new(2, 1);
        buf.set(1, 0, Cell::from_char('日'));
        assert!(buf.get(1, 0).unwrap().is_empty());
    }

    #[test]
    fn fill_respects_bounds() {
        let mut buf = Buffer::new(3, 2);
        buf.fill(Rect::new(1, 0, 10, 10), Cell::from_char('.'));
        assert_eq!(buf.row_text(0), " ..");
        assert_eq!(buf.row_text(1), " ..");
    }

    #[test]
    fn overlay_from_copies_only_drawn_cells() {
        let mut base = Buffer::new(3, 1);
        base.fill(base.bounds(), Cell::from_char('b'));
        let mut top = Buffer::new(3, 1);
        top.set(1, 0, Cell::from_char('T'));
        base.overlay_from(&top);
        assert_eq!(base.row_text(0), "bTb");
    }

    #[test]
    fn zero_sized_buffer_ignores_writes() {
        let mut buf = Buffer::new(0, 0);
        buf.set(0, 0, Cell::from_char('x'));
        assert_eq!(buf.row_text(0), "");
    }
}
