#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! [`Rect`] and [`Size`] live in buffer space (unsigned cells, origin at the
//! top-left of the viewport). [`BoundingBox`] is the signed, measured view of
//! a rectangle used for placement math, where intermediate results may fall
//! outside the viewport.

/// A rectangle for layout bounds, clipping, and hit testing.
///
/// Uses viewport coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Size of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Shrink the rectangle by `n` cells on every side.
    pub fn shrink(&self, n: u16) -> Rect {
        let double = n.saturating_mul(2);
        Rect {
            x: self.x.saturating_add(n),
            y: self.y.saturating_add(n),
            width: self.width.saturating_sub(double),
            height: self.height.saturating_sub(double),
        }
    }

    /// Signed bounding box of this rectangle.
    #[inline]
    pub const fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            self.y as i32,
            self.x as i32,
            self.width as i32,
            self.height as i32,
        )
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Check if the size has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u16, u16)> for Size {
    fn from((width, height): (u16, u16)) -> Self {
        Self::new(width, height)
    }
}

/// A measured rectangle in signed viewport coordinates.
///
/// This is what a widget reads back about an element it rendered earlier:
/// `top`/`left` of the origin plus its extent. `bottom` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct BoundingBox {
    /// Top edge.
    pub top: i32,
    /// Left edge.
    pub left: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl BoundingBox {
    /// Create a new bounding box.
    #[inline]
    pub const fn new(top: i32, left: i32, width: i32, height: i32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Bottom edge (`top + height`).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Right edge (`left + width`).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        rect.bounding_box()
    }
}
