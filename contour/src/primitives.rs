//! Core primitive types for Contour.
//!
//! Two coordinate spaces meet in this crate:
//!
//! - **Logical (DIP)** units, `f32`: window positions, preferred sizes, insets.
//! - **Device pixels**, `i32`: regions, allocations, paint rectangles.
//!
//! The scale factor of the owning window converts between them.

use std::ops::Add;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// A rectangle in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }
}

/// A 2D size in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Grow both dimensions by the given amounts.
    #[inline]
    pub fn enlarge(&mut self, width: f32, height: f32) {
        self.width += width;
        self.height += height;
    }
}

/// An integer size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntSize {
    pub width: i32,
    pub height: i32,
}

impl IntSize {
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in device pixels.
///
/// `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// A rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: IntSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn size(&self) -> IntSize {
        IntSize::new(self.width, self.height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Area in pixels. Empty rectangles have zero area.
    #[inline]
    pub const fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.width as u64 * self.height as u64
        }
    }

    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    #[inline]
    pub fn intersects(&self, other: &IntRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest rectangle containing both. Empty inputs are ignored.
    pub fn union(&self, other: &IntRect) -> IntRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        IntRect::new(x, y, right - x, bottom - y)
    }

    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> IntRect {
        IntRect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Shrink by the given amounts on each side. Never produces a negative size.
    pub fn inset(&self, left: i32, top: i32, right: i32, bottom: i32) -> IntRect {
        IntRect::new(
            self.x + left,
            self.y + top,
            (self.width - left - right).max(0),
            (self.height - top - bottom).max(0),
        )
    }

    /// Shrink by the same amount on every side.
    #[inline]
    pub fn inset_all(&self, amount: i32) -> IntRect {
        self.inset(amount, amount, amount, amount)
    }
}

/// Distances between an outer and an inner rectangle.
///
/// Measured insets (frame extents, client shadow) satisfy
/// `outer == insets.expand(inner)`. Values may be negative when a
/// decoration correction pulls an edge inward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    #[inline]
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Grow `inner` outward by these insets.
    pub fn expand(&self, inner: Rect) -> Rect {
        Rect::new(
            inner.x - self.left,
            inner.y - self.top,
            inner.width + self.horizontal(),
            inner.height + self.vertical(),
        )
    }
}

/// RGBA color with components in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

// =========================================================================
// Scale conversions
// =========================================================================

/// Scale a logical size by `factor` (logical -> physical when `factor` is
/// the window scale, physical -> logical when it is the reciprocal).
#[inline]
pub fn scale_size(size: Size, factor: f32) -> Size {
    Size::new(size.width * factor, size.height * factor)
}

#[inline]
pub fn scale_point(point: Point, factor: f32) -> Point {
    Point::new(point.x * factor, point.y * factor)
}

/// Round each dimension up to whole device pixels.
#[inline]
pub fn to_ceiled_size(size: Size) -> IntSize {
    IntSize::new(size.width.ceil() as i32, size.height.ceil() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // IntRect tests
    // =========================================================================

    #[test]
    fn int_rect_edges_are_exclusive() {
        let r = IntRect::new(2, 3, 4, 5);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 8);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 7));
        assert!(!r.contains(6, 7));
        assert!(!r.contains(5, 8));
    }

    #[test]
    fn int_rect_area_of_degenerate_is_zero() {
        assert_eq!(IntRect::new(0, 0, -3, 4).area(), 0);
        assert_eq!(IntRect::new(0, 0, 3, 0).area(), 0);
        assert_eq!(IntRect::new(1, 1, 3, 4).area(), 12);
    }

    #[test]
    fn int_rect_intersects_excludes_touching_edges() {
        let a = IntRect::new(0, 0, 10, 10);
        assert!(a.intersects(&IntRect::new(5, 5, 10, 10)));
        assert!(!a.intersects(&IntRect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&IntRect::new(2, 2, 0, 4)));
    }

    #[test]
    fn int_rect_union_skips_empty() {
        let a = IntRect::new(1, 1, 2, 2);
        assert_eq!(IntRect::ZERO.union(&a), a);
        assert_eq!(a.union(&IntRect::new(5, 5, 1, 1)), IntRect::new(1, 1, 5, 5));
    }

    #[test]
    fn int_rect_inset_clamps() {
        let r = IntRect::new(0, 0, 4, 4);
        assert_eq!(r.inset_all(1), IntRect::new(1, 1, 2, 2));
        assert_eq!(r.inset_all(3), IntRect::new(3, 3, 0, 0));
    }

    // =========================================================================
    // Insets tests
    // =========================================================================

    #[test]
    fn insets_expand_grows_each_side() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        let outer = insets.expand(Rect::new(10.0, 10.0, 100.0, 50.0));
        assert_eq!(outer, Rect::new(8.0, 9.0, 106.0, 54.0));
        assert!(Insets::ZERO.is_zero());
        assert!(!insets.is_zero());
    }

    // =========================================================================
    // Scale helpers
    // =========================================================================

    #[test]
    fn ceiled_size_rounds_up() {
        assert_eq!(to_ceiled_size(Size::new(10.2, 3.0)), IntSize::new(11, 3));
    }

    #[test]
    fn scale_point_multiplies_both_axes() {
        assert_eq!(scale_point(Point::new(3.0, 4.5), 2.0), Point::new(6.0, 9.0));
    }

    #[test]
    fn size_enlarge() {
        let mut s = Size::new(10.0, 5.0);
        s.enlarge(2.0, 4.0);
        assert_eq!(s, Size::new(12.0, 9.0));
    }

    #[test]
    fn color_transparency() {
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(!Color::BLACK.is_transparent());
    }
}
