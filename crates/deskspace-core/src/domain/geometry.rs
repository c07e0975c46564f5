//! Points and rectangles shared by the physical and logical coordinate spaces.
//!
//! Both spaces use `f64` coordinates.  Physical bounds reported by an OS are
//! usually whole pixels, but logical bounds are fractional as soon as a
//! monitor's scale factor is not an integer, so every type here is float based.
//! Callers that need integer pixels snap with [`Rect::to_nearest_int`] or
//! [`Point::round`].

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Relative tolerance used by [`approximately_equal`].
///
/// Edge coordinates derived from DPI arithmetic drift by a few ULPs; this is
/// comfortably above that and far below one pixel.
pub const EDGE_TOLERANCE: f64 = 1e-9;

/// Returns `true` if `a` and `b` are equal within [`EDGE_TOLERANCE`].
///
/// The tolerance is relative to the larger magnitude, with a floor of `1.0` so
/// coordinates near zero compare with an absolute tolerance instead.
pub fn approximately_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let magnitude = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= EDGE_TOLERANCE * magnitude
}

/// A point in either coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are exactly zero.
    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Euclidean distance between `self` and `other`.
    pub fn distance_from(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rounds both coordinates to the nearest whole pixel.
    pub fn round(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }

    /// Returns `true` if both coordinates match `other` within `tolerance`.
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// An axis-aligned rectangle described by its top-left corner and extent.
///
/// `right` and `bottom` are exclusive: a point on the right edge is outside the
/// rectangle but on the left edge of its right-hand neighbour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left coordinate.
    pub x: f64,
    /// Top coordinate.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the rightmost X coordinate (exclusive).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns `true` if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns a copy moved so that its top-left corner is `position`.
    pub fn with_position(&self, position: Point) -> Rect {
        Rect::new(position.x, position.y, self.width, self.height)
    }

    /// Returns `true` if `point` lies inside the half-open rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.y >= self.y && point.x < self.right() && point.y < self.bottom()
    }

    /// Returns the overlapping region, or an empty rectangle at `self`'s origin
    /// when the two do not overlap.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return Rect::new(self.x, self.y, 0.0, 0.0);
        }
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Smallest rectangle containing both `self` and `other`.
    ///
    /// An empty rectangle contributes nothing, so folding from
    /// `Rect::default()` yields the bounds of the non-empty inputs.
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Snaps every component to the nearest whole pixel.
    pub fn to_nearest_int(&self) -> Rect {
        Rect::new(
            self.x.round(),
            self.y.round(),
            self.width.round(),
            self.height.round(),
        )
    }

    /// Returns `true` if every component matches `other` within `tolerance`.
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// Translates the rectangle by `rhs`.
impl Add<Point> for Rect {
    type Output = Rect;

    fn add(self, rhs: Point) -> Rect {
        Rect::new(self.x + rhs.x, self.y + rhs.y, self.width, self.height)
    }
}

/// Translates the rectangle by `-rhs`.
impl Sub<Point> for Rect {
    type Output = Rect;

    fn sub(self, rhs: Point) -> Rect {
        Rect::new(self.x - rhs.x, self.y - rhs.y, self.width, self.height)
    }
}

/// Scales origin and extent alike.
impl Mul<f64> for Rect {
    type Output = Rect;

    fn mul(self, rhs: f64) -> Rect {
        Rect::new(self.x * rhs, self.y * rhs, self.width * rhs, self.height * rhs)
    }
}

/// Scales origin and extent alike.
impl Div<f64> for Rect {
    type Output = Rect;

    fn div(self, rhs: f64) -> Rect {
        Rect::new(self.x / rhs, self.y / rhs, self.width / rhs, self.height / rhs)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
