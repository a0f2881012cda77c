//! Geometric primitives for graph layout and drawing.
//!
//! Two coordinate spaces meet in Trellis:
//!
//! - **Layout space**: the unitless plane the spring simulation works in.
//!   Nodes start at the origin and drift apart; coordinates are small
//!   (a handful of units) and may be negative.
//! - **Canvas space**: the drawing surface, consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! All types use `f64` so that layout runs are reproducible bit-for-bit for a
//! fixed random seed.
//!
//! - [`Point`] - A 2D coordinate (also used as a force vector)
//! - [`Bounds`] - An axis-aligned bounding box

/// A 2D point or vector.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// The origin, where every node starts a layout run.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a new point with the specified coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Checks that neither coordinate is NaN or infinite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean length of the vector from the origin to this point
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::Point;
    /// let doubled = Point::new(10.0, 20.0).scale(2.0);
    /// assert_eq!(doubled, Point::new(20.0, 40.0));
    /// ```
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Clamps each coordinate independently into `[-limit, limit]`.
    ///
    /// Unlike [`f64::clamp`] this never panics; a negative limit collapses
    /// both coordinates to `limit`.
    pub fn clamp_axes(self, limit: f64) -> Self {
        Self {
            x: self.x.max(-limit).min(limit),
            y: self.y.max(-limit).min(limit),
        }
    }

    /// Rounds both coordinates to the nearest integer
    pub fn round(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

/// An axis-aligned bounding box.
///
/// After a layout run the graph stores the bounds of all node positions;
/// renderers use them to map layout space onto a canvas. A graph with a
/// single node has degenerate bounds (`min == max`), so a zero
/// [`width`](Self::width) or [`height`](Self::height) is a normal state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from explicit extremes.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Computes the smallest bounds enclosing every point.
    ///
    /// Returns `None` when the iterator is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([
    ///     Point::new(1.0, -2.0),
    ///     Point::new(-3.0, 4.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(bounds.min_x(), -3.0);
    /// assert_eq!(bounds.max_y(), 4.0);
    /// assert!(Bounds::from_points(Vec::new()).is_none());
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, point| {
            let bounds = match acc {
                None => Self::new(point.x, point.y, point.x, point.y),
                Some(bounds) => Self {
                    min_x: bounds.min_x.min(point.x),
                    min_y: bounds.min_y.min(point.y),
                    max_x: bounds.max_x.max(point.x),
                    max_y: bounds.max_y.max(point.y),
                },
            };
            Some(bounds)
        })
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when the point lies inside or on the edge of the bounds
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}
