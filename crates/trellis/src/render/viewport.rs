//! Mapping from layout space onto the drawing canvas.

use trellis_core::geometry::{Bounds, Point};

/// Canvas dimensions and the margin kept free around the drawing.
///
/// `radius` is the largest extent of a node; node centres are placed at
/// least that far from the canvas edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    radius: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            radius: 40.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, radius: f64) -> Self {
        Self {
            width,
            height,
            radius,
        }
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    pub fn radius(self) -> f64 {
        self.radius
    }

    /// Computes the projection that stretches `bounds` over the canvas.
    ///
    /// Each axis is scaled by `(extent - 2 * radius) / (max - min)`. When
    /// the layout has no spread along an axis (a single node, or nodes on a
    /// line) the scale is zero and every node is centred on that axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis::geometry::{Bounds, Point};
    /// use trellis::render::Viewport;
    ///
    /// let viewport = Viewport::default();
    /// let projection = viewport.fit(Bounds::new(-1.0, 0.0, 1.0, 0.0));
    ///
    /// assert_eq!(projection.translate(Point::new(-1.0, 0.0)), Point::new(40.0, 200.0));
    /// assert_eq!(projection.translate(Point::new(1.0, 0.0)), Point::new(360.0, 200.0));
    /// ```
    pub fn fit(self, bounds: Bounds) -> Projection {
        Projection {
            x: AxisMap::new(bounds.min_x(), bounds.max_x(), self.width, self.radius),
            y: AxisMap::new(bounds.min_y(), bounds.max_y(), self.height, self.radius),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisMap {
    min: f64,
    factor: f64,
    offset: f64,
}

impl AxisMap {
    fn new(min: f64, max: f64, extent: f64, radius: f64) -> Self {
        let spread = max - min;
        if spread > 0.0 && spread.is_finite() {
            Self {
                min,
                factor: (extent - 2.0 * radius) / spread,
                offset: radius,
            }
        } else {
            Self {
                min,
                factor: 0.0,
                offset: extent / 2.0,
            }
        }
    }

    fn apply(self, value: f64) -> f64 {
        ((value - self.min) * self.factor + self.offset).round()
    }
}

/// A fitted mapping from layout coordinates to canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    x: AxisMap,
    y: AxisMap,
}

impl Projection {
    /// Maps a layout-space point to whole canvas pixels.
    pub fn translate(self, point: Point) -> Point {
        Point::new(self.x.apply(point.x()), self.y.apply(point.y()))
    }

    /// Horizontal scale factor; zero when the layout has no width.
    pub fn factor_x(self) -> f64 {
        self.x.factor
    }

    /// Vertical scale factor; zero when the layout has no height.
    pub fn factor_y(self) -> f64 {
        self.y.factor
    }
}

/// Offsets `point` by `length` in the direction of `angle` (radians).
pub fn rotate(point: Point, length: f64, angle: f64) -> Point {
    Point::new(
        point.x() + length * angle.cos(),
        point.y() + length * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_fit_maps_bounds_to_inner_canvas() {
        let projection = Viewport::default().fit(Bounds::new(0.0, 0.0, 4.0, 2.0));

        assert_eq!(projection.factor_x(), 80.0);
        assert_eq!(projection.factor_y(), 160.0);
        assert_eq!(projection.translate(Point::new(0.0, 0.0)), Point::new(40.0, 40.0));
        assert_eq!(projection.translate(Point::new(4.0, 2.0)), Point::new(360.0, 360.0));
        assert_eq!(projection.translate(Point::new(2.0, 1.0)), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_translate_rounds() {
        let projection = Viewport::default().fit(Bounds::new(0.0, 0.0, 3.0, 3.0));
        let point = projection.translate(Point::new(1.0, 2.0));

        assert_eq!(point, Point::new(147.0, 253.0));
    }

    #[test]
    fn test_single_node_is_centred() {
        let projection = Viewport::default().fit(Bounds::new(1.5, -2.0, 1.5, -2.0));

        assert_eq!(projection.factor_x(), 0.0);
        assert_eq!(projection.factor_y(), 0.0);
        let point = projection.translate(Point::new(1.5, -2.0));
        assert!(point.is_finite());
        assert_eq!(point, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_collinear_nodes_centre_flat_axis() {
        let viewport = Viewport::new(600.0, 300.0, 40.0);
        let projection = viewport.fit(Bounds::new(0.0, 5.0, 10.0, 5.0));

        assert_eq!(projection.translate(Point::new(0.0, 5.0)), Point::new(40.0, 150.0));
        assert_eq!(projection.translate(Point::new(10.0, 5.0)), Point::new(560.0, 150.0));
    }

    #[test]
    fn test_rotate() {
        let origin = Point::new(10.0, 10.0);

        let right = rotate(origin, 5.0, 0.0);
        assert!(approx_eq!(f64, right.x(), 15.0, ulps = 4));
        assert!(approx_eq!(f64, right.y(), 10.0, ulps = 4));

        let down = rotate(origin, 5.0, FRAC_PI_2);
        assert!(approx_eq!(f64, down.x(), 10.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, down.y(), 15.0, ulps = 4));

        let left = rotate(origin, 5.0, PI);
        assert!(approx_eq!(f64, left.x(), 5.0, ulps = 4));
        assert!(approx_eq!(f64, left.y(), 10.0, epsilon = 1e-12));
    }
}
