//! Line segment variants that make up a [`Path`](crate::path::Path).

use crate::bezier::CubicSegment;
use crate::types::{Point, Scalar};

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSegment {
    pub start: Point,
    pub end: Point,
}

impl LinearSegment {
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> Scalar {
        self.start.distance(self.end)
    }
}

/// One link of a path chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSegment {
    /// A straight line; flattens to its two endpoints.
    Linear(LinearSegment),
    /// A cubic Bezier curve; flattens by adaptive subdivision.
    CubicBezier(CubicSegment),
}

impl LineSegment {
    /// A straight segment from `start` to `end`.
    #[must_use]
    pub const fn line(start: Point, end: Point) -> Self {
        Self::Linear(LinearSegment::new(start, end))
    }

    /// A cubic Bezier segment.
    #[must_use]
    pub const fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self::CubicBezier(CubicSegment::new(p0, p1, p2, p3))
    }

    /// A quadratic Bezier segment, stored as its exact cubic elevation.
    #[must_use]
    pub fn quadratic(p0: Point, c: Point, p1: Point) -> Self {
        Self::CubicBezier(CubicSegment::from_quadratic(p0, c, p1))
    }

    #[must_use]
    pub const fn start_point(&self) -> Point {
        match self {
            Self::Linear(l) => l.start,
            Self::CubicBezier(c) => c.p0,
        }
    }

    #[must_use]
    pub const fn end_point(&self) -> Point {
        match self {
            Self::Linear(l) => l.end,
            Self::CubicBezier(c) => c.p3,
        }
    }

    /// Flatten into an ordered point list that starts at
    /// [`start_point`](Self::start_point) and ends at
    /// [`end_point`](Self::end_point). Always at least two points.
    #[must_use]
    pub fn flatten(&self, tolerance: Scalar) -> Vec<Point> {
        match self {
            Self::Linear(l) => vec![l.start, l.end],
            Self::CubicBezier(c) => c.flatten(tolerance),
        }
    }

    /// Append the flattened points after the start point to `out`.
    pub(crate) fn flatten_tail_into(&self, tolerance: Scalar, out: &mut Vec<Point>) {
        match self {
            Self::Linear(l) => out.push(l.end),
            Self::CubicBezier(c) => c.flatten_into(tolerance, out),
        }
    }
}

impl From<LinearSegment> for LineSegment {
    fn from(l: LinearSegment) -> Self {
        Self::Linear(l)
    }
}

impl From<CubicSegment> for LineSegment {
    fn from(c: CubicSegment) -> Self {
        Self::CubicBezier(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{Transformable, rotation, translation};
    use crate::types::{EPSILON, Matrix};

    #[test]
    fn linear_flattens_to_endpoints() {
        let seg = LineSegment::line(Point::new(1.0, 2.0), Point::new(-3.0, 7.5));
        for tolerance in [0.0, 0.25, 10.0] {
            assert_eq!(
                seg.flatten(tolerance),
                vec![Point::new(1.0, 2.0), Point::new(-3.0, 7.5)]
            );
        }
    }

    #[test]
    fn linear_length_matches_flattened_chord() {
        let seg = LinearSegment::new(Point::new(1.0, 1.0), Point::new(4.0, 5.0));
        assert!((seg.length() - 5.0).abs() < EPSILON);
        let pts = LineSegment::from(seg).flatten(0.25);
        assert!((pts[0].distance(pts[1]) - seg.length()).abs() < EPSILON);
        assert!(LinearSegment::new(Point::ZERO, Point::ZERO).length().abs() < EPSILON);
    }

    #[test]
    fn endpoints_per_variant() {
        let line = LineSegment::line(Point::ZERO, Point::new(4.0, 0.0));
        assert_eq!(line.start_point(), Point::ZERO);
        assert_eq!(line.end_point(), Point::new(4.0, 0.0));

        let curve = LineSegment::cubic(
            Point::ZERO,
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(3.0, 0.0),
        );
        assert_eq!(curve.end_point(), Point::new(3.0, 0.0));
    }

    #[test]
    fn transform_keeps_variant() {
        let m = translation(5.0, -1.0);
        let line = LineSegment::line(Point::ZERO, Point::new(4.0, 0.0)).transformed(&m);
        assert!(matches!(line, LineSegment::Linear(_)));
        assert_eq!(line.end_point(), Point::new(9.0, -1.0));

        let curve = LineSegment::cubic(
            Point::ZERO,
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        );
        let turned = curve.transformed(&rotation(90.0));
        let LineSegment::CubicBezier(c) = turned else {
            panic!("expected a cubic");
        };
        assert!(c.p3.distance(Point::new(0.0, 1.0)) < EPSILON);
        // The original is untouched.
        assert_eq!(curve.end_point(), Point::new(1.0, 0.0));
    }

    #[test]
    fn identity_transform_is_exact() {
        let curve = LineSegment::quadratic(Point::ZERO, Point::new(5.0, 10.0), Point::new(10.0, 0.0));
        assert_eq!(curve.transformed(&Matrix::IDENTITY), curve);
    }
}
