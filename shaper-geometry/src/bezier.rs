//! Cubic Bezier segment operations.
//!
//! This module provides the `CubicSegment` type used by
//! [`LineSegment::CubicBezier`](crate::segment::LineSegment): de Casteljau
//! evaluation and splitting, quadratic degree elevation, and adaptive
//! flattening into chords.

use crate::math::distance_to_segment;
use crate::types::{MAX_SUBDIVISION_DEPTH, Point, Scalar, clamp_tolerance};

/// Four control points of a cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicSegment {
    /// Create a new cubic segment from four control points.
    #[must_use]
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Degree-elevate the quadratic `p0`, `c`, `p1` into the identical cubic.
    #[must_use]
    pub fn from_quadratic(p0: Point, c: Point, p1: Point) -> Self {
        const TWO_THIRDS: Scalar = 2.0 / 3.0;
        Self {
            p0,
            p1: p0.lerp(c, TWO_THIRDS),
            p2: p1.lerp(c, TWO_THIRDS),
            p3: p1,
        }
    }

    /// Evaluate the point at parameter `t` in [0, 1].
    #[expect(
        clippy::many_single_char_names,
        reason = "standard Bezier math variable names (a, b, c, d, s, t)"
    )]
    #[must_use]
    pub fn eval(&self, t: Scalar) -> Point {
        let s = 1.0 - t;
        let a = s * s * s;
        let b = 3.0 * s * s * t;
        let c = 3.0 * s * t * t;
        let d = t * t * t;
        Point::new(
            d.mul_add(
                self.p3.x,
                a.mul_add(self.p0.x, b.mul_add(self.p1.x, c * self.p2.x)),
            ),
            d.mul_add(
                self.p3.y,
                a.mul_add(self.p0.y, b.mul_add(self.p1.y, c * self.p2.y)),
            ),
        )
    }

    /// Split at parameter `t` using de Casteljau's algorithm.
    ///
    /// Returns `(left_half, right_half)`.
    #[must_use]
    pub fn split(&self, t: Scalar) -> (Self, Self) {
        let ab = self.p0.lerp(self.p1, t);
        let bc = self.p1.lerp(self.p2, t);
        let cd = self.p2.lerp(self.p3, t);
        let abc = ab.lerp(bc, t);
        let bcd = bc.lerp(cd, t);
        let abcd = abc.lerp(bcd, t);

        (
            Self {
                p0: self.p0,
                p1: ab,
                p2: abc,
                p3: abcd,
            },
            Self {
                p0: abcd,
                p1: bcd,
                p2: cd,
                p3: self.p3,
            },
        )
    }

    /// How far the control polygon strays from the chord `p0`–`p3`.
    ///
    /// The curve lies inside the hull of its control points, so the curve
    /// is never farther than this from the chord. A collapsed chord
    /// measures the distance from `p0`.
    #[must_use]
    pub fn flatness(&self) -> Scalar {
        distance_to_segment(self.p1, self.p0, self.p3)
            .max(distance_to_segment(self.p2, self.p0, self.p3))
    }

    /// Flatten into an ordered point list starting at `p0` and ending at `p3`.
    #[must_use]
    pub fn flatten(&self, tolerance: Scalar) -> Vec<Point> {
        let mut out = vec![self.p0];
        self.flatten_into(tolerance, &mut out);
        out
    }

    /// Append the chord end points of this curve to `out` (`p0` excluded).
    ///
    /// Every appended point is a de Casteljau split point and therefore lies
    /// on the curve.
    pub fn flatten_into(&self, tolerance: Scalar, out: &mut Vec<Point>) {
        let tolerance = clamp_tolerance(tolerance);
        subdivide(self, tolerance, 0, out);
    }
}

fn subdivide(seg: &CubicSegment, tolerance: Scalar, depth: u32, out: &mut Vec<Point>) {
    // NaN flatness compares false and falls through to the depth cap.
    if depth >= MAX_SUBDIVISION_DEPTH || seg.flatness() <= tolerance {
        out.push(seg.p3);
        return;
    }
    let (left, right) = seg.split(0.5);
    subdivide(&left, tolerance, depth + 1, out);
    subdivide(&right, tolerance, depth + 1, out);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
