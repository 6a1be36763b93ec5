//! Small geometric helpers shared by the flattener and the path engine.

use crate::types::{EPSILON, Point, Scalar};

/// Closest point to `p` on the segment `a`–`b`.
///
/// Returns the point and its parameter `t` in [0, 1] along the segment.
/// A segment shorter than [`EPSILON`] is treated as the single point `a`.
#[must_use]
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> (Point, Scalar) {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 < EPSILON * EPSILON {
        return (a, 0.0);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (a.lerp(b, t), t)
}

/// Distance from `p` to the segment `a`–`b`.
#[inline]
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> Scalar {
    let (q, _) = closest_point_on_segment(p, a, b);
    p.distance(q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_inside_segment() {
        let (q, t) =
            closest_point_on_segment(Point::new(5.0, 3.0), Point::ZERO, Point::new(10.0, 0.0));
        assert!((q.x - 5.0).abs() < EPSILON);
        assert!(q.y.abs() < EPSILON);
        assert!((t - 0.5).abs() < EPSILON);
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let a = Point::ZERO;
        let b = Point::new(10.0, 0.0);
        let (q, t) = closest_point_on_segment(Point::new(-4.0, 3.0), a, b);
        assert_eq!(q, a);
        assert!(t.abs() < EPSILON);
        let d = distance_to_segment(Point::new(13.0, 4.0), a, b);
        assert!((d - 5.0).abs() < EPSILON);
    }

    #[test]
    fn zero_length_segment_uses_endpoint() {
        let a = Point::new(2.0, 2.0);
        let d = distance_to_segment(Point::new(5.0, 6.0), a, a);
        assert!((d - 5.0).abs() < EPSILON);
        assert!(!d.is_nan());
    }
}
