//! Flattened representation of a path and the queries answered from it.
//!
//! A [`FlatPath`] is computed once when a [`Path`](super::Path) is built:
//!
//! 1. Every segment is flattened in order. The first point of each segment
//!    after the first is dropped, so each seam contributes its shared
//!    point exactly once.
//! 2. A closed path whose last point differs from its first gains one more
//!    point: the implicit closing edge.
//! 3. Bounds and cumulative edge lengths are taken from the point list.
//!
//! Nearest-point queries scan the polyline edges left to right.

use crate::bbox::Rectangle;
use crate::math::closest_point_on_segment;
use crate::segment::LineSegment;
use crate::types::{Point, Scalar};

use super::PointInfo;

/// Flattened points plus the per-edge bookkeeping needed by queries.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FlatPath {
    /// Polyline vertices in path order.
    points: Vec<Point>,
    /// `owner[k]` is the segment that produced edge `points[k]..points[k + 1]`.
    owner: Vec<usize>,
    /// `along[k]` is the polyline length from the start to `points[k]`.
    along: Vec<Scalar>,
    bounds: Rectangle,
}

impl FlatPath {
    /// Flatten `segments`. An empty slice gives an empty polyline.
    pub(crate) fn new(segments: &[LineSegment], closed: bool, tolerance: Scalar) -> Self {
        let Some(first) = segments.first() else {
            return Self::empty();
        };

        let mut points = vec![first.start_point()];
        let mut owner = Vec::new();
        for (index, segment) in segments.iter().enumerate() {
            let before = points.len();
            segment.flatten_tail_into(tolerance, &mut points);
            owner.resize(owner.len() + (points.len() - before), index);
        }

        if closed && points.last() != Some(&first.start_point()) {
            // The closing edge is credited to the last segment.
            points.push(first.start_point());
            owner.push(segments.len() - 1);
        }

        let mut along = Vec::with_capacity(points.len());
        let mut total = 0.0;
        along.push(total);
        for edge in points.windows(2) {
            total += edge[0].distance(edge[1]);
            along.push(total);
        }

        let bounds = Rectangle::from_points(&points);
        Self {
            points,
            owner,
            along,
            bounds,
        }
    }

    fn empty() -> Self {
        Self {
            points: Vec::new(),
            owner: Vec::new(),
            along: vec![0.0],
            bounds: Rectangle::EMPTY,
        }
    }

    pub(crate) fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) const fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Sum of the edge lengths.
    pub(crate) fn length(&self) -> Scalar {
        self.along.last().copied().unwrap_or(0.0)
    }

    /// Nearest point on the polyline to `query`.
    ///
    /// Only a strictly smaller distance replaces the current best, so ties
    /// go to the earliest edge and therefore the lowest segment index.
    pub(crate) fn nearest(&self, query: Point) -> Option<PointInfo> {
        let mut best: Option<PointInfo> = None;
        for (k, edge) in self.points.windows(2).enumerate() {
            let (a, b) = (edge[0], edge[1]);
            // Zero-length edges project onto their start point.
            let (point, t) = closest_point_on_segment(query, a, b);
            let distance = query.distance(point);
            if best.as_ref().is_some_and(|current| distance >= current.distance) {
                continue;
            }
            best = Some(PointInfo {
                search_point: query,
                point,
                distance,
                path_index: 0,
                segment_index: self.owner[k],
                edge_index: k,
                edge_t: t,
                distance_along_path: a.distance(point) + self.along[k],
            });
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "exact float comparisons are intentional in tests"
)]
mod tests {
    use super::*;
    use crate::types::EPSILON;

    fn line(a: (Scalar, Scalar), b: (Scalar, Scalar)) -> LineSegment {
        LineSegment::line(Point::new(a.0, a.1), Point::new(b.0, b.1))
    }

    #[test]
    fn seams_are_merged_once() {
        let flat = FlatPath::new(
            &[line((0.0, 0.0), (1.0, 0.0)), line((1.0, 0.0), (1.0, 1.0))],
            false,
            0.25,
        );
        assert_eq!(
            flat.points(),
            &[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)]
        );
        assert_eq!(flat.owner, vec![0, 1]);
        assert_eq!(flat.length(), 2.0);
    }

    #[test]
    fn closed_path_gains_closing_edge() {
        let flat = FlatPath::new(
            &[line((0.0, 0.0), (3.0, 0.0)), line((3.0, 0.0), (3.0, 4.0))],
            true,
            0.25,
        );
        assert_eq!(flat.points().len(), 4);
        assert_eq!(flat.points()[3], Point::ZERO);
        assert!((flat.length() - 12.0).abs() < EPSILON);
        assert_eq!(flat.owner, vec![0, 1, 1]);
    }

    #[test]
    fn already_closed_chain_is_not_doubled() {
        let flat = FlatPath::new(
            &[
                line((0.0, 0.0), (1.0, 0.0)),
                line((1.0, 0.0), (0.0, 1.0)),
                line((0.0, 1.0), (0.0, 0.0)),
            ],
            true,
            0.25,
        );
        assert_eq!(flat.points().len(), 4);
    }

    #[test]
    fn nearest_prefers_first_of_equal_edges() {
        // (1, 1) is exactly 1 away from both segments.
        let flat = FlatPath::new(
            &[line((0.0, 0.0), (2.0, 0.0)), line((2.0, 0.0), (2.0, 2.0))],
            false,
            0.25,
        );
        let Some(info) = flat.nearest(Point::new(1.0, 1.0)) else {
            panic!("non-empty path must have a nearest point");
        };
        assert_eq!(info.segment_index, 0);
        assert!((info.distance - 1.0).abs() < EPSILON);
        assert!(info.point.distance(Point::new(1.0, 0.0)) < EPSILON);
        assert!((info.distance_along_path - 1.0).abs() < EPSILON);
    }

    #[test]
    fn degenerate_edges_measure_to_endpoint() {
        let flat = FlatPath::new(&[line((2.0, 2.0), (2.0, 2.0))], false, 0.25);
        let Some(info) = flat.nearest(Point::new(5.0, 6.0)) else {
            panic!("expected a nearest point");
        };
        assert!((info.distance - 5.0).abs() < EPSILON);
        assert_eq!(info.point, Point::new(2.0, 2.0));
    }

    #[test]
    fn empty_input_has_no_nearest_point() {
        let flat = FlatPath::new(&[], false, 0.25);
        assert!(flat.nearest(Point::ZERO).is_none());
        assert_eq!(flat.length(), 0.0);
        assert!(!flat.bounds().is_valid());
    }
}
