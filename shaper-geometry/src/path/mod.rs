//! Immutable paths and the geometric queries they answer.
//!
//! A [`Path`] is a non-empty, contiguous chain of [`LineSegment`]s. Its
//! flattened polyline, bounds and length are computed once at
//! construction (see [`engine`]) and every query reads from that result.

mod engine;

use kurbo::BezPath;

use crate::bbox::Rectangle;
use crate::error::GeometryError;
use crate::segment::LineSegment;
use crate::types::{EPSILON, PathOptions, Point, Scalar};

use engine::FlatPath;

// ---------------------------------------------------------------------------
// PointInfo
// ---------------------------------------------------------------------------

/// Result of a nearest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointInfo {
    /// The point the query was made for.
    pub search_point: Point,
    /// Nearest point on the flattened path.
    pub point: Point,
    /// Euclidean distance from `search_point` to `point`.
    pub distance: Scalar,
    /// Index of the path within a [`ComplexPolygon`](crate::shape::ComplexPolygon);
    /// always 0 for a single path.
    pub path_index: usize,
    /// Index of the segment that produced the nearest edge. The implicit
    /// closing edge of a closed path reports the last segment.
    pub segment_index: usize,
    /// Index of the nearest edge in the flattened polyline.
    pub edge_index: usize,
    /// Position of `point` along that edge, in [0, 1].
    pub edge_t: Scalar,
    /// Polyline length from the path start to `point`.
    pub distance_along_path: Scalar,
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// An immutable chain of segments, optionally closed.
///
/// A closed path is closed implicitly: the segment list is kept as given
/// and its polyline ends with an edge back to the start point.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<LineSegment>,
    is_closed: bool,
    options: PathOptions,
    flat: FlatPath,
}

impl Path {
    /// Create an open path with the default tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPath`] for an empty list and
    /// [`GeometryError::Discontinuous`] if a segment does not start where
    /// the previous one ends.
    pub fn new(segments: Vec<LineSegment>) -> Result<Self, GeometryError> {
        Self::with_options(segments, false, PathOptions::default())
    }

    /// Create a closed path with the default tolerance.
    ///
    /// # Errors
    ///
    /// Same as [`Path::new`].
    pub fn closed(segments: Vec<LineSegment>) -> Result<Self, GeometryError> {
        Self::with_options(segments, true, PathOptions::default())
    }

    /// Create a path with explicit closure and flattening options.
    ///
    /// # Errors
    ///
    /// Same as [`Path::new`].
    pub fn with_options(
        segments: Vec<LineSegment>,
        closed: bool,
        options: PathOptions,
    ) -> Result<Self, GeometryError> {
        if segments.is_empty() {
            return Err(GeometryError::EmptyPath);
        }
        for (index, pair) in segments.windows(2).enumerate() {
            let gap = pair[0].end_point().distance(pair[1].start_point());
            if gap > EPSILON {
                return Err(GeometryError::Discontinuous {
                    index: index + 1,
                    gap,
                });
            }
        }
        Ok(Self::from_chain(segments, closed, options))
    }

    /// Build from a chain already known to be non-empty and contiguous.
    pub(crate) fn from_chain(
        segments: Vec<LineSegment>,
        is_closed: bool,
        options: PathOptions,
    ) -> Self {
        debug_assert!(!segments.is_empty(), "a path needs at least one segment");
        let flat = FlatPath::new(&segments, is_closed, options.tolerance);
        Self {
            segments,
            is_closed,
            options,
            flat,
        }
    }

    /// The segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.is_closed
    }

    #[must_use]
    pub const fn options(&self) -> PathOptions {
        self.options
    }

    /// Flattening tolerance this path was built with.
    #[must_use]
    pub const fn tolerance(&self) -> Scalar {
        self.options.tolerance
    }

    /// Start point of the first segment.
    #[must_use]
    pub fn start_point(&self) -> Point {
        self.segments
            .first()
            .map_or(Point::ZERO, LineSegment::start_point)
    }

    /// End point of the last segment.
    #[must_use]
    pub fn end_point(&self) -> Point {
        self.segments
            .last()
            .map_or(Point::ZERO, LineSegment::end_point)
    }

    /// Smallest axis-aligned rectangle containing every flattened point.
    #[must_use]
    pub const fn bounds(&self) -> Rectangle {
        self.flat.bounds()
    }

    /// Length of the flattened polyline.
    ///
    /// This approximates the arc length from below; the error shrinks with
    /// the flattening tolerance.
    #[must_use]
    pub fn length(&self) -> Scalar {
        self.flat.length()
    }

    /// The flattened polyline. Segment seams appear once; a closed path
    /// ends at its start point.
    #[must_use]
    pub fn flatten(&self) -> &[Point] {
        self.flat.points()
    }

    /// Nearest point on the flattened path to `point`.
    #[must_use]
    pub fn distance_from_path(&self, point: Point) -> PointInfo {
        self.flat.nearest(point).unwrap_or(PointInfo {
            search_point: point,
            point: self.start_point(),
            distance: point.distance(self.start_point()),
            path_index: 0,
            segment_index: 0,
            edge_index: 0,
            edge_t: 0.0,
            distance_along_path: 0.0,
        })
    }

    /// Convert to a `kurbo::BezPath` (lines and cubics, closed if closed).
    #[must_use]
    pub fn to_bez_path(&self) -> BezPath {
        let mut bp = BezPath::new();
        bp.move_to(self.start_point());
        for segment in &self.segments {
            match segment {
                LineSegment::Linear(l) => bp.line_to(l.end),
                LineSegment::CubicBezier(c) => bp.curve_to(c.p1, c.p2, c.p3),
            }
        }
        if self.is_closed {
            bp.close_path();
        }
        bp
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
#[expect(clippy::expect_used, reason = "tests may panic")]
mod tests {
    use super::*;
    use crate::transform::{Transformable, rotation, scale_non_uniform, translation};
    use crate::types::Matrix;
    use kurbo::PathEl;

    fn pt(x: Scalar, y: Scalar) -> Point {
        Point::new(x, y)
    }

    fn corner() -> Path {
        Path::new(vec![
            LineSegment::line(pt(0.0, 0.0), pt(10.0, 0.0)),
            LineSegment::line(pt(10.0, 0.0), pt(10.0, 10.0)),
        ])
        .expect("contiguous")
    }

    fn arch() -> Path {
        Path::new(vec![LineSegment::cubic(
            pt(0.0, 0.0),
            pt(0.0, 10.0),
            pt(10.0, 10.0),
            pt(10.0, 0.0),
        )])
        .expect("single segment")
    }

    #[test]
    fn two_lines_bounds_and_length() {
        let path = corner();
        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.bounds(), Rectangle::from_corners(pt(0.0, 0.0), pt(10.0, 10.0)));
        assert_eq!(path.length(), 20.0);
        assert_eq!(path.flatten().len(), 3);
    }

    #[test]
    fn empty_path_rejected() {
        assert_eq!(Path::new(Vec::new()), Err(GeometryError::EmptyPath));
    }

    #[test]
    fn gap_between_segments_rejected() {
        let result = Path::new(vec![
            LineSegment::line(pt(0.0, 0.0), pt(1.0, 0.0)),
            LineSegment::line(pt(1.0, 0.0), pt(2.0, 0.0)),
            LineSegment::line(pt(5.0, 0.0), pt(6.0, 0.0)),
        ]);
        assert!(matches!(
            result,
            Err(GeometryError::Discontinuous { index: 2, .. })
        ));
    }

    #[test]
    fn bezier_bounds_are_tight() {
        let path = arch();
        let b = path.bounds();
        // The control points reach y = 10 but the curve peaks at 7.5.
        assert!(b.max_y <= 7.5 + EPSILON, "max_y: {}", b.max_y);
        assert!(b.max_y > 7.0, "max_y: {}", b.max_y);
        assert_eq!(b.min_x, 0.0);
        assert_eq!(b.max_x, 10.0);
    }

    #[test]
    fn bezier_length_approaches_arc_length() {
        let coarse = Path::with_options(arch().segments().to_vec(), false, PathOptions::with_tolerance(1.0))
            .expect("valid");
        let fine = Path::with_options(arch().segments().to_vec(), false, PathOptions::with_tolerance(0.001))
            .expect("valid");
        // Chords never exceed the arc, so refining only adds length.
        assert!(fine.length() >= coarse.length());
        // The chord (10) and control polygon (30) bound the arc.
        assert!(fine.length() > 10.0 && fine.length() < 30.0);
    }

    #[test]
    fn distance_is_zero_on_vertices() {
        for path in [corner(), arch()] {
            for &p in path.flatten() {
                let info = path.distance_from_path(p);
                assert!(info.distance < EPSILON, "{p:?}: {}", info.distance);
            }
        }
    }

    #[test]
    fn distance_reports_nearest_point() {
        let info = corner().distance_from_path(pt(12.0, 5.0));
        assert!((info.distance - 2.0).abs() < EPSILON);
        assert_eq!(info.segment_index, 1);
        assert!(info.point.distance(pt(10.0, 5.0)) < EPSILON);
        assert!((info.distance_along_path - 15.0).abs() < EPSILON);
        assert_eq!(info.search_point, pt(12.0, 5.0));
    }

    #[test]
    fn closed_path_includes_closing_edge() {
        let path = Path::closed(corner().segments().to_vec()).expect("valid");
        assert!(path.is_closed());
        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.flatten().last(), Some(&pt(0.0, 0.0)));
        let expected = 20.0 + 200.0_f64.sqrt();
        assert!((path.length() - expected).abs() < EPSILON);

        // A point near the diagonal closing edge.
        let info = path.distance_from_path(pt(4.0, 6.0));
        assert!(info.distance < EPSILON + 2.0_f64.sqrt());
        assert_eq!(info.segment_index, 1);
        assert_eq!(info.edge_index, 2);
    }

    #[test]
    fn identity_transform_preserves_points() {
        for path in [corner(), arch()] {
            let moved = path.transformed(&Matrix::IDENTITY);
            assert_eq!(moved.flatten().len(), path.flatten().len());
            for (a, b) in moved.flatten().iter().zip(path.flatten()) {
                assert!(a.distance(*b) < EPSILON);
            }
        }
    }

    #[test]
    fn transformed_bounds_match_transformed_points() {
        let path = corner();
        for m in [translation(3.0, -7.0), scale_non_uniform(2.0, -0.5)] {
            let moved = path.transformed(&m);
            let expected = Rectangle::from_points(
                &path.flatten().iter().map(|p| m.apply(*p)).collect::<Vec<_>>(),
            );
            let got = moved.bounds();
            assert!((got.min_x - expected.min_x).abs() < EPSILON);
            assert!((got.min_y - expected.min_y).abs() < EPSILON);
            assert!((got.max_x - expected.max_x).abs() < EPSILON);
            assert!((got.max_y - expected.max_y).abs() < EPSILON);
        }
    }

    #[test]
    fn transformed_curve_bounds_match_transformed_points() {
        let path = arch();
        let slack = path.tolerance() + EPSILON;
        for m in [translation(3.0, -7.0), rotation(30.0), rotation(90.0)] {
            let moved = path.transformed(&m);
            let expected = Rectangle::from_points(
                &path.flatten().iter().map(|p| m.apply(*p)).collect::<Vec<_>>(),
            );
            let got = moved.bounds();
            assert!((got.min_x - expected.min_x).abs() <= slack);
            assert!((got.min_y - expected.min_y).abs() <= slack);
            assert!((got.max_x - expected.max_x).abs() <= slack);
            assert!((got.max_y - expected.max_y).abs() <= slack);
        }
    }

    #[test]
    fn transform_leaves_original_untouched() {
        let path = arch();
        let before = path.clone();
        let turned = path.transformed(&rotation(45.0));
        assert_eq!(path, before);
        assert_ne!(turned.end_point(), path.end_point());
        assert_eq!(turned.tolerance(), path.tolerance());
        assert_eq!(turned.is_closed(), path.is_closed());
    }

    #[test]
    fn bez_path_export() {
        let path = Path::closed(corner().segments().to_vec()).expect("valid");
        let bp = path.to_bez_path();
        let els = bp.elements();
        assert_eq!(els.len(), 4);
        assert_eq!(els[0], PathEl::MoveTo(pt(0.0, 0.0)));
        assert_eq!(els[2], PathEl::LineTo(pt(10.0, 10.0)));
        assert_eq!(els[3], PathEl::ClosePath);
    }
}
