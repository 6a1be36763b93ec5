//! Cursor-based path construction.
//!
//! [`PathBuilder`] keeps a current point and an ambient transform. Drawing
//! calls append segments to the working figure; `move_to`,
//! `start_figure` and `close_figure` finish it. [`PathBuilder::build`]
//! turns every finished figure into a [`Path`] and hands them over as one
//! [`ComplexPolygon`].

use log::{debug, trace};

use crate::path::Path;
use crate::segment::LineSegment;
use crate::shape::ComplexPolygon;
use crate::transform::Transformable;
use crate::types::{EPSILON, Matrix, PathOptions, Point};

/// A finished run of connected segments waiting for `build`.
#[derive(Debug, Clone)]
struct Figure {
    segments: Vec<LineSegment>,
    closed: bool,
}

/// Declarative builder for paths and complex polygons.
///
/// The builder is *idle* while the working figure is empty and
/// *accumulating* otherwise. Points passed to drawing calls go through the
/// ambient transform active at the time of the call.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    default_transform: Matrix,
    current_transform: Matrix,
    current_point: Point,
    segments: Vec<LineSegment>,
    figures: Vec<Figure>,
    options: PathOptions,
}

impl PathBuilder {
    /// A builder with the identity transform and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transform(Matrix::IDENTITY)
    }

    /// A builder whose default (and initial) transform is `transform`.
    #[must_use]
    pub fn with_transform(transform: Matrix) -> Self {
        Self {
            default_transform: transform,
            current_transform: transform,
            current_point: Point::ZERO,
            segments: Vec::new(),
            figures: Vec::new(),
            options: PathOptions::default(),
        }
    }

    /// Set the flattening options used for every built path.
    #[must_use]
    pub fn with_options(mut self, options: PathOptions) -> Self {
        self.options = options;
        self
    }

    /// Cursor position, already transformed.
    #[must_use]
    pub const fn current_point(&self) -> Point {
        self.current_point
    }

    #[must_use]
    pub const fn current_transform(&self) -> Matrix {
        self.current_transform
    }

    /// Whether nothing has been drawn since the last `build` or `clear`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.figures.is_empty()
    }

    /// Replace the ambient transform. Segments already added keep the
    /// transform they were added with.
    pub const fn set_transform(&mut self, transform: Matrix) {
        self.current_transform = transform;
    }

    /// Restore the default transform.
    pub const fn reset_transform(&mut self) {
        self.current_transform = self.default_transform;
    }

    /// Finish the working figure and move the cursor to `point`.
    ///
    /// On an idle builder this only moves the cursor.
    pub fn move_to(&mut self, point: Point) {
        self.finish_figure(false);
        self.current_point = point.transformed(&self.current_transform);
    }

    /// Start a new figure at the current point.
    pub fn start_figure(&mut self) {
        self.finish_figure(false);
    }

    /// Mark the working figure closed and finish it.
    ///
    /// The cursor returns to the figure's start point. Does nothing on an
    /// idle builder.
    pub fn close_figure(&mut self) {
        if let Some(first) = self.segments.first() {
            let start = first.start_point();
            self.finish_figure(true);
            self.current_point = start;
        }
    }

    /// Line from the current point to `point`.
    pub fn add_line(&mut self, point: Point) {
        let end = point.transformed(&self.current_transform);
        self.push(LineSegment::line(self.current_point, end));
    }

    /// Lines through each point in order.
    pub fn add_lines(&mut self, points: impl IntoIterator<Item = Point>) {
        for p in points {
            self.add_line(p);
        }
    }

    /// Cubic Bezier from the current point through `c1` and `c2` to `end`.
    pub fn add_bezier(&mut self, c1: Point, c2: Point, end: Point) {
        let m = self.current_transform;
        self.push(LineSegment::cubic(
            self.current_point,
            c1.transformed(&m),
            c2.transformed(&m),
            end.transformed(&m),
        ));
    }

    /// Quadratic Bezier from the current point through `c` to `end`.
    pub fn add_quadratic_bezier(&mut self, c: Point, end: Point) {
        let m = self.current_transform;
        self.push(LineSegment::quadratic(
            self.current_point,
            c.transformed(&m),
            end.transformed(&m),
        ));
    }

    /// Splice a prebuilt segment, transformed by the ambient transform.
    ///
    /// If the working figure already has segments and the transformed
    /// segment starts elsewhere, a line from the current point bridges the
    /// gap so the figure stays contiguous.
    pub fn add_segment(&mut self, segment: LineSegment) {
        let segment = segment.transformed(&self.current_transform);
        let start = segment.start_point();
        if !self.segments.is_empty() && start.distance(self.current_point) > EPSILON {
            self.push(LineSegment::line(self.current_point, start));
        }
        self.push(segment);
    }

    /// Finish all figures and return them as one polygon.
    ///
    /// A non-empty working figure becomes the last open path. The finished
    /// figures are drained, so a second `build` without new input returns
    /// an empty polygon; the cursor and transform are kept.
    pub fn build(&mut self) -> ComplexPolygon {
        self.finish_figure(false);
        let options = self.options;
        let shape: ComplexPolygon = self
            .figures
            .drain(..)
            .map(|f| Path::from_chain(f.segments, f.closed, options))
            .collect();
        debug!("built {} path(s)", shape.len());
        shape
    }

    /// Drop all figures, move the cursor to the origin and restore the
    /// default transform.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.figures.clear();
        self.current_point = Point::ZERO;
        self.reset_transform();
    }

    fn push(&mut self, segment: LineSegment) {
        self.current_point = segment.end_point();
        self.segments.push(segment);
    }

    fn finish_figure(&mut self, closed: bool) {
        if self.segments.is_empty() {
            return;
        }
        let segments = std::mem::take(&mut self.segments);
        trace!(
            "figure {} finished: {} segment(s), closed: {closed}",
            self.figures.len(),
            segments.len()
        );
        self.figures.push(Figure { segments, closed });
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
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
    use crate::bbox::Rectangle;
    use crate::shape::Shape;
    use crate::transform::{scale, translation};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn empty_builder_builds_nothing() {
        let mut b = PathBuilder::new();
        assert!(b.is_empty());
        assert!(b.build().is_empty());
    }

    #[test]
    fn move_to_on_idle_builder_adds_no_figure() {
        let mut b = PathBuilder::new();
        b.move_to(pt(3.0, 4.0));
        b.move_to(pt(5.0, 6.0));
        assert!(b.is_empty());
        assert_eq!(b.current_point(), pt(5.0, 6.0));
        assert!(b.build().is_empty());
    }

    #[test]
    fn two_lines_make_one_path() {
        let mut b = PathBuilder::new();
        b.add_line(pt(10.0, 0.0));
        b.add_line(pt(10.0, 10.0));
        let shape = b.build();
        assert_eq!(shape.len(), 1);
        let path = &shape.paths()[0];
        assert_eq!(path.segments().len(), 2);
        assert!(path
            .segments()
            .iter()
            .all(|s| matches!(s, LineSegment::Linear(_))));
        assert_eq!(path.bounds(), Rectangle::from_corners(pt(0.0, 0.0), pt(10.0, 10.0)));
        assert_eq!(path.length(), 20.0);
        assert!(!path.is_closed());
    }

    #[test]
    fn bezier_after_move() {
        let mut b = PathBuilder::new();
        b.move_to(pt(0.0, 0.0));
        b.add_bezier(pt(0.0, 10.0), pt(10.0, 10.0), pt(10.0, 0.0));
        let shape = b.build();
        assert_eq!(shape.len(), 1);
        let path = &shape.paths()[0];
        assert_eq!(path.segments().len(), 1);
        assert!(matches!(path.segments()[0], LineSegment::CubicBezier(_)));
        let pts = path.flatten();
        assert!(pts.len() > 2);
        assert_eq!(pts.first(), Some(&pt(0.0, 0.0)));
        assert_eq!(pts.last(), Some(&pt(10.0, 0.0)));
    }

    #[test]
    fn move_to_splits_figures() {
        let mut b = PathBuilder::new();
        b.add_lines([pt(1.0, 0.0), pt(1.0, 1.0)]);
        b.move_to(pt(5.0, 5.0));
        b.add_line(pt(6.0, 5.0));
        let shape = b.build();
        assert_eq!(shape.len(), 2);
        assert_eq!(shape.paths()[0].segments().len(), 2);
        assert_eq!(shape.paths()[1].start_point(), pt(5.0, 5.0));
    }

    #[test]
    fn build_drains_figures() {
        let mut b = PathBuilder::new();
        b.add_line(pt(1.0, 0.0));
        assert_eq!(b.build().len(), 1);
        assert!(b.is_empty());
        assert!(b.build().is_empty());
        // The cursor survives the build.
        b.add_line(pt(2.0, 0.0));
        assert_eq!(b.build().paths()[0].start_point(), pt(1.0, 0.0));
    }

    #[test]
    fn transform_applies_to_later_calls_only() {
        let mut b = PathBuilder::new();
        b.add_line(pt(1.0, 0.0));
        b.set_transform(translation(10.0, 0.0));
        b.add_line(pt(2.0, 0.0));
        b.reset_transform();
        b.add_line(pt(3.0, 0.0));
        let shape = b.build();
        let segs = shape.paths()[0].segments();
        assert_eq!(segs[0].end_point(), pt(1.0, 0.0));
        assert_eq!(segs[1].end_point(), pt(12.0, 0.0));
        assert_eq!(segs[2].start_point(), pt(12.0, 0.0));
        assert_eq!(segs[2].end_point(), pt(3.0, 0.0));
    }

    #[test]
    fn default_transform_is_restored_by_reset() {
        let mut b = PathBuilder::with_transform(scale(2.0));
        b.set_transform(Matrix::IDENTITY);
        b.reset_transform();
        b.move_to(pt(1.0, 1.0));
        assert_eq!(b.current_point(), pt(2.0, 2.0));
        assert_eq!(b.current_transform(), scale(2.0));
    }

    #[test]
    fn close_figure_marks_path_closed() {
        let mut b = PathBuilder::new();
        b.move_to(pt(0.0, 0.0));
        b.add_line(pt(4.0, 0.0));
        b.add_line(pt(4.0, 3.0));
        b.close_figure();
        assert_eq!(b.current_point(), pt(0.0, 0.0));
        b.close_figure();
        let shape = b.build();
        assert_eq!(shape.len(), 1);
        let path = &shape.paths()[0];
        assert!(path.is_closed());
        assert_eq!(path.segments().len(), 2);
        assert!((path.length() - 12.0).abs() < EPSILON);
    }

    #[test]
    fn start_figure_keeps_cursor() {
        let mut b = PathBuilder::new();
        b.add_line(pt(1.0, 0.0));
        b.start_figure();
        assert_eq!(b.current_point(), pt(1.0, 0.0));
        b.add_line(pt(1.0, 1.0));
        let shape = b.build();
        assert_eq!(shape.len(), 2);
        assert_eq!(shape.paths()[1].start_point(), pt(1.0, 0.0));
    }

    #[test]
    fn add_segment_transforms_and_bridges() {
        let mut b = PathBuilder::new();
        b.add_segment(LineSegment::line(pt(2.0, 0.0), pt(3.0, 0.0)));
        assert_eq!(b.current_point(), pt(3.0, 0.0));
        b.set_transform(translation(0.0, 1.0));
        b.add_segment(LineSegment::line(pt(3.0, 0.0), pt(4.0, 0.0)));
        let shape = b.build();
        let segs = shape.paths()[0].segments();
        // The first segment starts the figure where it lies.
        assert_eq!(segs[0].start_point(), pt(2.0, 0.0));
        // (3, 0) moved to (3, 1), so a bridge line was inserted.
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1], LineSegment::line(pt(3.0, 0.0), pt(3.0, 1.0)));
        assert_eq!(segs[2].end_point(), pt(4.0, 1.0));
    }

    #[test]
    fn quadratic_segments_are_built() {
        let mut b = PathBuilder::new();
        b.add_quadratic_bezier(pt(5.0, 10.0), pt(10.0, 0.0));
        let shape = b.build();
        let bounds = shape.bounds();
        // The quadratic peaks at y = 5.
        assert!((bounds.max_y - 5.0).abs() < EPSILON, "max_y: {}", bounds.max_y);
    }

    #[test]
    fn clear_resets_everything() {
        let mut b = PathBuilder::with_transform(translation(1.0, 1.0));
        b.set_transform(scale(3.0));
        b.add_line(pt(1.0, 1.0));
        b.move_to(pt(2.0, 2.0));
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.current_point(), Point::ZERO);
        assert_eq!(b.current_transform(), translation(1.0, 1.0));
    }

    #[test]
    fn options_reach_built_paths() {
        let mut b = PathBuilder::new().with_options(PathOptions::with_tolerance(2.0));
        b.add_line(pt(1.0, 0.0));
        assert_eq!(b.build().paths()[0].tolerance(), 2.0);
    }
}
