//! Shapes: the query contract shared by single paths and path collections.

use crate::bbox::Rectangle;
use crate::path::{Path, PointInfo};
use crate::types::{Point, Scalar};

/// Geometric queries answered by every finished shape.
pub trait Shape {
    /// Smallest axis-aligned rectangle containing every flattened point.
    fn bounds(&self) -> Rectangle;

    /// Total flattened length (an approximation of arc length).
    fn length(&self) -> Scalar;

    /// Nearest point on the shape. `None` only when the shape holds no path.
    fn distance(&self, point: Point) -> Option<PointInfo>;
}

impl Shape for Path {
    fn bounds(&self) -> Rectangle {
        Self::bounds(self)
    }

    fn length(&self) -> Scalar {
        Self::length(self)
    }

    fn distance(&self, point: Point) -> Option<PointInfo> {
        Some(self.distance_from_path(point))
    }
}

/// An ordered aggregate of finished paths, one per builder figure.
///
/// No union or hole semantics are applied; each path keeps its own
/// geometry and queries combine the per-path answers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplexPolygon {
    paths: Vec<Path>,
}

impl ComplexPolygon {
    #[must_use]
    pub const fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    /// A collection with no paths.
    #[must_use]
    pub const fn empty() -> Self {
        Self { paths: Vec::new() }
    }

    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[must_use]
    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }

    /// The flattened polyline of every path, in order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&[Point]> {
        self.paths.iter().map(Path::flatten).collect()
    }
}

impl Shape for ComplexPolygon {
    fn bounds(&self) -> Rectangle {
        self.paths.iter().fold(Rectangle::EMPTY, |mut r, p| {
            r.union(&p.bounds());
            r
        })
    }

    fn length(&self) -> Scalar {
        self.paths.iter().map(Path::length).sum()
    }

    /// Ties go to the lowest path index.
    fn distance(&self, point: Point) -> Option<PointInfo> {
        let mut best: Option<PointInfo> = None;
        for (path_index, path) in self.paths.iter().enumerate() {
            let info = path.distance_from_path(point);
            if best.as_ref().is_none_or(|current| info.distance < current.distance) {
                best = Some(PointInfo { path_index, ..info });
            }
        }
        best
    }
}

impl From<Path> for ComplexPolygon {
    fn from(path: Path) -> Self {
        Self::new(vec![path])
    }
}

impl FromIterator<Path> for ComplexPolygon {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ComplexPolygon {
    type Item = Path;
    type IntoIter = std::vec::IntoIter<Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComplexPolygon {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests may panic")]
mod tests {
    use super::*;
    use crate::segment::LineSegment;
    use crate::transform::{Transformable, translation};
    use crate::types::EPSILON;

    fn square(x: Scalar, y: Scalar, size: Scalar) -> Path {
        let a = Point::new(x, y);
        let b = Point::new(x + size, y);
        let c = Point::new(x + size, y + size);
        let d = Point::new(x, y + size);
        Path::closed(vec![
            LineSegment::line(a, b),
            LineSegment::line(b, c),
            LineSegment::line(c, d),
        ])
        .expect("contiguous")
    }

    #[test]
    fn empty_polygon_queries() {
        let shape = ComplexPolygon::empty();
        assert!(shape.is_empty());
        assert!(!shape.bounds().is_valid());
        assert!(shape.length().abs() < EPSILON);
        assert!(shape.distance(Point::ZERO).is_none());
        assert!(shape.flatten().is_empty());
    }

    #[test]
    fn bounds_and_length_combine_paths() {
        let shape: ComplexPolygon = [square(0.0, 0.0, 1.0), square(5.0, 5.0, 2.0)]
            .into_iter()
            .collect();
        assert_eq!(shape.len(), 2);
        assert_eq!(
            shape.bounds(),
            Rectangle::from_corners(Point::ZERO, Point::new(7.0, 7.0))
        );
        assert!((shape.length() - 12.0).abs() < EPSILON);
        assert_eq!(shape.flatten().len(), 2);
    }

    #[test]
    fn distance_reports_owning_path() {
        let shape = ComplexPolygon::new(vec![square(0.0, 0.0, 1.0), square(5.0, 5.0, 2.0)]);
        let info = shape.distance(Point::new(6.0, 4.0)).expect("non-empty");
        assert_eq!(info.path_index, 1);
        assert!((info.distance - 1.0).abs() < EPSILON);
    }

    #[test]
    fn equal_distance_prefers_first_path() {
        let shape = ComplexPolygon::new(vec![square(0.0, 0.0, 1.0), square(2.0, 0.0, 1.0)]);
        let info = shape.distance(Point::new(1.5, 0.5)).expect("non-empty");
        assert_eq!(info.path_index, 0);
    }

    #[test]
    fn into_paths_keeps_order() {
        let first = square(0.0, 0.0, 1.0);
        let second = square(5.0, 5.0, 2.0);
        let shape = ComplexPolygon::new(vec![first.clone(), second.clone()]);
        assert_eq!(shape.into_paths(), vec![first, second]);
    }

    #[test]
    fn transform_moves_every_path() {
        let shape = ComplexPolygon::new(vec![square(0.0, 0.0, 1.0), square(5.0, 5.0, 2.0)]);
        let moved = shape.transformed(&translation(10.0, 0.0));
        assert_eq!(
            moved.bounds(),
            Rectangle::from_corners(Point::new(10.0, 0.0), Point::new(17.0, 7.0))
        );
        assert!(shape.bounds().min_x.abs() < EPSILON);
    }
}
