//! Axis-aligned bounding rectangles.

use crate::types::{Point, Scalar};

// ---------------------------------------------------------------------------
// Rectangle type
// ---------------------------------------------------------------------------

/// Axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub min_x: Scalar,
    pub min_y: Scalar,
    pub max_x: Scalar,
    pub max_y: Scalar,
}

impl Rectangle {
    /// An empty (inverted) rectangle; including any point makes it valid.
    pub const EMPTY: Self = Self {
        min_x: Scalar::INFINITY,
        min_y: Scalar::INFINITY,
        max_x: Scalar::NEG_INFINITY,
        max_y: Scalar::NEG_INFINITY,
    };

    /// Rectangle spanning two corners given in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Smallest rectangle containing every point. Empty for no points.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        points.into_iter().fold(Self::EMPTY, |mut r, p| {
            r.include_point(*p);
            r
        })
    }

    /// Check if this rectangle is valid (non-empty).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> Scalar {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> Scalar {
        if self.is_valid() {
            self.max_y - self.min_y
        } else {
            0.0
        }
    }

    /// Corner with the smallest coordinates.
    #[must_use]
    pub const fn min(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Corner with the largest coordinates.
    #[must_use]
    pub const fn max(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        self.min().midpoint(self.max())
    }

    /// Whether `p` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Expand to include a point.
    pub fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Expand to include another rectangle.
    pub fn union(&mut self, other: &Self) {
        if other.is_valid() {
            self.min_x = self.min_x.min(other.min_x);
            self.min_y = self.min_y.min(other.min_y);
            self.max_x = self.max_x.max(other.max_x);
            self.max_y = self.max_y.max(other.max_y);
        }
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<Rectangle> for kurbo::Rect {
    fn from(r: Rectangle) -> Self {
        Self::new(r.min_x, r.min_y, r.max_x, r.max_y)
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

    #[test]
    fn test_rectangle_empty() {
        let r = Rectangle::EMPTY;
        assert!(!r.is_valid());
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
        assert_eq!(Rectangle::from_points(&[]), Rectangle::EMPTY);
    }

    #[test]
    fn test_rectangle_include_point() {
        let mut r = Rectangle::EMPTY;
        r.include_point(Point::new(1.0, 2.0));
        r.include_point(Point::new(5.0, 8.0));
        assert!(r.is_valid());
        assert!((r.min_x - 1.0).abs() < EPSILON);
        assert!((r.min_y - 2.0).abs() < EPSILON);
        assert!((r.max_x - 5.0).abs() < EPSILON);
        assert!((r.max_y - 8.0).abs() < EPSILON);
        assert_eq!(r.center(), Point::new(3.0, 5.0));
    }

    #[test]
    fn from_points_is_order_independent() {
        let pts = [
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(0.5, 0.5),
        ];
        let mut reversed = pts;
        reversed.reverse();
        assert_eq!(Rectangle::from_points(&pts), Rectangle::from_points(&reversed));
        assert_eq!(
            Rectangle::from_points(&pts),
            Rectangle::from_corners(Point::new(3.0, 4.0), Point::new(-2.0, -1.0))
        );
    }

    #[test]
    fn test_rectangle_union() {
        let mut r1 = Rectangle::from_corners(Point::ZERO, Point::new(5.0, 5.0));
        let r2 = Rectangle::from_corners(Point::new(3.0, 3.0), Point::new(10.0, 10.0));
        r1.union(&r2);
        assert!((r1.min_x).abs() < EPSILON);
        assert!((r1.max_x - 10.0).abs() < EPSILON);

        let before = r1;
        r1.union(&Rectangle::EMPTY);
        assert_eq!(r1, before);
    }

    #[test]
    fn converts_to_kurbo_rect() {
        let r = Rectangle::from_corners(Point::new(-1.0, 2.0), Point::new(3.0, 7.0));
        let k = kurbo::Rect::from(r);
        assert_eq!((k.x0, k.y0, k.x1, k.y1), (-1.0, 2.0, 3.0, 7.0));
        assert_eq!(k.width(), r.width());
        assert_eq!(k.height(), r.height());
    }

    #[test]
    fn contains_border() {
        let r = Rectangle::from_corners(Point::ZERO, Point::new(2.0, 2.0));
        assert!(r.contains(Point::new(2.0, 1.0)));
        assert!(!r.contains(Point::new(2.1, 1.0)));
    }
}
