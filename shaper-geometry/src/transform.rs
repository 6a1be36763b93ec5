//! Affine transform operations.
//!
//! The [`Transformable`] trait provides a uniform interface for applying a
//! [`Matrix`] to every geometry type. Transforming never mutates: each
//! implementation returns a new value. Free functions build the standard
//! matrices.

use crate::bezier::CubicSegment;
use crate::path::Path;
use crate::segment::{LineSegment, LinearSegment};
use crate::shape::ComplexPolygon;
use crate::types::{Matrix, Point, Scalar, Vec2};

// ---------------------------------------------------------------------------
// Transformable trait
// ---------------------------------------------------------------------------

/// A type that can be transformed by an affine [`Matrix`].
pub trait Transformable {
    /// Apply a transform, returning the transformed value.
    #[must_use]
    fn transformed(&self, m: &Matrix) -> Self;
}

// ---------------------------------------------------------------------------
// Trait implementations
// ---------------------------------------------------------------------------

impl Transformable for Point {
    #[inline]
    fn transformed(&self, m: &Matrix) -> Self {
        m.apply(*self)
    }
}

impl Transformable for Vec2 {
    /// Transform a vector (direction). Translation is ignored; only the
    /// linear part of the affine is applied.
    #[inline]
    fn transformed(&self, m: &Matrix) -> Self {
        m.apply_vector(*self)
    }
}

impl Transformable for LinearSegment {
    fn transformed(&self, m: &Matrix) -> Self {
        Self::new(m.apply(self.start), m.apply(self.end))
    }
}

impl Transformable for CubicSegment {
    fn transformed(&self, m: &Matrix) -> Self {
        Self::new(
            m.apply(self.p0),
            m.apply(self.p1),
            m.apply(self.p2),
            m.apply(self.p3),
        )
    }
}

impl Transformable for LineSegment {
    fn transformed(&self, m: &Matrix) -> Self {
        match self {
            Self::Linear(l) => Self::Linear(l.transformed(m)),
            Self::CubicBezier(c) => Self::CubicBezier(c.transformed(m)),
        }
    }
}

impl Transformable for Path {
    /// Transform every segment in order. The closed flag and the
    /// flattening tolerance carry over.
    fn transformed(&self, m: &Matrix) -> Self {
        let segments = self.segments().iter().map(|s| s.transformed(m)).collect();
        // Equal end/start points map to equal points, so the chain stays
        // contiguous.
        Self::from_chain(segments, self.is_closed(), self.options())
    }
}

impl Transformable for ComplexPolygon {
    fn transformed(&self, m: &Matrix) -> Self {
        Self::new(self.paths().iter().map(|p| p.transformed(m)).collect())
    }
}

impl Transformable for Matrix {
    /// Compose: `self` applied first, then `m`.
    #[inline]
    fn transformed(&self, m: &Matrix) -> Self {
        self.then(m)
    }
}

// ---------------------------------------------------------------------------
// Standard transform constructors
// ---------------------------------------------------------------------------

/// Create a translation transform.
#[must_use]
pub const fn translation(dx: Scalar, dy: Scalar) -> Matrix {
    Matrix {
        tx: dx,
        ty: dy,
        ..Matrix::IDENTITY
    }
}

/// Create a rotation transform (angle in degrees, counter-clockwise in a
/// Y-up frame).
#[must_use]
pub fn rotation(degrees: Scalar) -> Matrix {
    let rad = degrees.to_radians();
    let c = rad.cos();
    let s = rad.sin();
    Matrix {
        tx: 0.0,
        ty: 0.0,
        txx: c,
        txy: -s,
        tyx: s,
        tyy: c,
    }
}

/// Create a uniform scaling transform.
#[must_use]
pub const fn scale(factor: Scalar) -> Matrix {
    scale_non_uniform(factor, factor)
}

/// Create a scaling transform with separate x and y factors.
#[must_use]
pub const fn scale_non_uniform(sx: Scalar, sy: Scalar) -> Matrix {
    Matrix {
        txx: sx,
        tyy: sy,
        ..Matrix::IDENTITY
    }
}

/// Create a horizontal shear transform: x' = x + factor * y.
#[must_use]
pub const fn skew(factor: Scalar) -> Matrix {
    Matrix {
        txy: factor,
        ..Matrix::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EPSILON;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < EPSILON
    }

    #[test]
    fn translate_point() {
        let p = Point::new(1.0, 2.0).transformed(&translation(3.0, -4.0));
        assert!(close(p, Point::new(4.0, -2.0)));
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = Point::new(1.0, 0.0).transformed(&rotation(90.0));
        assert!(close(p, Point::new(0.0, 1.0)));
    }

    #[test]
    fn scale_and_skew() {
        let p = Point::new(2.0, 3.0);
        assert!(close(p.transformed(&scale(2.0)), Point::new(4.0, 6.0)));
        assert!(close(
            p.transformed(&scale_non_uniform(1.0, -1.0)),
            Point::new(2.0, -3.0)
        ));
        assert!(close(p.transformed(&skew(1.0)), Point::new(5.0, 3.0)));
    }

    #[test]
    fn vector_ignores_translation() {
        let v = Vec2::new(1.0, 0.0).transformed(&translation(10.0, 10.0));
        assert!((v.x - 1.0).abs() < EPSILON);
        assert!(v.y.abs() < EPSILON);
    }

    #[test]
    fn matrix_composition_order() {
        let m = scale(2.0).transformed(&translation(1.0, 0.0));
        assert!(close(m.apply(Point::new(1.0, 1.0)), Point::new(3.0, 2.0)));
    }
}
