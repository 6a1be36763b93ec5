//! Core types shared across the geometry crate.
//!
//! Points and vectors are `kurbo`'s; the affine [`Matrix`] and the
//! flattening configuration ([`PathOptions`]) are defined here.

use kurbo::Affine;
pub use kurbo::{Point, Vec2};

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Convenience alias for the coordinate type.
pub type Scalar = f64;

/// Tolerance for floating-point comparisons.
pub const EPSILON: Scalar = 1.0 / 65536.0;

/// Flattening tolerance used when none is configured.
pub const DEFAULT_TOLERANCE: Scalar = 0.25;

/// Smallest tolerance the flattener accepts; lower values are clamped.
pub const MIN_TOLERANCE: Scalar = 1e-6;

/// Recursion cap for cubic subdivision (at most `2^16` chords per curve).
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

// ---------------------------------------------------------------------------
// PathOptions
// ---------------------------------------------------------------------------

/// Flattening configuration carried by every [`Path`](crate::path::Path).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOptions {
    /// Maximum distance between a curve and its flattened chords.
    pub tolerance: Scalar,
}

impl PathOptions {
    /// Options with the given tolerance. Non-finite or too small values
    /// are clamped to [`MIN_TOLERANCE`].
    #[must_use]
    pub fn with_tolerance(tolerance: Scalar) -> Self {
        Self {
            tolerance: clamp_tolerance(tolerance),
        }
    }
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Clamp a caller-supplied tolerance into the usable range.
#[inline]
#[must_use]
pub fn clamp_tolerance(tolerance: Scalar) -> Scalar {
    if tolerance.is_finite() && tolerance > MIN_TOLERANCE {
        tolerance
    } else {
        MIN_TOLERANCE
    }
}

// ---------------------------------------------------------------------------
// Matrix
// ---------------------------------------------------------------------------

/// An affine 2×3 transform with named components.
///
/// Maps point (x, y) to:
///   (tx + txx*x + txy*y, ty + tyx*x + tyy*y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub tx: Scalar,
    pub ty: Scalar,
    pub txx: Scalar,
    pub txy: Scalar,
    pub tyx: Scalar,
    pub tyy: Scalar,
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        txx: 1.0,
        txy: 0.0,
        tyx: 0.0,
        tyy: 1.0,
    };

    /// Convert to a kurbo `Affine`.
    ///
    /// kurbo Affine coefficients: [a, b, c, d, e, f]
    /// mapping: x' = a*x + c*y + e,  y' = b*x + d*y + f
    #[inline]
    #[must_use]
    pub const fn to_affine(self) -> Affine {
        Affine::new([self.txx, self.tyx, self.txy, self.tyy, self.tx, self.ty])
    }

    /// Create from a kurbo `Affine`.
    #[inline]
    #[must_use]
    pub fn from_affine(a: Affine) -> Self {
        let c = a.as_coeffs();
        Self {
            txx: c[0],
            tyx: c[1],
            txy: c[2],
            tyy: c[3],
            tx: c[4],
            ty: c[5],
        }
    }

    /// Apply this transform to a point.
    #[inline]
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.txy.mul_add(p.y, self.txx.mul_add(p.x, self.tx)),
            self.tyy.mul_add(p.y, self.tyx.mul_add(p.x, self.ty)),
        )
    }

    /// Apply only the linear part (no translation) to a vector.
    #[inline]
    #[must_use]
    pub fn apply_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.txx.mul_add(v.x, self.txy * v.y),
            self.tyx.mul_add(v.x, self.tyy * v.y),
        )
    }

    /// Compose: `self` applied first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            tx: next.txy.mul_add(self.ty, next.txx.mul_add(self.tx, next.tx)),
            ty: next.tyy.mul_add(self.ty, next.tyx.mul_add(self.tx, next.ty)),
            txx: next.txy.mul_add(self.tyx, next.txx * self.txx),
            txy: next.txy.mul_add(self.tyy, next.txx * self.txy),
            tyx: next.tyy.mul_add(self.tyx, next.tyx * self.txx),
            tyy: next.tyy.mul_add(self.tyy, next.tyx * self.txy),
        }
    }

    /// Determinant of the linear part.
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> Scalar {
        self.txx.mul_add(self.tyy, -(self.txy * self.tyx))
    }

    /// Whether this is the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine> for Matrix {
    fn from(a: Affine) -> Self {
        Self::from_affine(a)
    }
}

impl From<Matrix> for Affine {
    fn from(m: Matrix) -> Self {
        m.to_affine()
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

    #[test]
    fn matrix_identity_roundtrip() {
        let m = Matrix::IDENTITY;
        let a = m.to_affine();
        assert_eq!(Matrix::from_affine(a), m);
        assert!(Matrix::default().is_identity());
    }

    #[test]
    fn matrix_apply() {
        let m = Matrix {
            tx: 10.0,
            ty: 20.0,
            txx: 2.0,
            txy: 0.0,
            tyx: 0.0,
            tyy: 3.0,
        };
        let p = m.apply(Point::new(1.0, 1.0));
        assert!((p.x - 12.0).abs() < EPSILON);
        assert!((p.y - 23.0).abs() < EPSILON);
    }

    #[test]
    fn matrix_matches_kurbo_affine() {
        let m = Matrix {
            tx: 3.0,
            ty: -1.0,
            txx: 0.5,
            txy: 2.0,
            tyx: -1.5,
            tyy: 4.0,
        };
        let p = Point::new(7.0, -2.0);
        let ours = m.apply(p);
        let theirs = m.to_affine() * p;
        assert!((ours.x - theirs.x).abs() < EPSILON);
        assert!((ours.y - theirs.y).abs() < EPSILON);
    }

    #[test]
    fn then_applies_self_first() {
        let scale = Matrix {
            txx: 2.0,
            tyy: 2.0,
            ..Matrix::IDENTITY
        };
        let shift = Matrix {
            tx: 1.0,
            ..Matrix::IDENTITY
        };
        let composed = scale.then(&shift);
        let p = composed.apply(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(3.0, 2.0));
        assert_eq!(composed.determinant(), 4.0);
    }

    #[test]
    fn vectors_ignore_translation() {
        let m = Matrix {
            tx: 100.0,
            ty: 100.0,
            ..Matrix::IDENTITY
        };
        assert_eq!(m.apply_vector(Vec2::new(1.0, 2.0)), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn tolerance_is_clamped() {
        assert_eq!(PathOptions::with_tolerance(0.0).tolerance, MIN_TOLERANCE);
        assert_eq!(
            PathOptions::with_tolerance(Scalar::NAN).tolerance,
            MIN_TOLERANCE
        );
        assert_eq!(PathOptions::with_tolerance(0.5).tolerance, 0.5);
        assert_eq!(PathOptions::default().tolerance, DEFAULT_TOLERANCE);
    }
}
