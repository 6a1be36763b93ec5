//! 2D vector-path geometry: line segments, flattening, bounds, length and
//! nearest-point queries, plus a cursor-based [`PathBuilder`].

pub mod types;

pub mod bbox;
pub mod bezier;
pub mod builder;
pub mod error;
pub mod math;
pub mod path;
pub mod segment;
pub mod shape;
pub mod transform;

pub use bbox::Rectangle;
pub use builder::PathBuilder;
pub use error::GeometryError;
pub use path::{Path, PointInfo};
pub use segment::LineSegment;
pub use shape::{ComplexPolygon, Shape};
pub use transform::Transformable;
pub use types::{Matrix, PathOptions, Point, Scalar, Vec2};
