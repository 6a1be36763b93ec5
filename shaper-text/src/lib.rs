//! Glyph outlines as shaper paths.
//!
//! [`outline`] defines the event protocol a font-outline source emits,
//! [`glyph`] turns that stream into one [`ComplexPolygon`] per glyph, and
//! [`data`] drives the protocol from OpenType fonts via `ttf-parser`.
//!
//! [`ComplexPolygon`]: shaper_geometry::ComplexPolygon

pub mod data;
pub mod error;
pub mod glyph;
pub mod outline;

pub use data::FontData;
pub use error::{FontError, GlyphError};
pub use glyph::{GlyphBuilder, GlyphOutline};
pub use outline::{GlyphRenderer, OutlineEvent};
