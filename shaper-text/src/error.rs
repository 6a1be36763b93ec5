//! Glyph protocol and font loading errors.

use thiserror::Error;

/// Errors raised by the glyph outline adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlyphError {
    /// An outline event arrived out of sequence.
    #[error("{event} is not allowed {state}")]
    IllegalState {
        /// Name of the rejected event.
        event: &'static str,
        /// Where in the protocol the adapter was.
        state: &'static str,
    },
}

/// Errors that can occur when loading fonts or rendering text from them.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font data could not be parsed.
    #[error("font parse error: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
    /// The renderer rejected part of the outline stream.
    #[error(transparent)]
    Glyph(#[from] GlyphError),
}
