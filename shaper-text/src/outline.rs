//! The glyph outline event protocol.
//!
//! A font-outline source emits, in order:
//!
//! ```text
//! BeginText → { BeginGlyph → { BeginFigure → { MoveTo | LineTo |
//!     QuadraticBezierTo | CubicBezierTo }* → EndFigure }* → EndGlyph }* → EndText
//! ```
//!
//! Sources can push [`OutlineEvent`] values or call the matching
//! [`GlyphRenderer`] methods. Coordinates are in the consumer's units;
//! the producer is responsible for any scaling.

use kurbo::Size;
use shaper_geometry::Point;

use crate::error::GlyphError;

/// One step of the outline protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineEvent {
    /// A text run starts at `location`, rendered at `size`.
    BeginText { location: Point, size: Size },
    EndText,
    /// A glyph starts at `location`, rendered at `size`.
    BeginGlyph { location: Point, size: Size },
    EndGlyph,
    /// A contour starts at the current point.
    BeginFigure,
    /// The current contour is closed.
    EndFigure,
    /// A contour starts at the given point.
    MoveTo(Point),
    LineTo(Point),
    QuadraticBezierTo { control: Point, to: Point },
    CubicBezierTo {
        control1: Point,
        control2: Point,
        to: Point,
    },
}

impl OutlineEvent {
    /// Protocol name of the event, used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BeginText { .. } => "BeginText",
            Self::EndText => "EndText",
            Self::BeginGlyph { .. } => "BeginGlyph",
            Self::EndGlyph => "EndGlyph",
            Self::BeginFigure => "BeginFigure",
            Self::EndFigure => "EndFigure",
            Self::MoveTo(_) => "MoveTo",
            Self::LineTo(_) => "LineTo",
            Self::QuadraticBezierTo { .. } => "QuadraticBezierTo",
            Self::CubicBezierTo { .. } => "CubicBezierTo",
        }
    }
}

/// Receiver for outline events.
///
/// Only [`event`](Self::event) is required; the named methods build the
/// matching [`OutlineEvent`] and forward it.
pub trait GlyphRenderer {
    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::IllegalState`] if the event is out of sequence.
    fn event(&mut self, event: OutlineEvent) -> Result<(), GlyphError>;

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn begin_text(&mut self, location: Point, size: Size) -> Result<(), GlyphError> {
        self.event(OutlineEvent::BeginText { location, size })
    }

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn end_text(&mut self) -> Result<(), GlyphError> {
        self.event(OutlineEvent::EndText)
    }

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn begin_glyph(&mut self, location: Point, size: Size) -> Result<(), GlyphError> {
        self.event(OutlineEvent::BeginGlyph { location, size })
    }

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn end_glyph(&mut self) -> Result<(), GlyphError> {
        self.event(OutlineEvent::EndGlyph)
    }

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn begin_figure(&mut self) -> Result<(), GlyphError> {
        self.event(OutlineEvent::BeginFigure)
    }

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn end_figure(&mut self) -> Result<(), GlyphError> {
        self.event(OutlineEvent::EndFigure)
    }

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn move_to(&mut self, point: Point) -> Result<(), GlyphError> {
        self.event(OutlineEvent::MoveTo(point))
    }

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn line_to(&mut self, point: Point) -> Result<(), GlyphError> {
        self.event(OutlineEvent::LineTo(point))
    }

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn quadratic_bezier_to(&mut self, control: Point, to: Point) -> Result<(), GlyphError> {
        self.event(OutlineEvent::QuadraticBezierTo { control, to })
    }

    /// # Errors
    ///
    /// See [`GlyphRenderer::event`].
    fn cubic_bezier_to(
        &mut self,
        control1: Point,
        control2: Point,
        to: Point,
    ) -> Result<(), GlyphError> {
        self.event(OutlineEvent::CubicBezierTo {
            control1,
            control2,
            to,
        })
    }
}
