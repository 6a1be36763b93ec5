//! Glyph outline adapter: outline events in, one shape per glyph out.

use kurbo::Size;
use log::{debug, trace, warn};
use shaper_geometry::{ComplexPolygon, Matrix, PathBuilder, PathOptions, Point};

use crate::error::GlyphError;
use crate::outline::{GlyphRenderer, OutlineEvent};

/// The finished outline of one glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphOutline {
    /// Position of the glyph in the accumulated sequence.
    pub index: usize,
    /// Location passed to `BeginGlyph`.
    pub location: Point,
    /// Size passed to `BeginGlyph`.
    pub size: Size,
    /// One path per contour; empty for a glyph without contours.
    pub shape: ComplexPolygon,
}

/// Position in the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between glyphs.
    Outside,
    /// Inside a glyph, no open contour.
    Glyph,
    /// Inside a contour.
    Figure,
    /// Discarding a glyph after a protocol violation.
    Skipping,
}

impl State {
    const fn describe(self) -> &'static str {
        match self {
            Self::Outside => "outside a glyph",
            Self::Glyph => "inside a glyph but outside a figure",
            Self::Figure => "inside a figure",
            Self::Skipping => "while a glyph is being discarded",
        }
    }
}

/// Consumes the outline protocol and collects a [`GlyphOutline`] per glyph.
///
/// A rejected event discards the glyph it belongs to: the remaining events
/// of that glyph are ignored and collection resumes with the next
/// `BeginGlyph` or after its `EndGlyph`.
#[derive(Debug, Clone)]
pub struct GlyphBuilder {
    builder: PathBuilder,
    state: State,
    in_text: bool,
    location: Point,
    size: Size,
    glyphs: Vec<GlyphOutline>,
}

impl GlyphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_builder(PathBuilder::new())
    }

    /// Apply `transform` to every outline point, e.g. a Y flip for
    /// surfaces with a top-left origin.
    #[must_use]
    pub fn with_transform(transform: Matrix) -> Self {
        Self::with_builder(PathBuilder::with_transform(transform))
    }

    /// Set the flattening options of the built paths.
    #[must_use]
    pub fn with_options(mut self, options: PathOptions) -> Self {
        self.builder = self.builder.with_options(options);
        self
    }

    fn with_builder(builder: PathBuilder) -> Self {
        Self {
            builder,
            state: State::Outside,
            in_text: false,
            location: Point::ZERO,
            size: Size::ZERO,
            glyphs: Vec::new(),
        }
    }

    /// Outlines collected so far, in glyph order.
    #[must_use]
    pub fn outlines(&self) -> &[GlyphOutline] {
        &self.glyphs
    }

    /// Feed every event in order, stopping at the first rejection.
    ///
    /// # Errors
    ///
    /// Returns the first [`GlyphError`] raised by [`handle`](Self::handle).
    pub fn consume(
        &mut self,
        events: impl IntoIterator<Item = OutlineEvent>,
    ) -> Result<(), GlyphError> {
        events.into_iter().try_for_each(|e| self.handle(e))
    }

    /// Finish processing and return the collected outlines.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::IllegalState`] if a glyph is still open.
    pub fn finish(self) -> Result<Vec<GlyphOutline>, GlyphError> {
        if self.state == State::Outside {
            Ok(self.glyphs)
        } else {
            Err(GlyphError::IllegalState {
                event: "finish",
                state: self.state.describe(),
            })
        }
    }

    /// Apply one protocol event.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::IllegalState`] for an out-of-sequence event.
    /// If a glyph was open it is discarded.
    pub fn handle(&mut self, event: OutlineEvent) -> Result<(), GlyphError> {
        if self.state == State::Skipping {
            self.skip(event);
            return Ok(());
        }

        match (self.state, event) {
            (State::Outside, OutlineEvent::BeginText { .. }) if !self.in_text => {
                self.in_text = true;
            }
            (State::Outside, OutlineEvent::EndText) if self.in_text => {
                self.in_text = false;
            }
            (State::Outside, OutlineEvent::BeginGlyph { location, size }) => {
                self.open_glyph(location, size);
            }
            (State::Glyph | State::Figure, OutlineEvent::EndGlyph) => {
                self.push_glyph();
            }
            (State::Glyph | State::Figure, OutlineEvent::BeginFigure) => {
                self.builder.start_figure();
                self.state = State::Figure;
            }
            (State::Glyph | State::Figure, OutlineEvent::MoveTo(p)) => {
                self.builder.move_to(p);
                self.state = State::Figure;
            }
            (State::Figure, OutlineEvent::LineTo(p)) => self.builder.add_line(p),
            (State::Figure, OutlineEvent::QuadraticBezierTo { control, to }) => {
                self.builder.add_quadratic_bezier(control, to);
            }
            (
                State::Figure,
                OutlineEvent::CubicBezierTo {
                    control1,
                    control2,
                    to,
                },
            ) => self.builder.add_bezier(control1, control2, to),
            (State::Figure, OutlineEvent::EndFigure) => {
                self.builder.close_figure();
                self.state = State::Glyph;
                trace!("glyph {}: figure closed", self.glyphs.len());
            }
            (state, event) => return Err(self.reject(state, event)),
        }
        Ok(())
    }

    fn open_glyph(&mut self, location: Point, size: Size) {
        self.builder.clear();
        self.location = location;
        self.size = size;
        self.state = State::Glyph;
    }

    fn push_glyph(&mut self) {
        let shape = self.builder.build();
        let index = self.glyphs.len();
        debug!("glyph {index}: {} path(s)", shape.len());
        self.glyphs.push(GlyphOutline {
            index,
            location: self.location,
            size: self.size,
            shape,
        });
        self.state = State::Outside;
    }

    fn skip(&mut self, event: OutlineEvent) {
        match event {
            OutlineEvent::BeginGlyph { location, size } => self.open_glyph(location, size),
            OutlineEvent::EndGlyph => self.state = State::Outside,
            _ => {}
        }
    }

    fn reject(&mut self, state: State, event: OutlineEvent) -> GlyphError {
        let error = GlyphError::IllegalState {
            event: event.name(),
            state: state.describe(),
        };
        if state != State::Outside {
            warn!("discarding glyph {}: {error}", self.glyphs.len());
            self.builder.clear();
            self.state = State::Skipping;
            // A BeginGlyph also starts the next glyph.
            if let OutlineEvent::BeginGlyph { location, size } = event {
                self.open_glyph(location, size);
            }
        }
        error
    }
}

impl Default for GlyphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRenderer for GlyphBuilder {
    fn event(&mut self, event: OutlineEvent) -> Result<(), GlyphError> {
        self.handle(event)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
