//! Font data wrapper around `ttf-parser`.

use std::sync::Arc;

use kurbo::Size;
use log::trace;
use shaper_geometry::Point;

use crate::error::{FontError, GlyphError};
use crate::outline::GlyphRenderer;

/// Parsed font data.
///
/// Stores owned font bytes and cached global metrics. A
/// `ttf_parser::Face` is created on demand for individual queries.
#[derive(Clone)]
pub struct FontData {
    bytes: Arc<[u8]>,
    /// Font units per em (design coordinate space).
    units_per_em: u16,
    /// Global ascender in design units (positive).
    ascender: i16,
    /// Global descender in design units (negative).
    descender: i16,
}

impl FontData {
    /// Parse font data from an owned byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Parse`] if the data is not a valid
    /// OpenType/TrueType font.
    pub fn from_bytes(bytes: Arc<[u8]>) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(&bytes, 0)?;
        Ok(Self {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            bytes,
        })
    }

    fn face(&self) -> Result<ttf_parser::Face<'_>, FontError> {
        Ok(ttf_parser::Face::parse(&self.bytes, 0)?)
    }

    /// Font units per em (design coordinate space).
    #[must_use]
    pub const fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Scale factor from design units to points at the given font size.
    #[must_use]
    pub fn scale(&self, font_size: f64) -> f64 {
        font_size / f64::from(self.units_per_em())
    }

    /// Map a character to its glyph ID. Returns `None` if not in the cmap.
    #[must_use]
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().ok()?.glyph_index(ch).map(|g| g.0)
    }

    /// Horizontal advance width for a glyph, in design units.
    #[must_use]
    pub fn advance_width(&self, glyph_id: u16) -> Option<u16> {
        self.face()
            .ok()?
            .glyph_hor_advance(ttf_parser::GlyphId(glyph_id))
    }

    /// Emit the outlines of `text` to `renderer`, one glyph per mapped
    /// character, laid out left to right from `origin`.
    ///
    /// Coordinates are scaled from design units to `font_size` and keep
    /// the font's Y-up orientation. Characters missing from the cmap are
    /// skipped without advancing.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Glyph`] with the first event the renderer
    /// rejected.
    pub fn render_text(
        &self,
        text: &str,
        font_size: f64,
        origin: Point,
        renderer: &mut dyn GlyphRenderer,
    ) -> Result<(), FontError> {
        let face = self.face()?;
        let scale = self.scale(font_size);
        let line_height = f64::from(i32::from(self.ascender) - i32::from(self.descender)) * scale;

        renderer.begin_text(origin, Size::new(0.0, font_size))?;
        let mut pen_x = origin.x;
        for ch in text.chars() {
            let Some(gid) = self.glyph_id(ch) else {
                trace!("no glyph for {ch:?}");
                continue;
            };
            let advance = self
                .advance_width(gid)
                .map_or(0.0, |a| f64::from(a) * scale);
            let location = Point::new(pen_x, origin.y);

            renderer.begin_glyph(location, Size::new(advance, line_height))?;
            let mut adapter = OutlineAdapter::new(&mut *renderer, scale, location);
            face.outline_glyph(ttf_parser::GlyphId(gid), &mut adapter);
            adapter.finish()?;
            renderer.end_glyph()?;

            pen_x += advance;
        }
        renderer.end_text()?;
        Ok(())
    }
}

/// Adapter from `ttf_parser::OutlineBuilder` to a [`GlyphRenderer`].
///
/// `OutlineBuilder` cannot fail, so the first rejected event is stored
/// and every later callback is dropped.
struct OutlineAdapter<'a> {
    renderer: &'a mut dyn GlyphRenderer,
    scale: f64,
    offset: Point,
    in_figure: bool,
    error: Option<GlyphError>,
}

impl<'a> OutlineAdapter<'a> {
    fn new(renderer: &'a mut dyn GlyphRenderer, scale: f64, offset: Point) -> Self {
        Self {
            renderer,
            scale,
            offset,
            in_figure: false,
            error: None,
        }
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.offset.x + f64::from(x) * self.scale,
            self.offset.y + f64::from(y) * self.scale,
        )
    }

    fn emit(&mut self, f: impl FnOnce(&mut dyn GlyphRenderer) -> Result<(), GlyphError>) {
        if self.error.is_none() {
            if let Err(e) = f(&mut *self.renderer) {
                self.error = Some(e);
            }
        }
    }

    fn close_figure(&mut self) {
        if self.in_figure {
            self.in_figure = false;
            self.emit(|r| r.end_figure());
        }
    }

    /// Close a contour left open by the font and report the stored error.
    fn finish(mut self) -> Result<(), GlyphError> {
        self.close_figure();
        self.error.map_or(Ok(()), Err)
    }
}

impl ttf_parser::OutlineBuilder for OutlineAdapter<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.close_figure();
        let p = self.point(x, y);
        self.in_figure = true;
        self.emit(|r| r.begin_figure());
        self.emit(|r| r.move_to(p));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.emit(|r| r.line_to(p));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (c, p) = (self.point(x1, y1), self.point(x, y));
        self.emit(|r| r.quadratic_bezier_to(c, p));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, p) = (self.point(x1, y1), self.point(x2, y2), self.point(x, y));
        self.emit(|r| r.cubic_bezier_to(c1, c2, p));
    }

    fn close(&mut self) {
        self.close_figure();
    }
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("units_per_em", &self.units_per_em)
            .field("ascender", &self.ascender)
            .field("descender", &self.descender)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests may panic")]
mod tests {
    use super::*;
    use crate::glyph::GlyphBuilder;
    use crate::outline::OutlineEvent;
    use ttf_parser::OutlineBuilder;

    #[derive(Default)]
    struct Recorder {
        events: Vec<OutlineEvent>,
    }

    impl GlyphRenderer for Recorder {
        fn event(&mut self, event: OutlineEvent) -> Result<(), GlyphError> {
            self.events.push(event);
            Ok(())
        }
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let result = FontData::from_bytes(Arc::from(&b"not a font"[..]));
        assert!(matches!(result, Err(FontError::Parse(_))));
    }

    // Two glyphs: .notdef and "A" (a triangle counter inside an outer contour).
    static DEMO: &[u8] = include_bytes!("../fonts/demo.ttf");

    fn demo() -> FontData {
        FontData::from_bytes(Arc::from(DEMO)).expect("demo font parses")
    }

    #[test]
    fn demo_font_metrics() {
        let font = demo();
        assert_eq!(font.units_per_em(), 1000);
        assert!((font.scale(12.0) - 0.012).abs() < 1e-12);
        assert_eq!(font.glyph_id('A'), Some(1));
        assert_eq!(font.glyph_id('z'), None);
        assert_eq!(font.advance_width(1), Some(540));
        assert_eq!(font.advance_width(0), Some(600));
    }

    #[test]
    fn render_text_pairs_glyph_events_and_advances() {
        let font = demo();
        let mut rec = Recorder::default();
        font.render_text("AzA", 1000.0, Point::ZERO, &mut rec)
            .expect("recorder accepts everything");

        assert!(matches!(
            rec.events.first(),
            Some(OutlineEvent::BeginText { .. })
        ));
        assert_eq!(rec.events.last(), Some(&OutlineEvent::EndText));

        // 'z' is not mapped, so only two glyphs appear and they alternate.
        let glyph_events: Vec<_> = rec
            .events
            .iter()
            .filter(|e| matches!(e, OutlineEvent::BeginGlyph { .. } | OutlineEvent::EndGlyph))
            .collect();
        assert_eq!(glyph_events.len(), 4);
        for pair in glyph_events.chunks(2) {
            assert!(matches!(pair[0], OutlineEvent::BeginGlyph { .. }));
            assert_eq!(pair[1], &OutlineEvent::EndGlyph);
        }

        let locations: Vec<Point> = rec
            .events
            .iter()
            .filter_map(|e| match e {
                OutlineEvent::BeginGlyph { location, .. } => Some(*location),
                _ => None,
            })
            .collect();
        assert_eq!(locations, vec![Point::ZERO, Point::new(540.0, 0.0)]);
    }

    #[test]
    fn render_text_through_glyph_builder() {
        use shaper_geometry::Shape;

        let font = demo();
        let mut builder = GlyphBuilder::new();
        font.render_text("AA", 100.0, Point::new(10.0, 0.0), &mut builder)
            .expect("well-formed outlines");
        let outlines = builder.finish().expect("closed");
        assert_eq!(outlines.len(), 2);

        for glyph in &outlines {
            let paths = glyph.shape.paths();
            assert_eq!(paths.len(), 2);
            assert!(paths.iter().all(shaper_geometry::Path::is_closed));
            assert_eq!(paths[0].segments().len(), 3);
            assert_eq!(paths[1].segments().len(), 8);
        }

        let first = outlines[0].shape.bounds();
        assert!((first.min_x - 10.6).abs() < 1e-6);
        assert!((first.max_x - 64.1).abs() < 1e-6);
        assert!(first.min_y.abs() < 1e-6);
        assert!((first.max_y - 65.6).abs() < 1e-6);

        let second = outlines[1].shape.bounds();
        assert!((outlines[1].location.x - 64.0).abs() < 1e-6);
        assert!((second.min_x - first.min_x - 54.0).abs() < 1e-6);
    }

    #[test]
    fn adapter_scales_and_offsets_points() {
        let mut rec = Recorder::default();
        let mut adapter = OutlineAdapter::new(&mut rec, 0.5, Point::new(10.0, 0.0));
        adapter.move_to(0.0, 0.0);
        adapter.line_to(20.0, 0.0);
        adapter.quad_to(20.0, 20.0, 0.0, 20.0);
        adapter.close();
        adapter.finish().expect("recorder accepts everything");

        assert_eq!(
            rec.events,
            vec![
                OutlineEvent::BeginFigure,
                OutlineEvent::MoveTo(Point::new(10.0, 0.0)),
                OutlineEvent::LineTo(Point::new(20.0, 0.0)),
                OutlineEvent::QuadraticBezierTo {
                    control: Point::new(20.0, 10.0),
                    to: Point::new(10.0, 10.0),
                },
                OutlineEvent::EndFigure,
            ]
        );
    }

    #[test]
    fn adapter_closes_unclosed_contours() {
        let mut rec = Recorder::default();
        let mut adapter = OutlineAdapter::new(&mut rec, 1.0, Point::ZERO);
        adapter.move_to(0.0, 0.0);
        adapter.line_to(1.0, 0.0);
        adapter.move_to(5.0, 5.0);
        adapter.curve_to(6.0, 5.0, 7.0, 6.0, 7.0, 7.0);
        adapter.finish().expect("recorder accepts everything");

        let ends = rec
            .events
            .iter()
            .filter(|e| matches!(e, OutlineEvent::EndFigure))
            .count();
        let begins = rec
            .events
            .iter()
            .filter(|e| matches!(e, OutlineEvent::BeginFigure))
            .count();
        assert_eq!(begins, 2);
        assert_eq!(ends, 2);
        assert_eq!(rec.events.last(), Some(&OutlineEvent::EndFigure));
    }

    #[test]
    fn adapter_reports_first_rejection() {
        // Outside any glyph every contour event is rejected.
        let mut builder = GlyphBuilder::new();
        let mut adapter = OutlineAdapter::new(&mut builder, 1.0, Point::ZERO);
        adapter.move_to(0.0, 0.0);
        adapter.line_to(1.0, 1.0);
        let err = adapter.finish().expect_err("no glyph is open");
        assert_eq!(
            err,
            GlyphError::IllegalState {
                event: "BeginFigure",
                state: "outside a glyph",
            }
        );
    }

    #[test]
    fn adapter_feeds_glyph_builder() {
        let mut builder = GlyphBuilder::new();
        builder
            .begin_glyph(Point::ZERO, Size::new(10.0, 10.0))
            .expect("begin");
        let mut adapter = OutlineAdapter::new(&mut builder, 1.0, Point::ZERO);
        adapter.move_to(0.0, 0.0);
        adapter.line_to(5.0, 0.0);
        adapter.line_to(5.0, 5.0);
        adapter.close();
        adapter.finish().expect("valid contour");
        builder.end_glyph().expect("end");

        let outlines = builder.finish().expect("closed");
        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].shape.paths()[0].segments().len(), 2);
    }
}
