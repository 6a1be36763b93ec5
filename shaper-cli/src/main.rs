//! `shaper` CLI: measure vector paths and outline text.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::info;

use shaper_geometry::types::DEFAULT_TOLERANCE;
use shaper_geometry::{ComplexPolygon, PathBuilder, PathOptions, Point, Rectangle, Shape};
use shaper_text::{FontData, GlyphBuilder};

#[derive(Parser)]
#[command(version, about = "Measure vector paths and outline text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a path from SVG-like data (M, L, Q, C, Z) and report its geometry
    Measure {
        /// Path data, e.g. "M 0 0 L 10 0 L 10 10"
        data: String,

        /// Flattening tolerance for curves
        #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,

        /// Report the nearest point on the shape to X,Y
        #[arg(short, long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
        point: Option<Point>,
    },
    /// Render text through a font and report every glyph outline
    Outline {
        /// Font file (.otf, .ttf)
        #[arg(short, long, value_name = "FILE")]
        font: PathBuf,

        /// Text to outline
        text: String,

        /// Font size in output units
        #[arg(short, long, default_value_t = 12.0)]
        size: f64,

        /// Flattening tolerance for curves
        #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
    },
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"X,Y\", got \"{s}\""))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate \"{v}\": {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

// ---------------------------------------------------------------------------
// Path data
// ---------------------------------------------------------------------------

/// Split path data into command letters and numbers.
fn tokenize(data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in data.chars() {
        if ch.is_whitespace() || ch == ',' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else if ch.is_ascii_alphabetic() && ch != 'e' && ch != 'E' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            tokens.push(ch.to_string());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Feed path data into `builder`.
///
/// Numbers following a command repeat it; extra pairs after `M` are
/// treated as `L`.
fn parse_path_data(data: &str, builder: &mut PathBuilder) -> Result<(), String> {
    let tokens = tokenize(data);
    let mut pos = 0;
    let mut command: Option<char> = None;

    while pos < tokens.len() {
        let token = &tokens[pos];
        if let Some(c) = single_letter(token) {
            command = Some(c);
            pos += 1;
            if c == 'Z' {
                builder.close_figure();
                continue;
            }
        }
        let Some(c) = command else {
            return Err(format!("path data must start with a command, got \"{token}\""));
        };

        match c {
            'M' => {
                let [x, y] = numbers(&tokens, &mut pos, c)?;
                builder.move_to(Point::new(x, y));
                command = Some('L');
            }
            'L' => {
                let [x, y] = numbers(&tokens, &mut pos, c)?;
                builder.add_line(Point::new(x, y));
            }
            'Q' => {
                let [cx, cy, x, y] = numbers(&tokens, &mut pos, c)?;
                builder.add_quadratic_bezier(Point::new(cx, cy), Point::new(x, y));
            }
            'C' => {
                let [c1x, c1y, c2x, c2y, x, y] = numbers(&tokens, &mut pos, c)?;
                builder.add_bezier(
                    Point::new(c1x, c1y),
                    Point::new(c2x, c2y),
                    Point::new(x, y),
                );
            }
            'Z' => return Err(format!("unexpected \"{token}\" after Z")),
            other => return Err(format!("unknown path command \"{other}\"")),
        }
    }
    Ok(())
}

fn single_letter(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

fn numbers<const N: usize>(
    tokens: &[String],
    pos: &mut usize,
    command: char,
) -> Result<[f64; N], String> {
    let mut out = [0.0; N];
    for slot in &mut out {
        let token = tokens
            .get(*pos)
            .ok_or_else(|| format!("{command} needs {N} numbers"))?;
        *slot = token
            .parse()
            .map_err(|_| format!("{command} needs {N} numbers, got \"{token}\""))?;
        *pos += 1;
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

fn format_bounds(r: &Rectangle) -> String {
    if r.is_valid() {
        format!(
            "({:.4}, {:.4})-({:.4}, {:.4})",
            r.min_x, r.min_y, r.max_x, r.max_y
        )
    } else {
        "empty".to_owned()
    }
}

fn report_shape(shape: &ComplexPolygon, point: Option<Point>) {
    println!("figures: {}", shape.len());
    println!("bounds: {}", format_bounds(&shape.bounds()));
    println!("length: {:.4}", shape.length());
    let points: usize = shape.iter().map(|p| p.flatten().len()).sum();
    println!("points: {points}");

    for (i, path) in shape.iter().enumerate() {
        println!(
            "path {i}: segments={} closed={} points={} length={:.4} bounds={}",
            path.segments().len(),
            path.is_closed(),
            path.flatten().len(),
            path.length(),
            format_bounds(&path.bounds()),
        );
    }

    if let Some(query) = point {
        match shape.distance(query) {
            Some(info) => println!(
                "nearest: ({:.4}, {:.4}) distance={:.4} path={} segment={} along={:.4}",
                info.point.x,
                info.point.y,
                info.distance,
                info.path_index,
                info.segment_index,
                info.distance_along_path,
            ),
            None => println!("nearest: none"),
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn measure(data: &str, tolerance: f64, point: Option<Point>) -> Result<(), Box<dyn Error>> {
    let mut builder = PathBuilder::new().with_options(PathOptions::with_tolerance(tolerance));
    parse_path_data(data, &mut builder)?;
    let shape = builder.build();
    report_shape(&shape, point);
    Ok(())
}

fn outline(font: &Path, text: &str, size: f64, tolerance: f64) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(font).map_err(|e| format!("cannot read {}: {e}", font.display()))?;
    let font_data = FontData::from_bytes(Arc::from(bytes))?;
    info!("loaded {} ({font_data:?})", font.display());

    let mut glyphs = GlyphBuilder::new().with_options(PathOptions::with_tolerance(tolerance));
    font_data.render_text(text, size, Point::ZERO, &mut glyphs)?;
    let outlines = glyphs.finish()?;

    println!("glyphs: {}", outlines.len());
    for glyph in &outlines {
        println!(
            "glyph {} at ({:.4}, {:.4}): paths={} length={:.4} bounds={}",
            glyph.index,
            glyph.location.x,
            glyph.location.y,
            glyph.shape.len(),
            glyph.shape.length(),
            format_bounds(&glyph.shape.bounds()),
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Measure {
            data,
            tolerance,
            point,
        } => measure(&data, tolerance, point),
        Command::Outline {
            font,
            text,
            size,
            tolerance,
        } => outline(&font, &text, size, tolerance),
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests may panic")]
mod tests {
    use super::*;

    fn build(data: &str) -> ComplexPolygon {
        let mut builder = PathBuilder::new();
        parse_path_data(data, &mut builder).expect("valid path data");
        builder.build()
    }

    #[test]
    fn tokenize_splits_commands_and_numbers() {
        assert_eq!(
            tokenize("M0,0L10 -2.5e1z"),
            vec!["M", "0", "0", "L", "10", "-2.5e1", "z"]
        );
    }

    #[test]
    fn implicit_line_after_move() {
        let shape = build("M 0 0 10 0 10 10");
        assert_eq!(shape.len(), 1);
        assert_eq!(shape.paths()[0].segments().len(), 2);
    }

    #[test]
    fn close_and_curves() {
        let shape = build("M 0 0 Q 5 10 10 0 C 10 -5 0 -5 0 0 Z M 20 0 L 30 0");
        assert_eq!(shape.len(), 2);
        assert!(shape.paths()[0].is_closed());
        assert!(!shape.paths()[1].is_closed());
    }

    #[test]
    fn missing_numbers_are_reported() {
        let mut builder = PathBuilder::new();
        let err = parse_path_data("M 0 0 L 5", &mut builder).expect_err("truncated");
        assert!(err.contains("L needs 2 numbers"), "got: {err}");
    }

    #[test]
    fn data_must_start_with_command() {
        let mut builder = PathBuilder::new();
        assert!(parse_path_data("0 0", &mut builder).is_err());
        assert!(parse_path_data("X 1 2", &mut builder).is_err());
    }

    #[test]
    fn point_argument() {
        assert_eq!(parse_point("1.5, -2").expect("valid"), Point::new(1.5, -2.0));
        assert!(parse_point("1.5").is_err());
        assert!(parse_point("a,b").is_err());
    }
}
