use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path =
            std::env::temp_dir().join(format!("shaper_cli_{tag}_{}_{}", std::process::id(), ts));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_shaper(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shaper"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run shaper")
}

#[test]
fn measure_two_lines_reports_geometry() {
    let dir = TestDir::new("measure_lines");
    let output = run_shaper(&["measure", "M 0 0 L 10 0 L 10 10"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("figures: 1"), "got: {stdout}");
    assert!(
        stdout.contains("bounds: (0.0000, 0.0000)-(10.0000, 10.0000)"),
        "got: {stdout}"
    );
    assert!(stdout.contains("length: 20.0000"), "got: {stdout}");
    assert!(stdout.contains("points: 3"), "got: {stdout}");
}

#[test]
fn measure_reports_nearest_point() {
    let dir = TestDir::new("measure_nearest");
    let output = run_shaper(
        &["measure", "M 0 0 L 10 0 L 10 10", "--point", "5,-3"],
        &dir.path,
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("nearest: (5.0000, 0.0000) distance=3.0000 path=0 segment=0"),
        "got: {stdout}"
    );
}

#[test]
fn measure_curve_flattens_to_many_points() {
    let dir = TestDir::new("measure_curve");
    let output = run_shaper(
        &["measure", "M 0 0 C 0 10 10 10 10 0", "--tolerance", "0.01"],
        &dir.path,
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("figures: 1"), "got: {stdout}");
    let points: usize = stdout
        .lines()
        .find_map(|l| l.strip_prefix("points: "))
        .and_then(|n| n.trim().parse().ok())
        .expect("points line");
    assert!(points > 2, "expected a subdivided curve, got {points}");
}

#[test]
fn measure_move_only_is_empty() {
    let dir = TestDir::new("measure_empty");
    let output = run_shaper(&["measure", "M 3 4"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("figures: 0"), "got: {stdout}");
    assert!(stdout.contains("bounds: empty"), "got: {stdout}");
}

#[test]
fn malformed_path_data_fails() {
    let dir = TestDir::new("measure_bad");
    let output = run_shaper(&["measure", "M 0 0 L 5"], &dir.path);

    assert_eq!(output.status.code(), Some(1), "unexpected status: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error:"), "got stderr: {stderr}");
}

#[test]
fn outline_with_missing_font_fails() {
    let dir = TestDir::new("outline_missing");
    let output = run_shaper(&["outline", "--font", "nope.ttf", "Hi"], &dir.path);

    assert_eq!(output.status.code(), Some(1), "unexpected status: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read"), "got stderr: {stderr}");
}

#[test]
fn outline_with_invalid_font_fails() {
    let dir = TestDir::new("outline_invalid");
    fs::write(dir.path.join("broken.ttf"), b"definitely not a font").expect("write font file");
    let output = run_shaper(&["outline", "--font", "broken.ttf", "Hi"], &dir.path);

    assert_eq!(output.status.code(), Some(1), "unexpected status: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("font parse error"), "got stderr: {stderr}");
}

#[test]
fn outline_reports_each_glyph() {
    let dir = TestDir::new("outline_demo");
    let font = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root from crate dir")
        .join("shaper-text/fonts/demo.ttf");
    let font = font.to_str().expect("utf-8 font path");
    let output = run_shaper(&["outline", "--font", font, "AA", "--size", "1000"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("glyphs: 2"), "got: {stdout}");
    assert!(
        stdout.contains("glyph 0 at (0.0000, 0.0000): paths=2"),
        "got: {stdout}"
    );
    assert!(
        stdout.contains("glyph 1 at (540.0000, 0.0000): paths=2"),
        "got: {stdout}"
    );
    assert!(
        stdout.contains("bounds=(6.0000, 0.0000)-(541.0000, 656.0000)"),
        "got: {stdout}"
    );
}
