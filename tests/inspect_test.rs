//! Inspection tests: reports are accurate and files are never written.

mod common;

use backdrop_fill::{BackdropRemover, Rgba};
use bgclear::codec::ColorKind;
use bgclear::services::{inspect, AlphaStatus};
use common::fixtures::{self, colors};
use common::Workspace;
use pretty_assertions::assert_eq;

#[test]
fn test_inspect_rgb_file_without_alpha() {
    let ws = Workspace::new();
    let path = ws.write_rgb_png("bat.png", &fixtures::checkerboard_sprite(32, 4, 12));
    let before = std::fs::read(&path).unwrap();

    let report = inspect(&path, &BackdropRemover::new()).unwrap();

    assert_eq!(report.source_color.color_type, ColorKind::Rgb);
    assert_eq!(report.alpha, AlphaStatus::NoAlphaChannel);
    assert_eq!(report.probes[0].pixel, Rgba::opaque(colors::WHITE));
    // (10, 0) lies in the third 4px square of the top row
    assert_eq!(report.probes[1].pixel, Rgba::opaque(colors::WHITE));
    assert_eq!(report.dominant.len(), 2);
    assert_eq!(report.would_remove, 32 * 32 - 12 * 12);
    common::assert_file_unchanged(&path, &before);
}

#[test]
fn test_inspect_after_run_shows_translucency() {
    let ws = Workspace::new();
    let path = ws.write_png("slime.png", &fixtures::white_with_black_square());
    bgclear::services::ImageProcessor::new(BackdropRemover::new()).process(&path);

    let report = inspect(&path, &BackdropRemover::new()).unwrap();

    assert_eq!(report.alpha, AlphaStatus::Translucent { min_alpha: 0 });
    assert_eq!(report.transparent_pixels, 96);
    assert!(report.targets.is_empty());
    assert_eq!(report.would_remove, 0);
    assert!(report.to_string().contains("none (no background detected)"));
}

#[test]
fn test_inspect_json_shape() {
    let ws = Workspace::new();
    let path = ws.write_png("slime.png", &fixtures::white_with_black_square());

    let report = inspect(&path, &BackdropRemover::new()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["alpha"], "opaque");
    assert_eq!(json["source_color"]["color_type"], "rgba");
    assert_eq!(json["targets"], serde_json::json!(["#FFFFFF"]));
    assert_eq!(json["probes"][0]["pixel"], serde_json::json!([255, 255, 255, 255]));
    assert_eq!(json["would_remove"], 96);
}
