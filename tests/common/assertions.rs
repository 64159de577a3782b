//! Assertion helpers for tests.

use std::path::Path;

use backdrop_fill::{Rgb, Rgba, RgbaImage};
use pretty_assertions::assert_eq;

/// Assert the pixel is fully cleared: alpha and RGB all zero
pub fn assert_cleared(image: &RgbaImage, x: u32, y: u32) {
    assert_eq!(
        image.get(x, y),
        Rgba::TRANSPARENT,
        "Expected ({x}, {y}) to be cleared"
    );
}

/// Assert the pixel is opaque `color`
pub fn assert_opaque(image: &RgbaImage, x: u32, y: u32, color: Rgb) {
    assert_eq!(
        image.get(x, y),
        Rgba::opaque(color),
        "Expected ({x}, {y}) to keep {color}"
    );
}

/// Assert no pixel other than fully cleared ones or `kept` survives
pub fn assert_only_color_left(image: &RgbaImage, kept: Rgb) {
    for (i, px) in image.pixels().iter().enumerate() {
        assert!(
            *px == Rgba::TRANSPARENT || *px == Rgba::opaque(kept),
            "Unexpected pixel {px:?} at index {i}"
        );
    }
}

/// Assert the file still has exactly `bytes`
pub fn assert_file_unchanged(path: &Path, bytes: &[u8]) {
    let now = std::fs::read(path).expect("read file");
    assert!(
        now == bytes,
        "Expected {} to be left untouched",
        path.display()
    );
}

/// Assert the bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}
