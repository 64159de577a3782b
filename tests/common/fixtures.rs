//! Test fixtures: sprite images and a scratch directory to write them to.

use std::path::{Path, PathBuf};

use backdrop_fill::{Rgb, Rgba, RgbaImage};
use bgclear::codec::{decode_png, encode_png};

/// Colors used across the fixtures
pub mod colors {
    use backdrop_fill::Rgb;

    pub const WHITE: Rgb = Rgb::gray(255);
    pub const BLACK: Rgb = Rgb::gray(0);
    /// Light checkerboard tone used by common image editors
    pub const CHECK_GRAY: Rgb = Rgb::gray(204);
    pub const SPRITE_RED: Rgb = Rgb::new(190, 30, 45);
    pub const SPRITE_GREEN: Rgb = Rgb::new(40, 150, 60);
}

/// Temporary directory that is removed when dropped
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `image` as an RGBA PNG
    pub fn write_png(&self, name: &str, image: &RgbaImage) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, encode_png(image, false).expect("encode")).expect("write png");
        path
    }

    /// Write `image` as an RGB PNG with no alpha channel (alpha is dropped)
    pub fn write_rgb_png(&self, name: &str, image: &RgbaImage) -> PathBuf {
        let rgb: Vec<u8> = image
            .pixels()
            .iter()
            .flat_map(|p| p.rgb().to_bytes())
            .collect();
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().expect("png header");
            writer.write_image_data(&rgb).expect("png data");
        }
        let path = self.join(name);
        std::fs::write(&path, buf).expect("write png");
        path
    }

    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, bytes).expect("write file");
        path
    }
}

/// Read a PNG back as RGBA
pub fn read_png(path: &Path) -> RgbaImage {
    let bytes = std::fs::read(path).expect("read png");
    decode_png(&bytes).expect("decode png").image
}

pub fn solid(width: u32, height: u32, color: Rgb) -> RgbaImage {
    RgbaImage::new(width, height, Rgba::opaque(color)).expect("non-empty image")
}

/// Fill the rectangle `[x0, x1) x [y0, y1)` with `color`
pub fn paint(image: &mut RgbaImage, (x0, y0): (u32, u32), (x1, y1): (u32, u32), color: Rgb) {
    for y in y0..y1 {
        for x in x0..x1 {
            image.set(x, y, Rgba::opaque(color));
        }
    }
}

/// 10x10 white with a 2x2 black square in the middle
pub fn white_with_black_square() -> RgbaImage {
    let mut image = solid(10, 10, colors::WHITE);
    paint(&mut image, (4, 4), (6, 6), colors::BLACK);
    image
}

/// Editor checkerboard backdrop with a solid subject in the middle
pub fn checkerboard_sprite(size: u32, square: u32, subject: u32) -> RgbaImage {
    let mut image = solid(size, size, colors::WHITE);
    for y in 0..size {
        for x in 0..size {
            if ((x / square) + (y / square)) % 2 == 1 {
                image.set(x, y, Rgba::opaque(colors::CHECK_GRAY));
            }
        }
    }
    let start = (size - subject) / 2;
    paint(
        &mut image,
        (start, start),
        (start + subject, start + subject),
        colors::SPRITE_RED,
    );
    image
}
