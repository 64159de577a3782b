//! Owned RGBA pixel buffer
//!
//! [`RgbaImage`] is the grid the sampler reads and the flood fill mutates.
//! Codecs live outside this crate; they hand over raw RGBA8 bytes through
//! [`RgbaImage::from_raw`] and take them back with [`RgbaImage::into_raw`].

use std::fmt;

use crate::color::Rgba;

/// Error type for buffer construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Width or height is zero
    EmptyImage {
        width: u32,
        height: u32,
    },
    /// Raw byte length doesn't match `width * height * 4`
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::EmptyImage { width, height } => {
                write!(f, "image has no pixels ({}x{})", width, height)
            }
            ImageError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "RGBA buffer length mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for ImageError {}

/// A width × height grid of [`Rgba`] pixels in row-major order.
///
/// # Example
///
/// ```
/// use backdrop_fill::{Rgba, RgbaImage};
///
/// let mut image = RgbaImage::new(4, 3, Rgba::new(255, 255, 255, 255)).unwrap();
/// image.set(1, 2, Rgba::TRANSPARENT);
///
/// assert_eq!(image.get(1, 2), Rgba::TRANSPARENT);
/// assert_eq!(image.count_transparent(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl RgbaImage {
    /// Create an image filled with a single pixel value.
    pub fn new(width: u32, height: u32, fill: Rgba) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyImage { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        })
    }

    /// Wrap raw RGBA8 bytes (`[R, G, B, A, R, G, B, A, ...]`, row-major).
    pub fn from_raw(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyImage { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(ImageError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Flatten back into RGBA8 bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false; construction rejects empty images.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Read the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        self.pixels[self.index(x, y)]
    }

    /// Write the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
    }

    /// Pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Number of pixels with alpha 0.
    pub fn count_transparent(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_transparent()).count()
    }

    /// Smallest alpha value in the image.
    pub fn min_alpha(&self) -> u8 {
        self.pixels.iter().map(|p| p.a).min().unwrap_or(255)
    }
}
