//! Edge color sampling
//!
//! The sampler reads a band of `depth` pixels along all four edges, not just
//! the one-pixel perimeter, so a checkerboard whose squares are wider than
//! one pixel still contributes both of its colors.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::image::RgbaImage;

/// Frequency count of border colors, alpha dropped.
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    counts: HashMap<Rgb, u32>,
    total: u32,
    skipped_transparent: u32,
}

impl ColorHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `color`.
    pub fn add(&mut self, color: Rgb) {
        *self.counts.entry(color).or_insert(0) += 1;
        self.total += 1;
    }

    /// Record one fully transparent band pixel without counting a color.
    pub fn add_transparent(&mut self) {
        self.skipped_transparent += 1;
    }

    /// Number of counted samples.
    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Every band pixel visited, counted or skipped. Color shares in
    /// [`classify`](crate::classify) are measured against this.
    #[inline]
    pub fn band_size(&self) -> u32 {
        self.total + self.skipped_transparent
    }

    /// Band pixels that were fully transparent and therefore not counted.
    #[inline]
    pub fn skipped_transparent(&self) -> u32 {
        self.skipped_transparent
    }

    /// How often `color` was observed.
    #[inline]
    pub fn count(&self, color: Rgb) -> u32 {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Number of distinct colors.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Colors by descending count; equal counts are ordered by color so
    /// the ranking doesn't depend on hash order.
    pub fn ranked(&self) -> Vec<(Rgb, u32)> {
        let mut ranked: Vec<(Rgb, u32)> = self.counts.iter().map(|(&c, &n)| (c, n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// The `n` most frequent colors.
    pub fn top(&self, n: usize) -> Vec<(Rgb, u32)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Count the colors in the border band of `image`.
///
/// A pixel belongs to the band when its row is in the top or bottom `depth`
/// rows, or its column is in the left or right `depth` columns. Each band
/// pixel is visited once. The band never reaches the center line: on each
/// axis the depth is capped at `(size - 1) / 2` (but at least 1), so a small
/// image still leaves its middle rows and columns unsampled. Fully
/// transparent pixels are tallied in
/// [`ColorHistogram::skipped_transparent`] instead of being counted as a
/// color. They still count toward [`ColorHistogram::band_size`].
///
/// A `depth` of 0 samples nothing.
///
/// # Example
///
/// ```
/// use backdrop_fill::{sample_border, Rgb, Rgba, RgbaImage};
///
/// let image = RgbaImage::new(10, 10, Rgba::opaque(Rgb::gray(255))).unwrap();
/// let histogram = sample_border(&image, 2);
///
/// // 100 pixels minus the 6x6 interior
/// assert_eq!(histogram.total(), 64);
/// ```
pub fn sample_border(image: &RgbaImage, depth: u32) -> ColorHistogram {
    let mut histogram = ColorHistogram::new();
    if depth == 0 {
        return histogram;
    }

    let width = image.width();
    let height = image.height();
    let pixels = image.pixels();
    let row_depth = band_depth(depth, height);
    let col_depth = band_depth(depth, width);

    let visit = |x: u32, y: u32, histogram: &mut ColorHistogram| {
        let px = pixels[image.index(x, y)];
        if px.is_transparent() {
            histogram.add_transparent();
        } else {
            histogram.add(px.rgb());
        }
    };

    for y in 0..height {
        let full_row = y < row_depth || y >= height - row_depth;
        if full_row || col_depth * 2 >= width {
            for x in 0..width {
                visit(x, y, &mut histogram);
            }
        } else {
            for x in 0..col_depth {
                visit(x, y, &mut histogram);
            }
            for x in (width - col_depth)..width {
                visit(x, y, &mut histogram);
            }
        }
    }

    histogram
}

/// Band depth along an axis of `size` pixels.
#[inline]
fn band_depth(depth: u32, size: u32) -> u32 {
    depth.min(((size.saturating_sub(1)) / 2).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn solid(width: u32, height: u32, color: Rgb) -> RgbaImage {
        RgbaImage::new(width, height, Rgba::opaque(color)).unwrap()
    }

    #[test]
    fn test_band_counts_each_pixel_once() {
        let image = solid(10, 8, Rgb::gray(255));

        // depth 1: perimeter of a 10x8 rectangle
        assert_eq!(sample_border(&image, 1).total(), 10 * 8 - 8 * 6);
        // depth 3: 10x8 minus 4x2 interior
        assert_eq!(sample_border(&image, 3).total(), 80 - 8);
        // rows cap at 3, columns at 4: a 2x2 center stays out
        assert_eq!(sample_border(&image, 4).total(), 80 - 4);
        assert_eq!(sample_border(&image, 50).total(), 80 - 4);
    }

    #[test]
    fn test_band_leaves_center_of_small_images() {
        let mut image = solid(10, 10, Rgb::gray(255));
        for y in 4..6 {
            for x in 4..6 {
                image.set(x, y, Rgba::opaque(Rgb::gray(0)));
            }
        }
        let histogram = sample_border(&image, 5);
        assert_eq!(histogram.count(Rgb::gray(0)), 0);
        assert_eq!(histogram.total(), 96);

        // one- and two-pixel axes are still sampled in full
        assert_eq!(sample_border(&solid(1, 1, Rgb::gray(0)), 5).total(), 1);
        assert_eq!(sample_border(&solid(2, 3, Rgb::gray(0)), 5).total(), 6);
        assert_eq!(sample_border(&solid(3, 3, Rgb::gray(0)), 5).total(), 8);
    }

    #[test]
    fn test_depth_zero_samples_nothing() {
        let image = solid(4, 4, Rgb::gray(0));
        let histogram = sample_border(&image, 0);
        assert!(histogram.is_empty());
        assert_eq!(histogram.distinct(), 0);
    }

    #[test]
    fn test_interior_is_not_sampled() {
        let mut image = solid(10, 10, Rgb::gray(255));
        for y in 4..6 {
            for x in 4..6 {
                image.set(x, y, Rgba::opaque(Rgb::gray(0)));
            }
        }
        let histogram = sample_border(&image, 3);
        assert_eq!(histogram.count(Rgb::gray(0)), 0);
        assert_eq!(histogram.count(Rgb::gray(255)), 100 - 16);
    }

    #[test]
    fn test_alpha_is_dropped_and_transparent_skipped() {
        let mut image = solid(3, 3, Rgb::new(10, 20, 30));
        image.set(0, 0, Rgba::new(10, 20, 30, 40));
        image.set(2, 2, Rgba::TRANSPARENT);

        let histogram = sample_border(&image, 1);
        assert_eq!(histogram.count(Rgb::new(10, 20, 30)), 7);
        assert_eq!(histogram.skipped_transparent(), 1);
        assert_eq!(histogram.total(), 7);
        assert_eq!(histogram.band_size(), 8);
    }

    #[test]
    fn test_ranked_is_deterministic() {
        let mut histogram = ColorHistogram::new();
        for _ in 0..3 {
            histogram.add(Rgb::gray(9));
        }
        histogram.add(Rgb::gray(200));
        histogram.add(Rgb::gray(100));

        assert_eq!(
            histogram.ranked(),
            vec![(Rgb::gray(9), 3), (Rgb::gray(100), 1), (Rgb::gray(200), 1)]
        );
        assert_eq!(histogram.top(1), vec![(Rgb::gray(9), 3)]);
    }
}
