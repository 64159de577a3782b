//! Border-seeded flood fill
//!
//! Every pixel on the one-pixel perimeter that looks like backdrop becomes a
//! seed. A breadth-first walk then spreads inward through 4-connected
//! neighbors (no diagonals) that also look like backdrop. A pixel looks
//! like backdrop when it is already fully transparent or its color is
//! within the fill threshold of some member of the [`BackdropSet`].
//!
//! Only border-reachable pixels are ever touched. A backdrop-colored pocket
//! enclosed by artwork stays as it is, and so does a backdrop seam that
//! only continues diagonally.
//!
//! The walk is split into [`plan_fill`], which computes the region without
//! mutating anything, and [`FillPlan::apply`], which clears it. That lets a
//! caller inspect or veto a fill before the image changes.

use std::collections::VecDeque;

use crate::classify::BackdropSet;
use crate::color::Rgba;
use crate::image::RgbaImage;

/// Counters from one fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillStats {
    /// Perimeter pixels that started the walk.
    pub seeds: usize,
    /// Pixels whose alpha went from nonzero to zero.
    pub removed: usize,
}

/// The border-reachable backdrop region of an image.
#[derive(Debug, Clone)]
pub struct FillPlan {
    width: u32,
    height: u32,
    mask: Vec<bool>,
    seeds: usize,
    removable: usize,
}

impl FillPlan {
    /// Number of seed pixels found on the perimeter.
    #[inline]
    pub fn seeds(&self) -> usize {
        self.seeds
    }

    /// Pixels in the region that still have nonzero alpha; this is what
    /// [`apply`](Self::apply) will report.
    #[inline]
    pub fn removable(&self) -> usize {
        self.removable
    }

    /// Share of the whole image that [`apply`](Self::apply) would erase.
    pub fn removable_fraction(&self) -> f64 {
        self.removable as f64 / self.mask.len() as f64
    }

    /// Whether (x, y) is part of the region. Out-of-range coordinates are not.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.mask[y as usize * self.width as usize + x as usize]
    }

    /// Clear every pixel in the region to fully transparent black and
    /// return how many had nonzero alpha.
    ///
    /// # Panics
    ///
    /// Panics if `image` doesn't have the dimensions the plan was made for.
    pub fn apply(&self, image: &mut RgbaImage) -> usize {
        assert_eq!(
            (image.width(), image.height()),
            (self.width, self.height),
            "fill plan applied to an image of different size"
        );

        let mut removed = 0;
        for (px, &hit) in image.pixels_mut().iter_mut().zip(&self.mask) {
            if !hit {
                continue;
            }
            if !px.is_transparent() {
                removed += 1;
            }
            *px = Rgba::TRANSPARENT;
        }
        removed
    }
}

/// Compute the border-reachable backdrop region without touching `image`.
///
/// `threshold` is the fill-time similarity distance (see
/// [`is_similar`](crate::is_similar)). Work is bounded by the image size;
/// every pixel is enqueued at most once.
pub fn plan_fill(image: &RgbaImage, targets: &BackdropSet, threshold: f32) -> FillPlan {
    let width = image.width();
    let height = image.height();
    let pixels = image.pixels();

    let is_backdrop = |idx: usize| {
        let px = pixels[idx];
        px.is_transparent() || targets.matches(px.rgb(), threshold)
    };

    let mut visited = vec![false; pixels.len()];
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();

    let seed = |x: u32, y: u32, visited: &mut Vec<bool>, queue: &mut VecDeque<(u32, u32)>| {
        let idx = image.index(x, y);
        if !visited[idx] && is_backdrop(idx) {
            visited[idx] = true;
            queue.push_back((x, y));
        }
    };

    // Seed ring: top row, both side columns, bottom row
    for x in 0..width {
        seed(x, 0, &mut visited, &mut queue);
    }
    for y in 1..height {
        seed(0, y, &mut visited, &mut queue);
        seed(width - 1, y, &mut visited, &mut queue);
    }
    for x in 1..width.saturating_sub(1) {
        seed(x, height - 1, &mut visited, &mut queue);
    }
    let seeds = queue.len();

    let mut removable = 0;

    while let Some((x, y)) = queue.pop_front() {
        if !pixels[image.index(x, y)].is_transparent() {
            removable += 1;
        }

        let mut try_push = |nx: u32, ny: u32| {
            let idx = image.index(nx, ny);
            if !visited[idx] && is_backdrop(idx) {
                visited[idx] = true;
                queue.push_back((nx, ny));
            }
        };

        if x > 0 {
            try_push(x - 1, y);
        }
        if x + 1 < width {
            try_push(x + 1, y);
        }
        if y > 0 {
            try_push(x, y - 1);
        }
        if y + 1 < height {
            try_push(x, y + 1);
        }
    }

    FillPlan {
        width,
        height,
        mask: visited,
        seeds,
        removable,
    }
}

/// Erase the border-reachable backdrop region of `image` in place.
///
/// With no seeds on the perimeter nothing happens and both counters are 0.
///
/// # Example
///
/// ```
/// use backdrop_fill::{flood_fill, BackdropSet, Rgb, Rgba, RgbaImage};
///
/// let white = Rgb::gray(255);
/// let mut image = RgbaImage::new(10, 10, Rgba::opaque(white)).unwrap();
/// for y in 4..6 {
///     for x in 4..6 {
///         image.set(x, y, Rgba::opaque(Rgb::gray(0)));
///     }
/// }
///
/// let stats = flood_fill(&mut image, &BackdropSet::new([white]), 25.0);
/// assert_eq!(stats.removed, 96);
/// assert_eq!(image.get(0, 0), Rgba::TRANSPARENT);
/// assert_eq!(image.get(4, 4), Rgba::opaque(Rgb::gray(0)));
/// ```
pub fn flood_fill(image: &mut RgbaImage, targets: &BackdropSet, threshold: f32) -> FillStats {
    let plan = plan_fill(image, targets, threshold);
    if plan.seeds() == 0 {
        return FillStats::default();
    }
    let removed = plan.apply(image);
    FillStats {
        seeds: plan.seeds(),
        removed,
    }
}
