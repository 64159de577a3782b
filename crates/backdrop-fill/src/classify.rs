//! Backdrop color classification
//!
//! Turns a border [`ColorHistogram`] into the set of colors the flood fill
//! will treat as backdrop. Two rules, either one suffices:
//!
//! 1. **Frequency**: the color makes up strictly more than `min_fraction`
//!    of the border band, fully transparent band pixels included. A checkerboard splits the border between two
//!    colors, so either may sit far below half; the default is 1%.
//! 2. **Reference palette**: the color lies within `palette_threshold` of a
//!    known transparency-checkerboard tone. This catches the second
//!    checkerboard color when its squares are larger than the sampled band
//!    and it ends up under-represented.

use crate::color::{is_similar, Rgb};
use crate::sample::ColorHistogram;

/// Checkerboard tones as rendered by common image editors: white plus
/// three grays.
pub const DEFAULT_REFERENCE_PALETTE: [Rgb; 4] = [
    Rgb::gray(255),
    Rgb::gray(204),
    Rgb::gray(192),
    Rgb::gray(153),
];

/// Tuning for [`classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOptions {
    /// Minimum share of border samples (exclusive) for a color to count as
    /// backdrop on frequency alone.
    pub min_fraction: f64,
    /// Distance below which a sampled color matches a reference tone.
    pub palette_threshold: f32,
    /// Known checkerboard tones.
    pub reference_palette: Vec<Rgb>,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            min_fraction: 0.01,
            palette_threshold: 20.0,
            reference_palette: DEFAULT_REFERENCE_PALETTE.to_vec(),
        }
    }
}

/// The colors treated as backdrop for one image.
///
/// Members are compared one by one; they are never averaged into a single
/// color, since the blend of a two-color checkerboard matches neither
/// square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackdropSet {
    colors: Vec<Rgb>,
}

impl BackdropSet {
    /// Build a set from explicit colors, dropping duplicates.
    pub fn new(colors: impl IntoIterator<Item = Rgb>) -> Self {
        let mut set = Self::default();
        for color in colors {
            set.insert(color);
        }
        set
    }

    fn insert(&mut self, color: Rgb) -> bool {
        if self.colors.contains(&color) {
            return false;
        }
        self.colors.push(color);
        true
    }

    /// Whether `color` is within `threshold` of any member.
    #[inline]
    pub fn matches(&self, color: Rgb, threshold: f32) -> bool {
        self.colors.iter().any(|&c| is_similar(c, color, threshold))
    }

    #[inline]
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Members in insertion order: frequency picks first, most frequent
    /// first, then palette matches.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Pick the backdrop colors out of a border histogram.
///
/// An empty result means there's no confident backdrop; callers should
/// leave the image alone rather than guess.
///
/// # Example
///
/// ```
/// use backdrop_fill::{classify, ClassifierOptions, ColorHistogram, Rgb};
///
/// let mut histogram = ColorHistogram::new();
/// for _ in 0..90 {
///     histogram.add(Rgb::new(40, 120, 40));
/// }
/// for _ in 0..10 {
///     histogram.add(Rgb::new(200, 30, 30));
/// }
///
/// let backdrop = classify(&histogram, &ClassifierOptions::default());
/// assert_eq!(backdrop.colors(), &[Rgb::new(40, 120, 40), Rgb::new(200, 30, 30)]);
/// ```
pub fn classify(histogram: &ColorHistogram, options: &ClassifierOptions) -> BackdropSet {
    let mut set = BackdropSet::default();
    if histogram.is_empty() {
        return set;
    }

    // Shares are of the whole band, erased pixels included
    let band = histogram.band_size() as f64;
    let ranked = histogram.ranked();

    for &(color, count) in &ranked {
        if count as f64 > band * options.min_fraction {
            set.insert(color);
        }
    }

    for &(color, _) in &ranked {
        let near_reference = options
            .reference_palette
            .iter()
            .any(|&reference| is_similar(color, reference, options.palette_threshold));
        if near_reference {
            set.insert(color);
        }
    }

    set
}
