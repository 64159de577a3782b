//! BackdropRemover builder -- the primary entry point for the crate.
//!
//! [`BackdropRemover`] holds every tuning knob and runs the
//! sample → classify → fill pipeline on an [`RgbaImage`].

use crate::classify::{classify, BackdropSet, ClassifierOptions};
use crate::color::Rgb;
use crate::fill::{plan_fill, FillPlan};
use crate::image::RgbaImage;
use crate::sample::{sample_border, ColorHistogram};

use super::error::OptionsError;
use super::removal::{Diagnostics, Removal};

/// Number of ranked border colors kept in [`Diagnostics::dominant`].
const DOMINANT_COLORS: usize = 5;

/// Backdrop removal pipeline with fluent configuration.
///
/// Setters consume and return `self`; [`remove()`](Self::remove) takes
/// `&self`, so one remover can be reused across a whole batch.
///
/// # Example
///
/// ```
/// use backdrop_fill::{BackdropRemover, Removal, Rgb, Rgba, RgbaImage};
///
/// let mut image = RgbaImage::new(10, 10, Rgba::opaque(Rgb::gray(255))).unwrap();
/// for y in 4..6 {
///     for x in 4..6 {
///         image.set(x, y, Rgba::opaque(Rgb::gray(0)));
///     }
/// }
///
/// let remover = BackdropRemover::new().border_depth(3).fill_threshold(25.0);
/// let removal = remover.remove(&mut image);
///
/// assert!(matches!(removal, Removal::Cleared { .. }));
/// assert_eq!(removal.removed(), 96);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropRemover {
    border_depth: u32,
    fill_threshold: f32,
    classifier: ClassifierOptions,
    max_removed_fraction: Option<f64>,
}

impl Default for BackdropRemover {
    fn default() -> Self {
        Self::new()
    }
}

impl BackdropRemover {
    /// Create a remover with the default tuning: 5 px border band, 1%
    /// frequency cut, palette threshold 20, fill threshold 25, no safeguard.
    pub fn new() -> Self {
        Self {
            border_depth: 5,
            fill_threshold: 25.0,
            classifier: ClassifierOptions::default(),
            max_removed_fraction: None,
        }
    }

    /// Depth of the border band sampled for backdrop colors.
    #[inline]
    pub fn border_depth(mut self, depth: u32) -> Self {
        self.border_depth = depth;
        self
    }

    /// Share of border samples (exclusive) a color needs to be backdrop.
    #[inline]
    pub fn min_fraction(mut self, fraction: f64) -> Self {
        self.classifier.min_fraction = fraction;
        self
    }

    /// Distance under which a border color matches a reference tone.
    #[inline]
    pub fn palette_threshold(mut self, threshold: f32) -> Self {
        self.classifier.palette_threshold = threshold;
        self
    }

    /// Distance under which a pixel matches a backdrop color during the fill.
    #[inline]
    pub fn fill_threshold(mut self, threshold: f32) -> Self {
        self.fill_threshold = threshold;
        self
    }

    /// Replace the reference checkerboard tones.
    #[inline]
    pub fn reference_palette(mut self, palette: Vec<Rgb>) -> Self {
        self.classifier.reference_palette = palette;
        self
    }

    /// Refuse fills that would erase more than this share of the image.
    /// `None` disables the check.
    #[inline]
    pub fn max_removed_fraction(mut self, fraction: Option<f64>) -> Self {
        self.max_removed_fraction = fraction;
        self
    }

    pub fn classifier_options(&self) -> &ClassifierOptions {
        &self.classifier
    }

    pub fn get_border_depth(&self) -> u32 {
        self.border_depth
    }

    pub fn get_fill_threshold(&self) -> f32 {
        self.fill_threshold
    }

    pub fn get_max_removed_fraction(&self) -> Option<f64> {
        self.max_removed_fraction
    }

    /// Check the settings, returning the remover unchanged if they're usable.
    pub fn validate(self) -> Result<Self, OptionsError> {
        if self.border_depth == 0 {
            return Err(OptionsError::ZeroBorderDepth);
        }
        for (name, value) in [
            ("palette", self.classifier.palette_threshold),
            ("fill", self.fill_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OptionsError::InvalidThreshold { name, value });
            }
        }
        let fraction = self.classifier.min_fraction;
        if !(0.0..1.0).contains(&fraction) {
            return Err(OptionsError::InvalidFraction(fraction));
        }
        if let Some(max) = self.max_removed_fraction {
            if !(max > 0.0 && max <= 1.0) {
                return Err(OptionsError::InvalidMaxRemoved(max));
            }
        }
        Ok(self)
    }

    /// Sample the border band of `image`.
    pub fn sample(&self, image: &RgbaImage) -> ColorHistogram {
        sample_border(image, self.border_depth)
    }

    /// Pick backdrop colors from a border histogram.
    pub fn classify(&self, histogram: &ColorHistogram) -> BackdropSet {
        classify(histogram, &self.classifier)
    }

    /// Run sampling, classification and fill planning without modifying
    /// `image`. `removed` in the result is what a fill would erase.
    pub fn analyze(&self, image: &RgbaImage) -> Diagnostics {
        let (diagnostics, _) = self.plan(image);
        diagnostics
    }

    fn plan(&self, image: &RgbaImage) -> (Diagnostics, Option<FillPlan>) {
        let histogram = self.sample(image);
        let targets = self.classify(&histogram);

        let mut diagnostics = Diagnostics {
            sampled: histogram.total(),
            dominant: histogram.top(DOMINANT_COLORS),
            targets: targets.colors().to_vec(),
            seeds: 0,
            removed: 0,
        };
        if targets.is_empty() {
            return (diagnostics, None);
        }

        let plan = plan_fill(image, &targets, self.fill_threshold);
        diagnostics.seeds = plan.seeds();
        diagnostics.removed = plan.removable();
        (diagnostics, Some(plan))
    }

    /// Detect and erase the backdrop of `image` in place.
    ///
    /// The image is only modified when the result is [`Removal::Cleared`].
    pub fn remove(&self, image: &mut RgbaImage) -> Removal {
        let (mut diagnostics, plan) = self.plan(image);

        let Some(plan) = plan else {
            return Removal::NoBackdrop { diagnostics };
        };
        if plan.removable() == 0 {
            return Removal::Unchanged { diagnostics };
        }

        if let Some(max) = self.max_removed_fraction {
            let fraction = plan.removable_fraction();
            if fraction > max {
                return Removal::Refused {
                    diagnostics,
                    fraction,
                };
            }
        }

        diagnostics.removed = plan.apply(image);
        Removal::Cleared { diagnostics }
    }
}
