//! Error types for the public API.

use std::fmt;

use crate::color::ParseColorError;
use crate::image::ImageError;

/// Invalid [`BackdropRemover`](crate::BackdropRemover) settings.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// Border band depth must be at least one pixel
    ZeroBorderDepth,
    /// A distance threshold is NaN, infinite, or not positive
    InvalidThreshold {
        /// Which threshold (`"palette"` or `"fill"`)
        name: &'static str,
        value: f32,
    },
    /// Frequency fraction outside `[0, 1)`
    InvalidFraction(f64),
    /// Safeguard fraction outside `(0, 1]`
    InvalidMaxRemoved(f64),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::ZeroBorderDepth => write!(f, "border depth must be at least 1"),
            OptionsError::InvalidThreshold { name, value } => {
                write!(f, "{} threshold must be a positive number, got {}", name, value)
            }
            OptionsError::InvalidFraction(v) => {
                write!(f, "min fraction must be in [0, 1), got {}", v)
            }
            OptionsError::InvalidMaxRemoved(v) => {
                write!(f, "max removed fraction must be in (0, 1], got {}", v)
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// Unified error type for the backdrop-fill public API.
///
/// ```
/// use backdrop_fill::{BackdropError, BackdropRemover, Rgb};
///
/// fn remover_from_hex(tones: &[&str]) -> Result<BackdropRemover, BackdropError> {
///     let palette = tones
///         .iter()
///         .map(|s| s.parse::<Rgb>())
///         .collect::<Result<Vec<_>, _>>()?;
///     Ok(BackdropRemover::new().reference_palette(palette).validate()?)
/// }
///
/// assert!(remover_from_hex(&["#FFF", "#CCC"]).is_ok());
/// assert!(remover_from_hex(&["#FFFF"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum BackdropError {
    Options(OptionsError),
    Image(ImageError),
    ParseColor(ParseColorError),
}

impl fmt::Display for BackdropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackdropError::Options(err) => write!(f, "invalid options: {}", err),
            BackdropError::Image(err) => write!(f, "image error: {}", err),
            BackdropError::ParseColor(err) => write!(f, "color parse error: {}", err),
        }
    }
}

impl std::error::Error for BackdropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackdropError::Options(err) => Some(err),
            BackdropError::Image(err) => Some(err),
            BackdropError::ParseColor(err) => Some(err),
        }
    }
}

impl From<OptionsError> for BackdropError {
    fn from(err: OptionsError) -> Self {
        BackdropError::Options(err)
    }
}

impl From<ImageError> for BackdropError {
    fn from(err: ImageError) -> Self {
        BackdropError::Image(err)
    }
}

impl From<ParseColorError> for BackdropError {
    fn from(err: ParseColorError) -> Self {
        BackdropError::ParseColor(err)
    }
}
