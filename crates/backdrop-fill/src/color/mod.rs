//! Color types and the similarity metric
//!
//! Backdrop detection works on 8-bit channels throughout. [`Rgb`] is the
//! alpha-free triple that the sampler counts and the classifier ranks;
//! [`Rgba`] is the pixel stored in an [`RgbaImage`](crate::RgbaImage).
//!
//! # Example
//!
//! ```
//! use backdrop_fill::{is_similar, Rgb};
//!
//! let white = Rgb::new(255, 255, 255);
//! let off_white: Rgb = "#F0F0F0".parse().unwrap();
//!
//! assert!(is_similar(white, off_white, 30.0));
//! assert!(!is_similar(white, off_white, 20.0));
//! ```

mod rgb;

pub use rgb::{is_similar, ParseColorError, Rgb, Rgba};
