//! backdrop-fill: border-seeded backdrop removal for sprites and icons
//!
//! Many generated or screenshotted sprites arrive with an opaque backdrop
//! where transparency was intended: a flat color, or the gray-and-white
//! checkerboard an editor uses to *show* transparency. This crate finds that
//! backdrop from the image border and erases it, leaving the artwork alone.
//!
//! # Quick Start
//!
//! ```
//! use backdrop_fill::{BackdropRemover, Rgb, Rgba, RgbaImage};
//!
//! let mut image = RgbaImage::new(10, 10, Rgba::opaque(Rgb::gray(255))).unwrap();
//! image.set(5, 5, Rgba::opaque(Rgb::new(200, 30, 30)));
//!
//! let removal = BackdropRemover::new().remove(&mut image);
//!
//! assert_eq!(removal.removed(), 99);
//! assert_eq!(image.get(5, 5), Rgba::opaque(Rgb::new(200, 30, 30)));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! RgbaImage
//!     |
//!     v
//! sample_border      (every pixel in a `depth`-wide band on all four edges)
//!     |
//!     v
//! ColorHistogram     (alpha dropped, transparent pixels skipped)
//!     |
//!     v
//! classify           (share > min_fraction, or near a reference tone)
//!     |
//!     v
//! BackdropSet        (empty -> Removal::NoBackdrop)
//!     |
//!     v
//! plan_fill          (perimeter seeds, 4-connected BFS)
//!     |
//!     v
//! FillPlan::apply    (region -> (0, 0, 0, 0))
//! ```
//!
//! # What gets erased
//!
//! Exactly the 4-connected region reachable from the image perimeter through
//! pixels that are fully transparent or within the fill threshold of some
//! backdrop color. Membership is a pure color test, so the result doesn't
//! depend on traversal order. Backdrop-colored areas enclosed by artwork,
//! or joined to the outside only at a corner, are kept.
//!
//! # Known limitation
//!
//! The most frequent border color is assumed to be backdrop. Artwork that is
//! itself a large uniform block touching the border will be erased along
//! with it. [`BackdropRemover::max_removed_fraction`] can refuse such fills
//! instead of applying them.

pub mod api;
pub mod classify;
pub mod color;
pub mod fill;
pub mod image;
pub mod sample;


pub use api::{BackdropError, BackdropRemover, Diagnostics, OptionsError, Removal};
pub use classify::{classify, BackdropSet, ClassifierOptions, DEFAULT_REFERENCE_PALETTE};
pub use color::{is_similar, ParseColorError, Rgb, Rgba};
pub use fill::{flood_fill, plan_fill, FillPlan, FillStats};
pub use image::{ImageError, RgbaImage};
pub use sample::{sample_border, ColorHistogram};
