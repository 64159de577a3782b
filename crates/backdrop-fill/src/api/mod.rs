//! Public API for the backdrop-fill crate.
//!
//! [`BackdropRemover`] wires sampling, classification and the flood fill
//! together; [`Removal`] reports what happened to one image and
//! [`BackdropError`] unifies the crate's error types.

mod builder;
mod error;
mod removal;

pub use builder::BackdropRemover;
pub use error::{BackdropError, OptionsError};
pub use removal::{Diagnostics, Removal};
