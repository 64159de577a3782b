//! bgclear - strip opaque and checkerboard backdrops from sprite PNGs
//!
//! The detection and fill live in the `backdrop-fill` crate; this crate
//! wires it to files on disk, configuration and the command line.
//! This library exposes modules for integration testing.

pub mod codec;
pub mod error;
pub mod models;
pub mod services;
