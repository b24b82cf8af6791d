//! multidim-demo utilities.
//!
//! This crate hosts a sample leaf type that the demo binary and higher-level
//! tests can fill without pulling it into `multidim-core` itself.

pub mod pixel;

pub use pixel::{Pixel, gradient};
