//! Core types and utilities for dot-pattern analysis.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about image decoding or about any concrete dot detector; it provides the
//! value types the pipeline stages exchange (dots, grids, grayscale views)
//! and the grid construction routines.

mod dot;
mod grid;
mod image;
mod logger;

pub use dot::Dot;
pub use grid::{Grid, GridBounds, DEFAULT_ROW_TOLERANCE};
pub use image::{gray_from_rgb, GrayImage, GrayImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
