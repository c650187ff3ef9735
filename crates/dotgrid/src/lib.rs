//! High-level facade crate for the `dotgrid-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - end-to-end pipeline helpers that run dot detection, grid
//!   reconstruction, and symmetry analysis in one call, from a raw
//!   grayscale buffer or (feature `image`) an `image::GrayImage`.
//!
//! ## Quickstart
//!
//! ```no_run
//! use dotgrid::pipeline::{analyze_image, PipelineParams};
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("pattern.png")?.decode()?.to_luma8();
//! let analysis = analyze_image(&img, &PipelineParams::default());
//! println!("{} dots, class {}", analysis.dots.len(), analysis.class);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `dotgrid::core`: core types (dots, grids, grayscale views, logger).
//! - `dotgrid::detect`: dot detection in grayscale rasters.
//! - `dotgrid::symmetry`: grid transforms, symmetry report, classification.
//! - `dotgrid::pipeline`: end-to-end helpers and boundary validation.

pub use dotgrid_core as core;
pub use dotgrid_detect as detect;
pub use dotgrid_symmetry as symmetry;

pub use dotgrid_core::{Dot, GrayImage, GrayImageView, Grid, GridBounds, DEFAULT_ROW_TOLERANCE};
pub use dotgrid_detect::{DetectorParams, DotDetector};
pub use dotgrid_symmetry::{
    PatternClass, SymmetryAnalyzer, SymmetryParams, SymmetryReport, DEFAULT_TOLERANCE,
};

pub mod pipeline;
