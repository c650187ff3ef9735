//! End-to-end helpers: raster -> dots -> grid -> symmetry report.
//!
//! The core stages never fail on degenerate input; the only fallible
//! surface is the raw-buffer boundary, where dimensions and buffer length
//! are validated before anything reaches the detector.

use dotgrid_core::{Dot, GrayImageView, Grid, DEFAULT_ROW_TOLERANCE};
use dotgrid_detect::{DetectorParams, DotDetector};
use dotgrid_symmetry::{PatternClass, SymmetryAnalyzer, SymmetryParams, SymmetryReport};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the raw-buffer pipeline entry points.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("invalid grayscale buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: usize, height: usize },
}

/// Parameters for a full pipeline run.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PipelineParams {
    pub detector: DetectorParams,
    /// Row-clustering tolerance handed to grid reconstruction, in pixels.
    pub row_tolerance: f32,
    pub symmetry: SymmetryParams,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            detector: DetectorParams::default(),
            row_tolerance: DEFAULT_ROW_TOLERANCE,
            symmetry: SymmetryParams::default(),
        }
    }
}

/// Everything one pipeline run produces.
#[derive(Clone, Debug)]
pub struct PatternAnalysis {
    /// Detected dots, strongest first.
    pub dots: Vec<Dot>,
    /// Grid reconstructed from the detected dots.
    pub grid: Grid,
    pub report: SymmetryReport,
    /// Fraction of the four symmetry tests that held.
    pub score: f32,
    pub class: PatternClass,
}

/// Detect dots in a grayscale raster.
pub fn detect_dots(img: &GrayImageView<'_>, params: &DetectorParams) -> Vec<Dot> {
    DotDetector::new(params.clone()).detect(img)
}

/// Validate a raw grayscale buffer and detect dots in it.
pub fn detect_dots_gray_u8(
    width: usize,
    height: usize,
    pixels: &[u8],
    params: &DetectorParams,
) -> Result<Vec<Dot>, PipelineError> {
    let view = validated_view(width, height, pixels)?;
    Ok(detect_dots(&view, params))
}

/// Analyze a grid that was built elsewhere (synthesized or reconstructed).
pub fn analyze_grid(grid: &Grid, params: &SymmetryParams) -> PatternAnalysis {
    let report = SymmetryAnalyzer::new(params.clone()).analyze(grid);
    let score = report.score();
    PatternAnalysis {
        dots: Vec::new(),
        grid: grid.clone(),
        report,
        score,
        class: PatternClass::from_score(score),
    }
}

/// Run the full pipeline on a grayscale raster view.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width, height = img.height))
)]
pub fn analyze_pattern(img: &GrayImageView<'_>, params: &PipelineParams) -> PatternAnalysis {
    let dots = detect_dots(img, &params.detector);
    let grid = Grid::from_dots(&dots, params.row_tolerance);
    let report = SymmetryAnalyzer::new(params.symmetry.clone()).analyze(&grid);
    let score = report.score();
    PatternAnalysis {
        dots,
        grid,
        report,
        score,
        class: PatternClass::from_score(score),
    }
}

/// Validate a raw grayscale buffer and run the full pipeline on it.
///
/// This is the boundary where malformed shapes are rejected; past it, the
/// core stages are total.
pub fn analyze_gray_u8(
    width: usize,
    height: usize,
    pixels: &[u8],
    params: &PipelineParams,
) -> Result<PatternAnalysis, PipelineError> {
    let view = validated_view(width, height, pixels)?;
    Ok(analyze_pattern(&view, params))
}

fn validated_view<'a>(
    width: usize,
    height: usize,
    pixels: &'a [u8],
) -> Result<GrayImageView<'a>, PipelineError> {
    let Some(expected) = width.checked_mul(height) else {
        return Err(PipelineError::InvalidGrayDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(PipelineError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    Ok(GrayImageView {
        width,
        height,
        data: pixels,
    })
}

/// Borrow an `image::GrayImage` as the lightweight core view type.
#[cfg(feature = "image")]
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Run the full pipeline on a decoded `image::GrayImage`.
#[cfg(feature = "image")]
pub fn analyze_image(img: &::image::GrayImage, params: &PipelineParams) -> PatternAnalysis {
    analyze_pattern(&gray_view(img), params)
}
