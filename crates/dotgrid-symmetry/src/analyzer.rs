use dotgrid_core::Grid;
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::transforms::{reflect_horizontal, reflect_vertical, rotate_180, rotate_90};

/// Default per-axis coordinate tolerance (pixels) for grid equality.
///
/// Absorbs detection jitter: a detected layout a few pixels off its ideal
/// positions still counts as coinciding with its own transform.
pub const DEFAULT_TOLERANCE: f32 = 15.0;

/// Score at or above which a pattern classifies as symmetric.
const SYMMETRIC_MIN_SCORE: f32 = 0.75;
/// Score at or above which a pattern classifies as tiling.
const TILING_MIN_SCORE: f32 = 0.25;

/// Tolerance-based structural equality of two grids.
///
/// Equal row count, equal per-row point counts, and every corresponding
/// coordinate pair within `tolerance` on each axis independently
/// (Chebyshev-style, not Euclidean). A difference of exactly `tolerance`
/// still passes.
pub fn grids_equal(a: &Grid, b: &Grid, tolerance: f32) -> bool {
    if a.rows.len() != b.rows.len() {
        return false;
    }
    a.rows.iter().zip(&b.rows).all(|(ra, rb)| {
        ra.len() == rb.len()
            && ra.iter().zip(rb).all(|(p, q)| {
                (p.x - q.x).abs() <= tolerance && (p.y - q.y).abs() <= tolerance
            })
    })
}

/// Outcome of the four symmetry tests on a grid.
///
/// Serializes with exactly these field names; the presentation layer
/// consumes the report as JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymmetryReport {
    pub horizontal_reflection: bool,
    pub vertical_reflection: bool,
    pub rotation_90: bool,
    pub rotation_180: bool,
}

impl SymmetryReport {
    /// Fraction of the four symmetries that hold, in `[0, 1]`.
    pub fn score(&self) -> f32 {
        let held = [
            self.horizontal_reflection,
            self.vertical_reflection,
            self.rotation_90,
            self.rotation_180,
        ]
        .iter()
        .filter(|&&flag| flag)
        .count();
        held as f32 / 4.0
    }
}

/// Coarse pattern bucket derived from the symmetry score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternClass {
    Symmetric,
    Tiling,
    Freeform,
}

impl PatternClass {
    /// Classify a symmetry score. The thresholds are fixed constants of the
    /// design, not tunable per call.
    pub fn from_score(score: f32) -> Self {
        if score >= SYMMETRIC_MIN_SCORE {
            Self::Symmetric
        } else if score >= TILING_MIN_SCORE {
            Self::Tiling
        } else {
            Self::Freeform
        }
    }

    pub fn from_report(report: &SymmetryReport) -> Self {
        Self::from_score(report.score())
    }
}

impl std::fmt::Display for PatternClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Symmetric => "symmetric",
            Self::Tiling => "tiling",
            Self::Freeform => "freeform",
        };
        f.write_str(name)
    }
}

/// Parameters for the symmetry analyzer.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SymmetryParams {
    /// Per-axis coordinate tolerance for the equality tests, in pixels.
    pub tolerance: f32,
}

impl Default for SymmetryParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Tests a grid against its own reflections and rotations.
///
/// Every code path is total: an empty grid short-circuits to the all-false
/// report, and the transforms are defined for any row/point arrangement, so
/// degenerate input degrades to "no symmetry" instead of failing.
pub struct SymmetryAnalyzer {
    params: SymmetryParams,
}

impl SymmetryAnalyzer {
    pub fn new(params: SymmetryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SymmetryParams {
        &self.params
    }

    /// Compare the grid against its four transforms.
    ///
    /// Pure and deterministic: identical input yields an identical report.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, grid), fields(rows = grid.rows.len()))
    )]
    pub fn analyze(&self, grid: &Grid) -> SymmetryReport {
        if grid.is_empty() {
            return SymmetryReport::default();
        }

        let tol = self.params.tolerance;
        let report = SymmetryReport {
            horizontal_reflection: grids_equal(grid, &reflect_horizontal(grid), tol),
            vertical_reflection: grids_equal(grid, &reflect_vertical(grid), tol),
            rotation_90: grids_equal(grid, &rotate_90(grid), tol),
            rotation_180: grids_equal(grid, &rotate_180(grid), tol),
        };
        debug!(
            "symmetry score {:.2} over {} points",
            report.score(),
            grid.point_count()
        );
        report
    }
}

impl Default for SymmetryAnalyzer {
    fn default() -> Self {
        Self::new(SymmetryParams::default())
    }
}
