//! Reflective and rotational symmetry analysis for dot grids.
//!
//! A grid is tested against four transforms of itself — horizontal and
//! vertical reflection, quarter turn, half turn — using tolerance-based
//! coordinate equality. The fraction of tests that hold is the symmetry
//! score, which buckets the pattern into symmetric / tiling / freeform.
//!
//! Everything here is pure and total: no input, however degenerate or
//! ragged, produces an error. The worst case is an all-false report.

mod analyzer;
mod transforms;

pub use analyzer::{
    grids_equal, PatternClass, SymmetryAnalyzer, SymmetryParams, SymmetryReport,
    DEFAULT_TOLERANCE,
};
pub use transforms::{reflect_horizontal, reflect_vertical, rotate_180, rotate_90, transpose};
