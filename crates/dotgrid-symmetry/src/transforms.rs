//! Grid transforms used by the symmetry tests.
//!
//! Each transform is a pure function producing a new grid. Reflections and
//! rotations combine an index permutation (row/point reversal, transpose)
//! with the matching isometry of the grid's bounding box applied to the
//! coordinates, so a symmetric dot layout maps onto itself
//! coordinate-for-coordinate.
//!
//! All coordinate maps keep the bounding box anchored at its original
//! minimum corner. For coordinates that are exactly representable (pixel
//! positions, regular syntheses) the reflections are exact involutions.

use dotgrid_core::Grid;
use nalgebra::Point2;

/// Flip top to bottom: reverse row order, mirror y across the bounding box.
pub fn reflect_horizontal(grid: &Grid) -> Grid {
    let Some(b) = grid.bounds() else {
        return grid.clone();
    };
    let sum_y = b.min_y + b.max_y;
    Grid {
        rows: grid
            .rows
            .iter()
            .rev()
            .map(|row| {
                row.iter()
                    .map(|p| Point2::new(p.x, sum_y - p.y))
                    .collect()
            })
            .collect(),
    }
}

/// Flip left to right: reverse each row, mirror x across the bounding box.
pub fn reflect_vertical(grid: &Grid) -> Grid {
    let Some(b) = grid.bounds() else {
        return grid.clone();
    };
    let sum_x = b.min_x + b.max_x;
    Grid {
        rows: grid
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .rev()
                    .map(|p| Point2::new(sum_x - p.x, p.y))
                    .collect()
            })
            .collect(),
    }
}

/// Index transpose, defined for ragged grids: output row `c` collects
/// `rows[r][c]` from every input row that reaches column `c`, in increasing
/// `r` order. Coordinates are untouched; this is the building block for the
/// quarter turn, not a symmetry test on its own.
pub fn transpose(grid: &Grid) -> Grid {
    let max_cols = grid.rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows = Vec::with_capacity(max_cols);
    for col in 0..max_cols {
        let column: Vec<Point2<f32>> = grid
            .rows
            .iter()
            .filter_map(|row| row.get(col).copied())
            .collect();
        if !column.is_empty() {
            rows.push(column);
        }
    }
    Grid { rows }
}

/// Quarter turn: transpose, reverse each resulting row, and rotate the
/// coordinates 90° about the bounding box (anchored at its minimum corner).
pub fn rotate_90(grid: &Grid) -> Grid {
    let Some(b) = grid.bounds() else {
        return grid.clone();
    };
    let transposed = transpose(grid);
    Grid {
        rows: transposed
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .rev()
                    .map(|p| Point2::new(b.min_x + (b.max_y - p.y), b.min_y + (p.x - b.min_x)))
                    .collect()
            })
            .collect(),
    }
}

/// Half turn, defined as two quarter turns.
pub fn rotate_180(grid: &Grid) -> Grid {
    rotate_90(&rotate_90(grid))
}
