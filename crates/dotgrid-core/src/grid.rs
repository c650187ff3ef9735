use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::dot::Dot;

/// Default tolerance (pixels) when clustering detected points into rows.
pub const DEFAULT_ROW_TOLERANCE: f32 = 25.0;

/// Row-major arrangement of dot positions.
///
/// Rows are ordered top to bottom (ascending y), points within a row left to
/// right (ascending x). Rows may have unequal lengths: detection on real
/// images rarely yields a perfectly rectangular layout, so nothing here
/// assumes one. A non-empty grid never contains an empty row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: Vec<Vec<Point2<f32>>>,
}

/// Axis-aligned bounding box of a grid's points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl GridBounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

impl Grid {
    /// Perfectly regular grid: row `i`, column `j` sits at
    /// `(j * spacing, i * spacing)`.
    ///
    /// Zero rows or zero columns yields the empty grid, so the
    /// no-empty-rows invariant holds. Zero spacing collapses every row to a
    /// single location; degenerate, but accepted.
    pub fn regular(rows: usize, cols: usize, spacing: f32) -> Self {
        if rows == 0 || cols == 0 {
            return Self::default();
        }
        let rows = (0..rows)
            .map(|i| {
                (0..cols)
                    .map(|j| Point2::new(j as f32 * spacing, i as f32 * spacing))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Cluster an unordered point set into rows.
    ///
    /// Points are sorted by (y, x), then assigned single-pass to the first
    /// row whose anchor — the first point placed in that row — lies within
    /// `row_tolerance` in y. No match starts a new row. The scan is greedy
    /// and first-match-wins, so the result is deterministic for identical
    /// input but not a global optimum. Rows are finally x-sorted; every
    /// input point lands in exactly one row.
    pub fn from_points(points: &[Point2<f32>], row_tolerance: f32) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

        let mut rows: Vec<Vec<Point2<f32>>> = Vec::new();
        for point in sorted {
            match rows
                .iter_mut()
                .find(|row| (row[0].y - point.y).abs() <= row_tolerance)
            {
                Some(row) => row.push(point),
                None => rows.push(vec![point]),
            }
        }

        for row in &mut rows {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
        }

        Self { rows }
    }

    /// Reconstruction entry point for detector output; intensities are
    /// dropped, only positions are kept.
    pub fn from_dots(dots: &[Dot], row_tolerance: f32) -> Self {
        let points: Vec<Point2<f32>> = dots.iter().map(|d| d.position).collect();
        Self::from_points(&points, row_tolerance)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of points across all rows.
    pub fn point_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Bounding box over all points, `None` for the empty grid.
    pub fn bounds(&self) -> Option<GridBounds> {
        let mut points = self.rows.iter().flatten();
        let first = points.next()?;
        let mut b = GridBounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in points {
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    /// Translate the grid so its bounding box is centered in a
    /// `canvas_width` x `canvas_height` canvas.
    pub fn centered(&self, canvas_width: f32, canvas_height: f32) -> Self {
        let Some(b) = self.bounds() else {
            return self.clone();
        };
        let offset_x = (canvas_width - b.width()) / 2.0 - b.min_x;
        let offset_y = (canvas_height - b.height()) / 2.0 - b.min_y;
        self.map_points(|p| Point2::new(p.x + offset_x, p.y + offset_y))
    }

    /// Scale every coordinate by `factor` (about the origin).
    pub fn scaled(&self, factor: f32) -> Self {
        self.map_points(|p| Point2::new(p.x * factor, p.y * factor))
    }

    fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(&Point2<f32>) -> Point2<f32>,
    {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(&f).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pt(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    #[test]
    fn regular_grid_layout() {
        let grid = Grid::regular(2, 3, 50.0);
        assert_eq!(2, grid.rows.len());
        assert_eq!(3, grid.rows[0].len());
        assert_eq!(pt(100.0, 0.0), grid.rows[0][2]);
        assert_eq!(pt(0.0, 50.0), grid.rows[1][0]);
    }

    #[test]
    fn regular_grid_degenerate_counts() {
        assert!(Grid::regular(0, 5, 50.0).is_empty());
        assert!(Grid::regular(5, 0, 50.0).is_empty());
    }

    #[test]
    fn reconstruction_groups_rows_by_y() {
        let points = vec![
            pt(60.0, 12.0),
            pt(10.0, 10.0),
            pt(60.0, 52.0),
            pt(10.0, 48.0),
        ];
        let grid = Grid::from_points(&points, 25.0);

        assert_eq!(2, grid.rows.len());
        assert_eq!(vec![pt(10.0, 10.0), pt(60.0, 12.0)], grid.rows[0]);
        assert_eq!(vec![pt(10.0, 48.0), pt(60.0, 52.0)], grid.rows[1]);
    }

    #[test]
    fn reconstruction_keeps_every_point() {
        let points: Vec<_> = (0..23)
            .map(|i| pt((i * 31 % 97) as f32, (i * 17 % 83) as f32))
            .collect();
        let grid = Grid::from_points(&points, 25.0);
        assert_eq!(points.len(), grid.point_count());
    }

    #[test]
    fn reconstruction_anchor_is_first_placed_point() {
        // 0 and 24 cluster (|24 - 0| <= 25); 49 is outside the first row's
        // anchor tolerance even though it is within 25 of y = 24.
        let points = vec![pt(0.0, 0.0), pt(0.0, 24.0), pt(0.0, 49.0)];
        let grid = Grid::from_points(&points, 25.0);
        assert_eq!(2, grid.rows.len());
        assert_eq!(2, grid.rows[0].len());
        assert_eq!(1, grid.rows[1].len());
    }

    #[test]
    fn reconstruction_empty_input() {
        assert!(Grid::from_points(&[], 25.0).is_empty());
    }

    #[test]
    fn from_dots_drops_intensity() {
        let dots = [Dot::new(10.0, 10.0, 225.0), Dot::new(60.0, 12.0, 190.0)];
        let grid = Grid::from_dots(&dots, 25.0);
        assert_eq!(1, grid.rows.len());
        assert_eq!(vec![pt(10.0, 10.0), pt(60.0, 12.0)], grid.rows[0]);
    }

    #[test]
    fn bounds_cover_all_points() {
        let grid = Grid::from_points(&[pt(5.0, 7.0), pt(40.0, 9.0), pt(12.0, 90.0)], 25.0);
        let b = grid.bounds().unwrap();
        assert_eq!(5.0, b.min_x);
        assert_eq!(40.0, b.max_x);
        assert_eq!(7.0, b.min_y);
        assert_eq!(90.0, b.max_y);
        assert_relative_eq!(35.0, b.width());
        assert_relative_eq!(83.0, b.height());
    }

    #[test]
    fn empty_grid_has_no_bounds() {
        assert!(Grid::default().bounds().is_none());
    }

    #[test]
    fn centering_places_bounds_mid_canvas() {
        let grid = Grid::regular(3, 3, 50.0).centered(400.0, 400.0);
        let b = grid.bounds().unwrap();
        assert_relative_eq!(150.0, b.min_x);
        assert_relative_eq!(250.0, b.max_x);
        assert_relative_eq!(150.0, b.min_y);
        assert_relative_eq!(250.0, b.max_y);
    }

    #[test]
    fn scaling_multiplies_coordinates() {
        let grid = Grid::regular(2, 2, 10.0).scaled(2.5);
        assert_eq!(pt(25.0, 25.0), grid.rows[1][1]);
    }
}
