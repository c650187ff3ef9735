use serde::{Deserialize, Serialize};

/// Parameters for the raster dot scan.
///
/// Defaults are calibrated for hand-photographed patterns downscaled to a
/// few hundred pixels per side, with dots a handful of pixels across.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DetectorParams {
    /// Pixels skipped between scan positions, in both axes.
    pub scan_stride: usize,

    /// Band excluded from each raster edge, in pixels.
    pub edge_margin: usize,

    /// Grayscale value below which a pixel counts as dark.
    pub darkness_threshold: u8,

    /// Half-width of the square neighborhood inspected around a candidate.
    pub neighborhood_radius: i32,

    /// A candidate needs strictly more than this many dark pixels in its
    /// neighborhood (the candidate itself included) to survive.
    pub min_dark_neighbors: usize,

    /// Minimum Euclidean distance between two accepted dots, in pixels.
    pub min_distance: f32,

    /// Keep at most this many dots after ranking, strongest first.
    pub max_dots: usize,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            scan_stride: 5,
            edge_margin: 10,
            darkness_threshold: 100,
            neighborhood_radius: 5,
            min_dark_neighbors: 20,
            min_distance: 20.0,
            max_dots: 50,
        }
    }
}
