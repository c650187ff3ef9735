use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A dot detected in a raster: image position plus a detection strength.
///
/// Intensity is the inverted grayscale value at the detection site
/// (darker site = stronger detection) and is non-negative. Dots are only
/// ever produced by a detector; grid reconstruction keeps the position and
/// drops the intensity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub position: Point2<f32>,
    pub intensity: f32,
}

impl Dot {
    pub fn new(x: f32, y: f32, intensity: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            intensity,
        }
    }
}
