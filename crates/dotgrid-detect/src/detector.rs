use dotgrid_core::{Dot, GrayImageView};
use log::{debug, warn};
use nalgebra::{distance, Point2};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::params::DetectorParams;

const GRAY_MAX: f32 = 255.0;

/// Dot detector: strided scan for dark local minima with density filtering
/// and greedy minimum-distance suppression.
pub struct DotDetector {
    params: DetectorParams,
}

impl DotDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Scan a grayscale raster for dot-like features.
    ///
    /// The returned dots are ordered by descending intensity, no two of
    /// them closer than `min_distance`, and at most `max_dots` long.
    /// Zero-sized or malformed input yields an empty list, never an error.
    ///
    /// The scan is strictly sequential in row-major order: the local-minimum
    /// tie-break (an equal-intensity neighbor does not unseat a candidate)
    /// and the suppression pass (a candidate is rejected against already
    /// accepted dots, never revisited) both depend on that order.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width, height = img.height))
    )]
    pub fn detect(&self, img: &GrayImageView<'_>) -> Vec<Dot> {
        let p = &self.params;

        if img.width == 0 || img.height == 0 {
            return Vec::new();
        }
        if img.data.len() != img.width * img.height {
            warn!(
                "raster buffer length {} does not match {}x{}; skipping detection",
                img.data.len(),
                img.width,
                img.height
            );
            return Vec::new();
        }

        let stride = p.scan_stride.max(1);
        let x_end = img.width.saturating_sub(p.edge_margin);
        let y_end = img.height.saturating_sub(p.edge_margin);

        let mut dots: Vec<Dot> = Vec::new();
        for y in (p.edge_margin..y_end).step_by(stride) {
            for x in (p.edge_margin..x_end).step_by(stride) {
                let gray = img.pixel(x, y);
                if gray >= p.darkness_threshold {
                    continue;
                }

                // Inspect the square neighborhood: the candidate must be the
                // darkest pixel in it (ties kept), and enough of it must be
                // dark to rule out an isolated noise pixel. The candidate
                // itself counts toward the tally.
                let mut is_minimum = true;
                let mut dark_neighbors = 0usize;
                let r = p.neighborhood_radius;
                for dy in -r..=r {
                    for dx in -r..=r {
                        let Some(value) = img.get(x as i32 + dx, y as i32 + dy) else {
                            continue;
                        };
                        if value < gray {
                            is_minimum = false;
                        }
                        if value < p.darkness_threshold {
                            dark_neighbors += 1;
                        }
                    }
                }

                if !is_minimum || dark_neighbors <= p.min_dark_neighbors {
                    continue;
                }

                let position = Point2::new(x as f32, y as f32);
                let crowded = dots
                    .iter()
                    .any(|dot| distance(&dot.position, &position) < p.min_distance);
                if crowded {
                    continue;
                }

                dots.push(Dot {
                    position,
                    intensity: GRAY_MAX - gray as f32,
                });
            }
        }

        debug!("accepted {} dots before ranking", dots.len());

        // Stable sort: equal intensities keep scan order.
        dots.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
        dots.truncate(p.max_dots);
        dots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotgrid_core::GrayImage;

    /// Stamp a dark disk onto a light raster.
    fn stamp_disk(img: &mut GrayImage, cx: usize, cy: usize, radius: i32, value: u8) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let x = cx as i32 + dx;
                let y = cy as i32 + dy;
                if x >= 0 && y >= 0 && (x as usize) < img.width && (y as usize) < img.height {
                    img.set(x as usize, y as usize, value);
                }
            }
        }
    }

    fn raster_with_disks(width: usize, height: usize, centers: &[(usize, usize)]) -> GrayImage {
        let mut img = GrayImage::filled(width, height, 230);
        for &(cx, cy) in centers {
            stamp_disk(&mut img, cx, cy, 4, 30);
        }
        img
    }

    #[test]
    fn finds_disks_on_scan_lattice() {
        // Centers sit on the default scan lattice (margin 10, stride 5).
        let centers = [(20, 20), (60, 20), (20, 60), (60, 60)];
        let img = raster_with_disks(100, 100, &centers);
        let detector = DotDetector::new(DetectorParams::default());

        let dots = detector.detect(&img.as_view());
        assert_eq!(centers.len(), dots.len());
        for &(cx, cy) in &centers {
            assert!(dots
                .iter()
                .any(|d| d.position.x == cx as f32 && d.position.y == cy as f32));
        }
        for dot in &dots {
            assert_eq!(225.0, dot.intensity);
        }
    }

    #[test]
    fn empty_raster_yields_no_dots() {
        let detector = DotDetector::new(DetectorParams::default());
        let img = GrayImage::filled(0, 0, 0);
        assert!(detector.detect(&img.as_view()).is_empty());
    }

    #[test]
    fn blank_raster_yields_no_dots() {
        let detector = DotDetector::new(DetectorParams::default());
        let img = GrayImage::filled(120, 120, 230);
        assert!(detector.detect(&img.as_view()).is_empty());
    }

    #[test]
    fn malformed_buffer_yields_no_dots() {
        let detector = DotDetector::new(DetectorParams::default());
        let img = GrayImage::filled(50, 50, 30);
        let view = GrayImageView {
            width: 50,
            height: 60, // lies about its size
            data: &img.data,
        };
        assert!(detector.detect(&view).is_empty());
    }

    #[test]
    fn isolated_dark_pixel_is_rejected() {
        let mut img = GrayImage::filled(100, 100, 230);
        img.set(40, 40, 30); // single pixel, fails the density filter
        let detector = DotDetector::new(DetectorParams::default());
        assert!(detector.detect(&img.as_view()).is_empty());
    }

    #[test]
    fn close_pair_is_suppressed_to_one_dot() {
        // Two disks 10 px apart: both pass the local checks, the second is
        // suppressed by the 20 px minimum distance.
        let img = raster_with_disks(100, 100, &[(40, 40), (50, 40)]);
        let detector = DotDetector::new(DetectorParams::default());
        let dots = detector.detect(&img.as_view());
        assert_eq!(1, dots.len());
    }

    #[test]
    fn pairwise_distance_invariant_holds() {
        let centers: Vec<(usize, usize)> = (0..6)
            .flat_map(|i| (0..6).map(move |j| (20 + 25 * i, 20 + 25 * j)))
            .collect();
        let img = raster_with_disks(200, 200, &centers);
        let detector = DotDetector::new(DetectorParams::default());
        let dots = detector.detect(&img.as_view());

        assert!(!dots.is_empty());
        for (i, a) in dots.iter().enumerate() {
            for b in &dots[i + 1..] {
                assert!(distance(&a.position, &b.position) >= detector.params().min_distance);
            }
        }
    }

    #[test]
    fn ranking_keeps_strongest_dots() {
        let mut img = GrayImage::filled(160, 100, 230);
        stamp_disk(&mut img, 30, 50, 4, 60); // weaker
        stamp_disk(&mut img, 80, 50, 4, 20); // strongest
        stamp_disk(&mut img, 130, 50, 4, 40);

        let params = DetectorParams {
            max_dots: 2,
            ..Default::default()
        };
        let detector = DotDetector::new(params);
        let dots = detector.detect(&img.as_view());

        assert_eq!(2, dots.len());
        assert_eq!(235.0, dots[0].intensity);
        assert_eq!(215.0, dots[1].intensity);
    }

    #[test]
    fn detection_is_deterministic() {
        let img = raster_with_disks(150, 150, &[(25, 25), (75, 25), (25, 75), (75, 75)]);
        let detector = DotDetector::new(DetectorParams::default());
        let first = detector.detect(&img.as_view());
        let second = detector.detect(&img.as_view());
        assert_eq!(first, second);
    }
}
