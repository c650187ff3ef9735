/// Borrowed view over a row-major grayscale raster, one byte per pixel.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned grayscale raster.
#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl<'a> GrayImageView<'a> {
    /// Pixel value at signed coordinates, `None` outside the raster.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.data[y as usize * self.width + x as usize])
    }

    /// Pixel value at in-range coordinates.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

impl GrayImage {
    /// Raster of the given size, filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn as_view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }
}

/// Reduce interleaved RGB data to grayscale by the channel mean.
///
/// Returns `None` when the buffer length does not match `width * height * 3`.
/// The mean reduction (not a luma weighting) is what the upstream capture
/// path feeds the detector, so thresholds are calibrated against it.
pub fn gray_from_rgb(width: usize, height: usize, rgb: &[u8]) -> Option<GrayImage> {
    let expected = width.checked_mul(height)?.checked_mul(3)?;
    if rgb.len() != expected {
        return None;
    }
    let data = rgb
        .chunks_exact(3)
        .map(|px| ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8)
        .collect();
    Some(GrayImage {
        width,
        height,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_bounds_checks() {
        let img = GrayImage::filled(4, 3, 200);
        let view = img.as_view();
        assert_eq!(Some(200), view.get(0, 0));
        assert_eq!(Some(200), view.get(3, 2));
        assert_eq!(None, view.get(-1, 0));
        assert_eq!(None, view.get(4, 0));
        assert_eq!(None, view.get(0, 3));
    }

    #[test]
    fn set_and_pixel_round_trip() {
        let mut img = GrayImage::filled(5, 5, 255);
        img.set(2, 3, 40);
        assert_eq!(40, img.as_view().pixel(2, 3));
    }

    #[test]
    fn rgb_mean_reduction() {
        let rgb = [30u8, 60, 90, 255, 255, 255];
        let gray = gray_from_rgb(2, 1, &rgb).unwrap();
        assert_eq!(vec![60, 255], gray.data);
    }

    #[test]
    fn rgb_rejects_bad_length() {
        assert!(gray_from_rgb(2, 2, &[0u8; 11]).is_none());
    }
}
