use palette::Srgb;

use crate::resource::ImageResource;

/// Only every `PIXEL_STRIDE`-th pixel is read.
pub const PIXEL_STRIDE: usize = 10;

/// Pixels whose alpha is below this are treated as transparent and skipped.
pub const ALPHA_THRESHOLD: u8 = 128;

/// An opaque pixel read by the sampler.
pub type ColorSample = Srgb<u8>;

/// Strided walk over an RGBA buffer in raster order.
///
/// Yields one [`ColorSample`] per visited pixel whose alpha reaches
/// [`ALPHA_THRESHOLD`]. The walk is single pass and consumes itself.
#[derive(Debug)]
pub struct PixelSampler<'a> {
    data: &'a [u8],
    offset: usize,
    visited: usize,
}

impl<'a> PixelSampler<'a> {
    pub fn new(resource: &'a ImageResource) -> Self {
        Self::from_raw(resource.as_raw())
    }

    /// Samples a raw RGBA buffer. A trailing partial pixel is never read.
    pub fn from_raw(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            visited: 0,
        }
    }

    /// Number of strided offsets walked so far, opaque or not.
    pub fn visited(&self) -> usize {
        self.visited
    }
}

impl Iterator for PixelSampler<'_> {
    type Item = ColorSample;

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset + 4 <= self.data.len() {
            let px = &self.data[self.offset..self.offset + 4];
            self.offset += PIXEL_STRIDE * 4;
            self.visited += 1;

            if px[3] < ALPHA_THRESHOLD {
                continue;
            }
            return Some(Srgb::new(px[0], px[1], px[2]));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(pixels: usize, rgba: [u8; 4]) -> Vec<u8> {
        rgba.iter().copied().cycle().take(pixels * 4).collect()
    }

    #[test]
    fn visits_every_tenth_pixel() {
        let data = solid(25, [9, 8, 7, 255]);
        let mut sampler = PixelSampler::from_raw(&data);
        let samples: Vec<_> = sampler.by_ref().collect();
        // offsets 0, 40, 80 -> pixels 0, 10, 20
        assert_eq!(samples.len(), 3);
        assert_eq!(sampler.visited(), 3);
        assert_eq!(samples[0], Srgb::new(9, 8, 7));
    }

    #[test]
    fn skips_translucent_pixels() {
        let mut data = solid(20, [0, 0, 0, 255]);
        data[3] = 127;
        let mut sampler = PixelSampler::from_raw(&data);
        assert_eq!(sampler.by_ref().count(), 1);
        assert_eq!(sampler.visited(), 2);
    }

    #[test]
    fn alpha_threshold_is_inclusive() {
        let data = solid(1, [1, 2, 3, ALPHA_THRESHOLD]);
        assert_eq!(PixelSampler::from_raw(&data).count(), 1);
    }

    #[test]
    fn fully_transparent_image_yields_nothing() {
        let data = solid(100, [255, 255, 255, 0]);
        let mut sampler = PixelSampler::from_raw(&data);
        assert!(sampler.next().is_none());
        assert_eq!(sampler.visited(), 10);
    }
}
