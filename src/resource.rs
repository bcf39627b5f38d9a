use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::error::ResourceError;

/// A decoded raster image held as a row-major RGBA8 buffer.
///
/// The buffer always holds exactly `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageResource {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageResource {
    /// Wraps a raw RGBA buffer, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ResourceError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(ResourceError::DimensionsOverflow { width, height })?;
        if data.len() != expected {
            return Err(ResourceError::BufferMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Converts any decoded image to RGBA8.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.to_rgba8().into_raw(),
        }
    }

    /// Decodes an encoded image (PNG, JPEG, ...) held in memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(&img))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

impl From<RgbaImage> for ImageResource {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}
