use std::io::Cursor;

use image::{ImageReader, RgbaImage};

use crate::error::{Result, VistaError};

use super::source::ImageMime;

/// Byte-to-raster decoding capability.
pub trait RasterDecoder: Send + Sync {
    /// Stored width and height, read from the header without decoding pixels.
    fn dimensions(&self, bytes: &[u8], mime: ImageMime) -> Result<(u32, u32)>;

    /// Decode to RGBA8 without applying any embedded orientation.
    fn decode(&self, bytes: &[u8], mime: ImageMime) -> Result<RgbaImage>;
}

/// Decoder backed by the `image` crate's JPEG, PNG and WebP codecs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateDecoder;

impl RasterDecoder for ImageCrateDecoder {
    fn dimensions(&self, bytes: &[u8], mime: ImageMime) -> Result<(u32, u32)> {
        ImageReader::with_format(Cursor::new(bytes), mime.image_format())
            .into_dimensions()
            .map_err(|source| VistaError::DecodeFailed { source })
    }

    fn decode(&self, bytes: &[u8], mime: ImageMime) -> Result<RgbaImage> {
        image::load_from_memory_with_format(bytes, mime.image_format())
            .map(|img| img.into_rgba8())
            .map_err(|source| VistaError::DecodeFailed { source })
    }
}
