use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// A decoded RGBA8 pixel grid.
///
/// Cloning is cheap and shares storage. Mutation goes through
/// [`RasterBuffer::make_mut`], which copies the pixels first if any other
/// handle still shares them, so two buffers never observe each other's edits.
#[derive(Clone, Debug)]
pub struct RasterBuffer {
    pixels: Arc<RgbaImage>,
}

impl RasterBuffer {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Mutable access, copying the pixels first if they are shared.
    pub fn make_mut(&mut self) -> &mut RgbaImage {
        Arc::make_mut(&mut self.pixels)
    }

    /// Resampled copy at the given size (Catmull-Rom). Returns a shared
    /// handle when the size is unchanged.
    pub fn resized(&self, width: u32, height: u32) -> RasterBuffer {
        if self.dimensions() == (width, height) {
            return self.clone();
        }
        Self::new(imageops::resize(
            self.image(),
            width,
            height,
            FilterType::CatmullRom,
        ))
    }

    /// Whether both handles point at the same pixel storage.
    pub fn shares_storage(&self, other: &RasterBuffer) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl From<RgbaImage> for RasterBuffer {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels)
    }
}

impl PartialEq for RasterBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage(other)
            || (self.dimensions() == other.dimensions() && self.as_raw() == other.as_raw())
    }
}
