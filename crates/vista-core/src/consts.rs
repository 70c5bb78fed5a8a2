/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default soft cap per side for the working (display) raster.
pub const DEFAULT_DISPLAY_MAX_DIM: u32 = 6000;

/// Default absolute per-side cap. Larger images are rejected.
pub const DEFAULT_HARD_MAX_DIM: u32 = 12_000;

/// Default absolute area cap in pixels. Larger images are rejected.
pub const DEFAULT_HARD_MAX_PIXELS: u64 = 100_000_000;

/// `max_scale` is kept at least this multiple of `min_scale`.
pub const MAX_SCALE_MULTIPLIER: f64 = 8.0;

/// Zoom factor used by the step zoom operations (buttons/keyboard).
pub const ZOOM_STEP: f64 = 1.25;

/// Bytes per pixel of the RGBA8 rasters produced by decoding.
pub const RGBA_CHANNELS: usize = 4;
