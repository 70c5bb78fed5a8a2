use serde::Serialize;

use crate::config::GuardrailConfig;
use crate::orientation::OrientationCode;
use crate::raster::RasterBuffer;

use super::source::{ImageMime, SourceKind};

/// Ingestion stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStage {
    Idle,
    Reading,
    Decoding,
    OrientationCheck,
    HardLimitCheckPre,
    Normalizing,
    HardLimitCheckPost,
    Downscaling,
    Ready,
    Rejected,
    Failed,
}

impl LoadStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Rejected | Self::Failed)
    }
}

impl std::fmt::Display for LoadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Reading => write!(f, "Reading source"),
            Self::Decoding => write!(f, "Decoding"),
            Self::OrientationCheck => write!(f, "Reading orientation"),
            Self::HardLimitCheckPre => write!(f, "Checking size"),
            Self::Normalizing => write!(f, "Normalizing orientation"),
            Self::HardLimitCheckPost => write!(f, "Re-checking size"),
            Self::Downscaling => write!(f, "Preparing display copy"),
            Self::Ready => write!(f, "Ready"),
            Self::Rejected => write!(f, "Rejected"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Progress hooks for [`super::ImagePipeline::load_reported`].
///
/// All methods default to no-ops.
pub trait LoadReporter: Send + Sync {
    fn begin_stage(&self, _stage: LoadStage) {}

    fn finished(&self, _stage: LoadStage) {}
}

pub(super) struct NoOpReporter;
impl LoadReporter for NoOpReporter {}

/// Facts about one successful load. Replaced wholesale on the next load.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageMetadata {
    pub source_kind: SourceKind,
    pub name: Option<String>,
    pub mime: ImageMime,
    /// Upright full-resolution size.
    pub width: u32,
    pub height: u32,
    pub orientation: OrientationCode,
    pub byte_length: usize,
    pub working_width: u32,
    pub working_height: u32,
    pub is_downscaled: bool,
    pub downscale_factor: f64,
    pub limits: GuardrailConfig,
}

/// Output of a successful load.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    /// Upright, full resolution.
    pub original: RasterBuffer,
    /// Display copy, possibly downscaled. Mutating it never affects `original`.
    pub working: RasterBuffer,
    pub metadata: ImageMetadata,
}
