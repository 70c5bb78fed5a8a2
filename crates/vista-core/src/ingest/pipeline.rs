use image::ImageError;
use tracing::{debug, info, warn};

use crate::config::GuardrailConfig;
use crate::error::{Result, VistaError};
use crate::guardrail::{compute_working_size, ensure_within_limits, WorkingSize};
use crate::orientation::{is_jpeg, normalize, parse_orientation, OrientationCode};
use crate::raster::RasterBuffer;

use super::decode::{ImageCrateDecoder, RasterDecoder};
use super::source::{default_fetcher, resolve, Fetcher, ImageMime, ImageSource};
use super::types::{ImageMetadata, LoadReporter, LoadStage, LoadedImage, NoOpReporter};

/// Loads images into an upright `original` plus a display-sized `working`
/// copy.
///
/// Loads are synchronous and not coordinated: callers serialize them. A
/// failed load leaves the previously committed image untouched.
pub struct ImagePipeline {
    config: GuardrailConfig,
    decoder: Box<dyn RasterDecoder>,
    fetcher: Box<dyn Fetcher>,
    current: Option<LoadedImage>,
    stage: LoadStage,
}

impl ImagePipeline {
    pub fn new(config: GuardrailConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            decoder: Box::new(ImageCrateDecoder),
            fetcher: default_fetcher(),
            current: None,
            stage: LoadStage::Idle,
        })
    }

    pub fn with_decoder(mut self, decoder: Box<dyn RasterDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Box<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn config(&self) -> &GuardrailConfig {
        &self.config
    }

    /// Replace the guardrails and rebuild the working copy of the current
    /// image under the new display cap.
    pub fn set_config(&mut self, config: GuardrailConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.reset_working();
        Ok(())
    }

    /// Last stage reached by the most recent load.
    pub fn stage(&self) -> LoadStage {
        self.stage
    }

    pub fn current(&self) -> Option<&LoadedImage> {
        self.current.as_ref()
    }

    pub fn original(&self) -> Option<&RasterBuffer> {
        self.current.as_ref().map(|c| &c.original)
    }

    pub fn working(&self) -> Option<&RasterBuffer> {
        self.current.as_ref().map(|c| &c.working)
    }

    pub fn metadata(&self) -> Option<&ImageMetadata> {
        self.current.as_ref().map(|c| &c.metadata)
    }

    pub fn load(&mut self, source: ImageSource) -> Result<LoadedImage> {
        self.load_reported(source, &NoOpReporter)
    }

    pub fn load_reported(
        &mut self,
        source: ImageSource,
        reporter: &dyn LoadReporter,
    ) -> Result<LoadedImage> {
        let label = source.to_string();
        match self.ingest(source, reporter) {
            Ok(loaded) => {
                self.enter(LoadStage::Ready, reporter);
                info!(
                    source = %label,
                    width = loaded.metadata.width,
                    height = loaded.metadata.height,
                    orientation = loaded.metadata.orientation.value(),
                    downscaled = loaded.metadata.is_downscaled,
                    "Image loaded"
                );
                self.current = Some(loaded.clone());
                reporter.finished(LoadStage::Ready);
                Ok(loaded)
            }
            Err(e) => {
                let terminal = match e {
                    VistaError::TooLarge { .. } => LoadStage::Rejected,
                    _ => LoadStage::Failed,
                };
                self.stage = terminal;
                warn!(source = %label, error = %e, "Image load failed");
                reporter.finished(terminal);
                Err(e)
            }
        }
    }

    /// Rebuild `working` from the current `original` without re-decoding.
    pub fn reset_working(&mut self) -> Option<&RasterBuffer> {
        let config = self.config;
        let current = self.current.as_mut()?;
        let (working, size) = build_working(&current.original, &config);
        current.working = working;
        current.metadata.working_width = size.width;
        current.metadata.working_height = size.height;
        current.metadata.is_downscaled = size.is_downscaled();
        current.metadata.downscale_factor = size.factor;
        current.metadata.limits = config;
        info!(
            width = size.width,
            height = size.height,
            factor = size.factor,
            "Working copy rebuilt"
        );
        Some(&current.working)
    }

    fn enter(&mut self, stage: LoadStage, reporter: &dyn LoadReporter) {
        debug!(%stage, "Load stage");
        self.stage = stage;
        reporter.begin_stage(stage);
    }

    /// Runs every stage into locals; nothing is committed here.
    fn ingest(&mut self, source: ImageSource, reporter: &dyn LoadReporter) -> Result<LoadedImage> {
        let config = self.config;

        self.enter(LoadStage::Reading, reporter);
        let resolved = resolve(source, self.fetcher.as_ref())?;
        let mime = ImageMime::from_mime(&resolved.declared_mime).ok_or_else(|| {
            VistaError::UnsupportedFormat {
                mime: resolved.declared_mime.clone(),
            }
        })?;
        let bytes: &[u8] = &resolved.bytes;

        // Only the header is read here. Pixels are decoded once the size has
        // passed the pre-check.
        self.enter(LoadStage::Decoding, reporter);
        let (stored_w, stored_h) = self.decoder.dimensions(bytes, mime)?;

        self.enter(LoadStage::OrientationCheck, reporter);
        let orientation = if mime == ImageMime::Jpeg || is_jpeg(bytes) {
            parse_orientation(bytes).unwrap_or_else(|| {
                debug!("No usable EXIF orientation, assuming upright");
                OrientationCode::Upright
            })
        } else {
            OrientationCode::Upright
        };

        self.enter(LoadStage::HardLimitCheckPre, reporter);
        let (expected_w, expected_h) = orientation.oriented_dimensions(stored_w, stored_h);
        ensure_within_limits(expected_w, expected_h, &config)?;

        self.enter(LoadStage::Normalizing, reporter);
        let decoded = match self.decoder.decode(bytes, mime) {
            Err(VistaError::DecodeFailed {
                source: ImageError::Limits(_),
            }) => {
                return Err(VistaError::TooLarge {
                    width: expected_w,
                    height: expected_h,
                    limits: config,
                })
            }
            result => RasterBuffer::new(result?),
        };
        let original = normalize(&decoded, orientation);
        drop(decoded);

        self.enter(LoadStage::HardLimitCheckPost, reporter);
        ensure_within_limits(original.width(), original.height(), &config)?;

        self.enter(LoadStage::Downscaling, reporter);
        let (working, size) = build_working(&original, &config);

        let metadata = ImageMetadata {
            source_kind: resolved.kind,
            name: resolved.name,
            mime,
            width: original.width(),
            height: original.height(),
            orientation,
            byte_length: bytes.len(),
            working_width: size.width,
            working_height: size.height,
            is_downscaled: size.is_downscaled(),
            downscale_factor: size.factor,
            limits: config,
        };

        Ok(LoadedImage {
            original,
            working,
            metadata,
        })
    }
}

/// Working copy under the display cap. Without a downscale it shares
/// storage with `original` until either side is mutated.
fn build_working(original: &RasterBuffer, config: &GuardrailConfig) -> (RasterBuffer, WorkingSize) {
    let size = compute_working_size(original.width(), original.height(), config);
    (original.resized(size.width, size.height), size)
}
