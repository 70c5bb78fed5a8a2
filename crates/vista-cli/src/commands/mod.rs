pub mod config;
pub mod export;
pub mod info;
pub mod orientation;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use vista_core::config::GuardrailConfig;
use vista_core::ingest::{ImagePipeline, ImageSource, LoadReporter, LoadStage, LoadedImage};

/// Shows the current load stage on a spinner.
struct SpinnerReporter {
    pb: ProgressBar,
}

impl SpinnerReporter {
    fn new() -> Result<Self> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(80));
        Ok(Self { pb })
    }
}

impl LoadReporter for SpinnerReporter {
    fn begin_stage(&self, stage: LoadStage) {
        self.pb.set_message(stage.to_string());
    }

    fn finished(&self, _stage: LoadStage) {
        self.pb.finish_and_clear();
    }
}

/// Run one load with a progress spinner.
pub(crate) fn load_with_spinner(source: &str, config: GuardrailConfig) -> Result<LoadedImage> {
    let mut pipeline = ImagePipeline::new(config)?;
    let reporter = SpinnerReporter::new()?;
    let loaded = pipeline.load_reported(ImageSource::from_arg(source), &reporter)?;
    Ok(loaded)
}
