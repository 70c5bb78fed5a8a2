use std::time::Duration;

use vista_core::config::GuardrailConfig;
use vista_core::ingest::{ImageMetadata, ImageSource, LoadStage};
use vista_core::raster::RasterBuffer;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Run a full load. The UI sends at most one at a time.
    Load { source: ImageSource },

    /// Replace the guardrails and rebuild the working copy of the current image.
    SetConfig { config: GuardrailConfig },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    /// Load finished; `working` is what the viewport shows.
    Loaded {
        working: RasterBuffer,
        metadata: ImageMetadata,
        elapsed: Duration,
    },

    /// Working copy regenerated after a config change.
    WorkingRebuilt {
        working: RasterBuffer,
        metadata: ImageMetadata,
    },

    /// Stage transition during a load.
    Stage { stage: LoadStage },

    /// Guardrails read from a TOML file by the import dialog.
    ConfigImported { config: GuardrailConfig },

    /// A load ended in rejection or failure. Ends the busy state.
    LoadFailed {
        message: String,
    },

    /// Guardrail import, export or validation failed. Never affects a load
    /// in flight.
    ConfigError {
        message: String,
    },
    Log {
        message: String,
    },
}
