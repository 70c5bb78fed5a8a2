use vista_core::ingest::{ImageMetadata, LoadStage};

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Stage of the load in flight (None = idle).
    pub loading_stage: Option<LoadStage>,

    /// Metadata of the image on screen.
    pub metadata: Option<ImageMetadata>,

    /// Log messages.
    pub log_messages: Vec<String>,

    /// Open URL dialog.
    pub show_url_dialog: bool,
    pub url_input: String,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.loading_stage.is_some()
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// The load in flight was rejected or failed.
    pub fn load_failed(&mut self, message: &str) {
        self.loading_stage = None;
        self.add_log(format!("ERROR: {message}"));
    }

    /// A guardrail file or setting could not be used. Leaves any load in
    /// flight running.
    pub fn config_error(&mut self, message: &str) {
        self.add_log(format!("ERROR: {message}"));
    }
}
