use std::sync::mpsc;

use vista_core::ingest::{LoadReporter, LoadStage};

use crate::messages::WorkerResult;

/// Load reporter that forwards stage transitions over an mpsc channel to the UI thread.
pub struct ChannelLoadReporter {
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
}

impl ChannelLoadReporter {
    pub fn new(tx: mpsc::Sender<WorkerResult>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }
}

impl LoadReporter for ChannelLoadReporter {
    fn begin_stage(&self, stage: LoadStage) {
        let _ = self.tx.send(WorkerResult::Stage { stage });
        self.ctx.request_repaint();
    }

    fn finished(&self, _stage: LoadStage) {
        // UI handles the terminal state via Loaded / Error
    }
}
