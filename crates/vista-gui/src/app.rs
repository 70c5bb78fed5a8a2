use std::sync::mpsc;

use vista_core::config::GuardrailConfig;
use vista_core::guardrail::fit_within;
use vista_core::ingest::{ImageMetadata, ImageSource, LoadStage};
use vista_core::raster::RasterBuffer;

use crate::convert::raster_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportState};
use crate::worker;

pub struct VistaApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub config: GuardrailConfig,
    pub show_about: bool,
}

impl VistaApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let config = GuardrailConfig::default();
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone(), config);

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            config,
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Loaded {
                    working,
                    metadata,
                    elapsed,
                } => {
                    self.ui_state.loading_stage = None;
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{}, orientation {}) in {}",
                        metadata.name.as_deref().unwrap_or("image"),
                        metadata.width,
                        metadata.height,
                        metadata.orientation.value(),
                        format_duration(elapsed)
                    ));
                    if metadata.is_downscaled {
                        self.ui_state.add_log(format!(
                            "Display copy {}x{} ({:.1}%)",
                            metadata.working_width,
                            metadata.working_height,
                            metadata.downscale_factor * 100.0
                        ));
                    }
                    self.show_working(ctx, &working, metadata);
                }
                WorkerResult::WorkingRebuilt { working, metadata } => {
                    self.ui_state.add_log(format!(
                        "Display copy rebuilt at {}x{}",
                        metadata.working_width, metadata.working_height
                    ));
                    self.show_working(ctx, &working, metadata);
                }
                WorkerResult::Stage { stage } => {
                    self.ui_state.loading_stage = Some(stage);
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                }
                WorkerResult::LoadFailed { message } => {
                    self.ui_state.load_failed(&message);
                }
                WorkerResult::ConfigError { message } => {
                    self.ui_state.config_error(&message);
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Upload `working` and refit the viewport to it.
    ///
    /// The texture is shrunk to the GPU's side limit if needed. The engine
    /// still works in working-copy pixels.
    fn show_working(&mut self, ctx: &egui::Context, working: &RasterBuffer, metadata: ImageMetadata) {
        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        let fit = fit_within(working.width(), working.height(), max_side);
        let image = if fit.is_downscaled() {
            self.ui_state.add_log(format!(
                "Texture limited to {}x{} by the GPU",
                fit.width, fit.height
            ));
            raster_to_color_image(&working.resized(fit.width, fit.height))
        } else {
            raster_to_color_image(working)
        };
        let texture = ctx.load_texture("viewport", image, egui::TextureOptions::LINEAR);
        self.viewport.texture = Some(texture);
        self.viewport.pointer_image = None;
        self.viewport
            .engine
            .set_content_size(working.width() as f64, working.height() as f64);
        self.viewport.fit_pending = true;
        self.ui_state.metadata = Some(metadata);
    }

    /// Start a load unless one is already running.
    pub fn request_load(&mut self, source: ImageSource) {
        if self.ui_state.is_busy() {
            return;
        }
        self.ui_state.loading_stage = Some(LoadStage::Reading);
        self.send_command(WorkerCommand::Load { source });
    }

    pub fn apply_config(&mut self, config: GuardrailConfig) {
        self.config = config;
        self.send_command(WorkerCommand::SetConfig { config });
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for VistaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::url_dialog::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Vista")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Vista");
                        ui.label("Image Viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else {
        format!("{secs:.1}s")
    }
}
