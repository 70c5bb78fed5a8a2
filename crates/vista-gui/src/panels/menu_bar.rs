use std::path::Path;

use anyhow::{Context, Result};
use vista_core::config::GuardrailConfig;
use vista_core::ingest::ImageSource;

use crate::app::VistaApp;
use crate::messages::WorkerResult;

pub fn show(ctx: &egui::Context, app: &mut VistaApp) {
    let busy = app.ui_state.is_busy();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui
                    .add_enabled(
                        !busy,
                        egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    open_file(app);
                }

                if ui.add_enabled(!busy, egui::Button::new("Open URL...")).clicked() {
                    ui.close();
                    app.ui_state.show_url_dialog = true;
                }

                ui.separator();

                if ui.add_enabled(!busy, egui::Button::new("Import Guardrails...")).clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Guardrails...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.add(egui::Button::new("Fit").shortcut_text("F")).clicked() {
                    ui.close();
                    app.viewport.engine.fit_contain();
                }
                if ui.button("Zoom In").clicked() {
                    ui.close();
                    app.viewport.engine.zoom_in();
                }
                if ui.button("Zoom Out").clicked() {
                    ui.close();
                    app.viewport.engine.zoom_out();
                }
                ui.separator();
                ui.checkbox(&mut app.viewport.show_debug, "Debug Overlay");
            });

            ui.menu_button("Edit", |ui| {
                if ui.add_enabled(!busy, egui::Button::new("Reset Guardrails")).clicked() {
                    ui.close();
                    app.apply_config(GuardrailConfig::default());
                    app.ui_state.add_log("Guardrails reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) && !busy {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Picks on the UI thread so the busy flag is set before the next frame.
fn open_file(app: &mut VistaApp) {
    if let Some(path) = rfd::FileDialog::new()
        .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
        .add_filter("All files", &["*"])
        .pick_file()
    {
        app.request_load(ImageSource::File(path));
    }
}

fn import_config(app: &mut VistaApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
            return;
        };
        let result = match read_config(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::ConfigError {
                message: format!("{e:#}"),
            },
        };
        let _ = result_tx.send(result);
    });
}

fn export_config(app: &mut VistaApp) {
    let config = app.config;
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("vista_guardrails.toml")
            .save_file()
        {
            let result = match write_config(&path, &config) {
                Ok(()) => WorkerResult::Log {
                    message: format!("Guardrails saved to {}", path.display()),
                },
                Err(e) => WorkerResult::ConfigError {
                    message: format!("{e:#}"),
                },
            };
            let _ = result_tx.send(result);
        }
    });
}

fn read_config(path: &Path) -> Result<GuardrailConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: GuardrailConfig = toml::from_str(&content).context("Invalid guardrail config")?;
    config.validate()?;
    Ok(config)
}

fn write_config(path: &Path, config: &GuardrailConfig) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
