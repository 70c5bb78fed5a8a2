use crate::app::VistaApp;

pub fn show(ctx: &egui::Context, app: &mut VistaApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Load stages carry no item counts, so the bar is indeterminate.
        if let Some(stage) = app.ui_state.loading_stage {
            ui.add(
                egui::ProgressBar::new(0.0)
                    .text(format!("{stage}..."))
                    .animate(true),
            );
        } else {
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some(ref meta) = app.ui_state.metadata {
                ui.label(format!("{}x{}", meta.width, meta.height));
                ui.separator();
                ui.label(meta.mime.to_string());
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", app.viewport.engine.scale_percent()));
        });

        ui.add_space(2.0);
    });
}
