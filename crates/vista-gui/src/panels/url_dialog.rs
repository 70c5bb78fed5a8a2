use vista_core::ingest::ImageSource;

use crate::app::VistaApp;

pub fn show(ctx: &egui::Context, app: &mut VistaApp) {
    if !app.ui_state.show_url_dialog {
        return;
    }

    let mut open = true;
    let mut submit = false;
    egui::Window::new("Open URL")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut app.ui_state.url_input)
                    .hint_text("https://example.com/photo.jpg")
                    .desired_width(360.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            ui.add_space(4.0);
            let ready = !app.ui_state.url_input.trim().is_empty() && !app.ui_state.is_busy();
            if ui.add_enabled(ready, egui::Button::new("Load")).clicked() {
                submit = true;
            }
        });

    if submit {
        let url = app.ui_state.url_input.trim().to_string();
        if !url.is_empty() {
            app.request_load(ImageSource::Url(url));
            open = false;
        }
    }
    app.ui_state.show_url_dialog = open;
}
