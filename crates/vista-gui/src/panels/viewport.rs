use vista_core::geometry::{Affine, Point};
use vista_core::viewport::Surface;

use crate::app::VistaApp;

const SCROLL_ZOOM_RATE: f32 = 0.005;

/// Receives the engine's transform for the current frame.
struct PaintSurface {
    transform: Affine,
}

impl Surface for PaintSurface {
    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }
}

pub fn show(ctx: &egui::Context, app: &mut VistaApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let engine = &mut app.viewport.engine;
        engine.set_viewport_size(rect.width() as f64, rect.height() as f64);
        if app.viewport.fit_pending {
            engine.fit_contain();
            app.viewport.fit_pending = false;
        }

        let texture_id = app.viewport.texture.as_ref().map(|t| t.id());
        let Some(texture_id) = texture_id else {
            show_placeholder(ui, app.ui_state.is_busy());
            return;
        };

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        handle_zoom(ui, &response, app, rect);
        handle_pan(&response, app);
        handle_fit(ctx, ui, &response, app);
        track_pointer(&response, app, rect);

        let img_rect = compute_img_rect(app, rect);
        draw_image(ui, texture_id, img_rect, rect);

        if app.viewport.show_debug {
            draw_debug_overlay(ui, rect, app);
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn to_local(pos: egui::Pos2, rect: egui::Rect) -> Point {
    let v = pos - rect.min;
    Point::new(v.x as f64, v.y as f64)
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut VistaApp, rect: egui::Rect) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }

    // Zoom toward mouse cursor
    if let Some(mouse_pos) = response.hover_pos() {
        let factor = (scroll_delta * SCROLL_ZOOM_RATE).exp() as f64;
        app.viewport.engine.zoom_at(factor, to_local(mouse_pos, rect));
    }
}

fn handle_pan(response: &egui::Response, app: &mut VistaApp) {
    if response.dragged_by(egui::PointerButton::Primary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        let delta = response.drag_delta();
        app.viewport.engine.pan_by(delta.x as f64, delta.y as f64);
    }
}

fn handle_fit(ctx: &egui::Context, ui: &egui::Ui, response: &egui::Response, app: &mut VistaApp) {
    let key_fit = !ctx.wants_keyboard_input() && ui.input(|i| i.key_pressed(egui::Key::F));
    if response.double_clicked() || key_fit {
        app.viewport.engine.fit_contain();
    }
}

fn track_pointer(response: &egui::Response, app: &mut VistaApp, rect: egui::Rect) {
    if let Some(pos) = response.hover_pos() {
        app.viewport.pointer_image = Some(app.viewport.engine.to_image(to_local(pos, rect)));
    }
}

/// Screen rectangle of the whole image under the engine's current transform.
fn compute_img_rect(app: &VistaApp, rect: egui::Rect) -> egui::Rect {
    let engine = &app.viewport.engine;
    let mut surface = PaintSurface {
        transform: Affine::IDENTITY,
    };
    engine.apply_to_surface(&mut surface);

    let state = engine.state();
    let top_left = surface.transform.apply(Point::ORIGIN);
    let bottom_right = surface
        .transform
        .apply(Point::new(state.content_width, state.content_height));
    egui::Rect::from_min_max(
        rect.min + egui::vec2(top_left.x as f32, top_left.y as f32),
        rect.min + egui::vec2(bottom_right.x as f32, bottom_right.y as f32),
    )
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect, clip: egui::Rect) {
    ui.painter().with_clip_rect(clip).image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_debug_overlay(ui: &egui::Ui, rect: egui::Rect, app: &VistaApp) {
    let state = app.viewport.engine.state();
    let mut lines = vec![
        format!("scale {:.4} [{:.4}, {:.4}]", state.scale, state.min_scale, state.max_scale),
        format!("translate ({:.1}, {:.1})", state.translate_x, state.translate_y),
        format!("viewport {:.0}x{:.0}", state.viewport_width, state.viewport_height),
    ];
    if let Some(ref meta) = app.ui_state.metadata {
        lines.push(format!("image {}x{}", meta.width, meta.height));
        lines.push(format!("working {}x{}", meta.working_width, meta.working_height));
        lines.push(format!("orientation {}", meta.orientation));
        lines.push(format!("downscale {:.4}", meta.downscale_factor));
    }
    if let Some(p) = app.viewport.pointer_image {
        lines.push(format!("pointer ({:.1}, {:.1})", p.x, p.y));
    }

    ui.painter().text(
        rect.right_top() + egui::vec2(-8.0, 8.0),
        egui::Align2::RIGHT_TOP,
        lines.join("\n"),
        egui::FontId::monospace(12.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui, busy: bool) {
    let text = if busy { "Loading..." } else { "Open an image to begin" };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
