use vista_core::geometry::Point;
use vista_core::viewport::ViewportEngine;

/// Viewport display state.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    pub engine: ViewportEngine,
    /// Image-space position of the pointer, last time it was over the image area.
    pub pointer_image: Option<Point>,
    pub show_debug: bool,
    /// Refit once the panel knows its size.
    pub fit_pending: bool,
}
