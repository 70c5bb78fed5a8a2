//! Pan/zoom state for showing a raster inside a display surface.
//!
//! Screen coordinates are `image * scale + translate`. Every mutating
//! operation leaves `min_scale <= scale <= max_scale` and keeps the content
//! from being panned out of view.

use serde::Serialize;
use tracing::debug;

use crate::consts::{MAX_SCALE_MULTIPLIER, ZOOM_STEP};
use crate::geometry::{Affine, Point};

/// A drawing target that accepts a current transform.
pub trait Surface {
    fn set_transform(&mut self, transform: Affine);
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ViewportState {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub content_width: f64,
    pub content_height: f64,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            viewport_width: 0.0,
            viewport_height: 0.0,
            content_width: 0.0,
            content_height: 0.0,
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            min_scale: 1.0,
            max_scale: MAX_SCALE_MULTIPLIER,
        }
    }
}

/// One per editing session; owned by whoever drives the display.
#[derive(Clone, Debug, Default)]
pub struct ViewportEngine {
    state: ViewportState,
}

impl ViewportEngine {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let mut engine = Self::default();
        engine.set_viewport_size(viewport_width, viewport_height);
        engine
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    pub fn min_scale(&self) -> f64 {
        self.state.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.state.max_scale
    }

    pub fn translate(&self) -> Point {
        Point::new(self.state.translate_x, self.state.translate_y)
    }

    /// Current scale relative to 1:1 pixels.
    pub fn scale_percent(&self) -> f64 {
        self.state.scale * 100.0
    }

    pub fn has_content(&self) -> bool {
        self.state.content_width > 0.0 && self.state.content_height > 0.0
    }

    /// Resize the display surface. Scale is kept unless it falls outside the
    /// new limits.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.state.viewport_width = sanitize_extent(width);
        self.state.viewport_height = sanitize_extent(height);
        self.recompute_limits();
        self.clamp_scale();
        self.clamp_pan();
    }

    /// Change the content size. Scale is raised to the new minimum if needed.
    ///
    /// `max_scale` restarts from the new content's minimum, so the zoom
    /// ceiling of a previous small image does not carry over.
    pub fn set_content_size(&mut self, width: f64, height: f64) {
        self.state.content_width = sanitize_extent(width);
        self.state.content_height = sanitize_extent(height);
        self.state.max_scale = MAX_SCALE_MULTIPLIER;
        self.recompute_limits();
        self.clamp_scale();
        self.clamp_pan();
        debug!(
            width = self.state.content_width,
            height = self.state.content_height,
            min_scale = self.state.min_scale,
            "Viewport content resized"
        );
    }

    /// Show the whole content, centred.
    pub fn fit_contain(&mut self) {
        let s = &mut self.state;
        s.scale = s.min_scale;
        s.translate_x = (s.viewport_width - s.content_width * s.scale) / 2.0;
        s.translate_y = (s.viewport_height - s.content_height * s.scale) / 2.0;
    }

    /// Multiply the scale by `factor`, keeping the image point under
    /// `screen` fixed. Returns whether the scale changed.
    ///
    /// Zero, negative and non-finite factors are ignored.
    pub fn zoom_at(&mut self, factor: f64, screen: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let anchor = self.to_image(screen);
        let s = &mut self.state;
        let new_scale = (s.scale * factor).clamp(s.min_scale, s.max_scale);
        if new_scale == s.scale {
            return false;
        }
        s.scale = new_scale;
        s.translate_x = screen.x - anchor.x * new_scale;
        s.translate_y = screen.y - anchor.y * new_scale;
        self.clamp_pan();
        true
    }

    /// Zoom in one step about the viewport centre.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(ZOOM_STEP, self.viewport_center())
    }

    /// Zoom out one step about the viewport centre.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(1.0 / ZOOM_STEP, self.viewport_center())
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if (dx == 0.0 && dy == 0.0) || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.state.translate_x += dx;
        self.state.translate_y += dy;
        self.clamp_pan();
    }

    /// Centre any axis where the scaled content fits; otherwise keep the
    /// content edges from crossing into the viewport.
    pub fn clamp_pan(&mut self) {
        let s = &mut self.state;
        s.translate_x = clamp_axis(s.translate_x, s.viewport_width, s.content_width * s.scale);
        s.translate_y = clamp_axis(s.translate_y, s.viewport_height, s.content_height * s.scale);
    }

    pub fn to_screen(&self, image: Point) -> Point {
        Point::new(
            image.x * self.state.scale + self.state.translate_x,
            image.y * self.state.scale + self.state.translate_y,
        )
    }

    pub fn to_image(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.state.translate_x) / self.state.scale,
            (screen.y - self.state.translate_y) / self.state.scale,
        )
    }

    /// `(scale, 0, 0, scale, translate_x, translate_y)`.
    pub fn transform(&self) -> Affine {
        Affine::scale_translate(self.state.scale, self.state.translate_x, self.state.translate_y)
    }

    pub fn apply_to_surface(&self, surface: &mut dyn Surface) {
        surface.set_transform(self.transform());
    }

    pub fn reset_surface(surface: &mut dyn Surface) {
        surface.set_transform(Affine::IDENTITY);
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.state.viewport_width / 2.0, self.state.viewport_height / 2.0)
    }

    fn recompute_limits(&mut self) {
        let s = &mut self.state;
        s.min_scale = fit_scale(
            s.viewport_width,
            s.viewport_height,
            s.content_width,
            s.content_height,
        );
        s.max_scale = s.max_scale.max(s.min_scale * MAX_SCALE_MULTIPLIER);
    }

    fn clamp_scale(&mut self) {
        let s = &mut self.state;
        s.scale = s.scale.clamp(s.min_scale, s.max_scale);
    }
}

/// Largest scale at which the content fits, or 1 for degenerate sizes.
fn fit_scale(viewport_w: f64, viewport_h: f64, content_w: f64, content_h: f64) -> f64 {
    if viewport_w <= 0.0 || viewport_h <= 0.0 || content_w <= 0.0 || content_h <= 0.0 {
        return 1.0;
    }
    (viewport_w / content_w).min(viewport_h / content_h)
}

fn clamp_axis(translate: f64, viewport: f64, scaled_content: f64) -> f64 {
    if scaled_content <= viewport {
        (viewport - scaled_content) / 2.0
    } else {
        translate.clamp(viewport - scaled_content, 0.0)
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
