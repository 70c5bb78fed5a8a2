use approx::assert_abs_diff_eq;

use vista_core::geometry::{Affine, Point};
use vista_core::viewport::{Surface, ViewportEngine};

const EPS: f64 = 1e-9;

fn engine_with(vw: f64, vh: f64, cw: f64, ch: f64) -> ViewportEngine {
    let mut e = ViewportEngine::new(vw, vh);
    e.set_content_size(cw, ch);
    e.fit_contain();
    e
}

/// Check the scale bounds and the pan clamp post-condition.
fn assert_invariants(e: &ViewportEngine) {
    let s = e.state();
    assert!(s.min_scale <= s.max_scale, "{s:?}");
    assert!(s.scale >= s.min_scale - EPS && s.scale <= s.max_scale + EPS, "{s:?}");

    for (t, view, content) in [
        (s.translate_x, s.viewport_width, s.content_width * s.scale),
        (s.translate_y, s.viewport_height, s.content_height * s.scale),
    ] {
        if content <= view {
            assert!((t - (view - content) / 2.0).abs() < 1e-6, "not centred: {s:?}");
        } else {
            assert!(t <= EPS && t >= view - content - EPS, "out of bounds: {s:?}");
        }
    }
}

/// Small deterministic generator so the sequence test is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[derive(Default)]
struct RecordingSurface {
    transform: Option<Affine>,
}

impl Surface for RecordingSurface {
    fn set_transform(&mut self, transform: Affine) {
        self.transform = Some(transform);
    }
}

// ---------------------------------------------------------------------------
// Fit and limits
// ---------------------------------------------------------------------------

#[test]
fn test_fit_contain_landscape() {
    let e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    assert_abs_diff_eq!(e.scale(), 0.2, epsilon = 1e-9);
    assert_abs_diff_eq!(e.min_scale(), 0.2, epsilon = 1e-9);
    assert_abs_diff_eq!(e.translate().x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(e.translate().y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_fit_contain_centres_short_axis() {
    let e = engine_with(800.0, 600.0, 1000.0, 1000.0);
    assert_abs_diff_eq!(e.scale(), 0.6, epsilon = 1e-9);
    assert_abs_diff_eq!(e.translate().x, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(e.translate().y, 0.0, epsilon = 1e-9);
    assert_invariants(&e);
}

#[test]
fn test_small_content_scales_up_to_fit() {
    let e = engine_with(800.0, 600.0, 100.0, 50.0);
    assert_abs_diff_eq!(e.min_scale(), 8.0, epsilon = 1e-9);
    assert!(e.max_scale() >= 64.0);
}

#[test]
fn test_degenerate_sizes_use_unit_min_scale() {
    let mut e = ViewportEngine::new(800.0, 600.0);
    assert_abs_diff_eq!(e.min_scale(), 1.0, epsilon = 1e-9);
    e.set_content_size(0.0, 100.0);
    assert_abs_diff_eq!(e.min_scale(), 1.0, epsilon = 1e-9);
    e.set_content_size(f64::NAN, 100.0);
    assert_abs_diff_eq!(e.min_scale(), 1.0, epsilon = 1e-9);
    assert!(!e.has_content());
    assert_invariants(&e);
}

#[test]
fn test_max_scale_kept_across_viewport_resize() {
    let mut e = engine_with(800.0, 600.0, 100.0, 100.0);
    let high = e.max_scale();
    e.set_viewport_size(200.0, 150.0);
    assert!(e.max_scale() >= high);
    assert!(e.max_scale() >= 8.0 * e.min_scale());
    assert_invariants(&e);
}

#[test]
fn test_max_scale_resets_with_new_content() {
    // A 10x10 icon fitted into 800x600 allows 480x zoom.
    let mut e = engine_with(800.0, 600.0, 10.0, 10.0);
    assert_abs_diff_eq!(e.max_scale(), 480.0, epsilon = 1e-9);
    e.zoom_at(1000.0, Point::new(400.0, 300.0));
    assert_abs_diff_eq!(e.scale(), 480.0, epsilon = 1e-9);

    // The next, much larger image must not inherit that ceiling.
    e.set_content_size(8000.0, 6000.0);
    assert_abs_diff_eq!(e.min_scale(), 0.1, epsilon = 1e-9);
    assert_abs_diff_eq!(e.max_scale(), 8.0, epsilon = 1e-9);
    assert!(e.scale() <= e.max_scale());
    assert_invariants(&e);
}

#[test]
fn test_content_change_raises_scale_to_new_minimum() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    assert_abs_diff_eq!(e.scale(), 0.2, epsilon = 1e-9);
    e.set_content_size(400.0, 300.0);
    assert_abs_diff_eq!(e.min_scale(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(e.scale(), 2.0, epsilon = 1e-9);
    assert_invariants(&e);
}

#[test]
fn test_viewport_resize_keeps_scale() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    e.zoom_at(2.0, Point::new(400.0, 300.0));
    let before = e.scale();
    e.set_viewport_size(1000.0, 700.0);
    assert_abs_diff_eq!(e.scale(), before, epsilon = 1e-9);
    assert_invariants(&e);
}

#[test]
fn test_viewport_growth_raises_scale_to_minimum() {
    let mut e = engine_with(400.0, 300.0, 4000.0, 3000.0);
    assert_abs_diff_eq!(e.scale(), 0.1, epsilon = 1e-9);
    e.set_viewport_size(800.0, 600.0);
    assert_abs_diff_eq!(e.scale(), 0.2, epsilon = 1e-9);
    assert_invariants(&e);
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_preserves_anchor() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    let cursor = Point::new(250.0, 410.0);
    let before = e.to_image(cursor);
    assert!(e.zoom_at(3.0, cursor));
    let after = e.to_image(cursor);
    assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-9);
    assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-9);
    assert_abs_diff_eq!(e.scale(), 0.6, epsilon = 1e-9);
    assert_invariants(&e);
}

#[test]
fn test_repeated_zoom_preserves_anchor() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    e.zoom_at(4.0, Point::new(400.0, 300.0));
    let cursor = Point::new(123.0, 456.0);
    for factor in [1.1, 1.3, 0.9, 1.7, 0.8] {
        let before = e.to_image(cursor);
        e.zoom_at(factor, cursor);
        let after = e.to_image(cursor);
        assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-6);
        assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-6);
    }
}

#[test]
fn test_zoom_clamped_to_limits() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    e.zoom_at(1e6, Point::new(10.0, 10.0));
    assert_abs_diff_eq!(e.scale(), e.max_scale(), epsilon = 1e-9);
    e.zoom_at(1e-6, Point::new(10.0, 10.0));
    assert_abs_diff_eq!(e.scale(), e.min_scale(), epsilon = 1e-9);
    assert_invariants(&e);
}

#[test]
fn test_zoom_at_limit_is_noop() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    let before = *e.state();
    assert!(!e.zoom_at(0.5, Point::new(100.0, 100.0)));
    assert_eq!(*e.state(), before);
}

#[test]
fn test_invalid_zoom_factors_ignored() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    let before = *e.state();
    for factor in [0.0, -2.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(!e.zoom_at(factor, Point::new(100.0, 100.0)));
        assert_eq!(*e.state(), before);
    }
}

#[test]
fn test_step_zoom_round_trip() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    assert!(e.zoom_in());
    assert_abs_diff_eq!(e.scale(), 0.25, epsilon = 1e-9);
    assert!(e.zoom_out());
    assert_abs_diff_eq!(e.scale(), 0.2, epsilon = 1e-9);
    assert_abs_diff_eq!(e.scale_percent(), 20.0, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Pan
// ---------------------------------------------------------------------------

#[test]
fn test_pan_when_zoomed() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    e.zoom_at(2.0, Point::new(0.0, 0.0));
    assert_abs_diff_eq!(e.translate().x, 0.0, epsilon = 1e-9);
    e.pan_by(-100.0, -50.0);
    assert_abs_diff_eq!(e.translate().x, -100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(e.translate().y, -50.0, epsilon = 1e-9);
}

#[test]
fn test_pan_clamped_at_edges() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    e.zoom_at(2.0, Point::new(0.0, 0.0));
    // Scaled content is 1600x1200.
    e.pan_by(500.0, 500.0);
    assert_abs_diff_eq!(e.translate().x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(e.translate().y, 0.0, epsilon = 1e-9);
    e.pan_by(-5000.0, -5000.0);
    assert_abs_diff_eq!(e.translate().x, -800.0, epsilon = 1e-9);
    assert_abs_diff_eq!(e.translate().y, -600.0, epsilon = 1e-9);
}

#[test]
fn test_pan_ignored_when_content_fits() {
    let mut e = engine_with(800.0, 600.0, 1000.0, 1000.0);
    e.pan_by(50.0, 50.0);
    assert_abs_diff_eq!(e.translate().x, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(e.translate().y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_zero_and_non_finite_pan_ignored() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    e.zoom_at(2.0, Point::new(400.0, 300.0));
    let before = *e.state();
    e.pan_by(0.0, 0.0);
    e.pan_by(f64::NAN, 1.0);
    e.pan_by(1.0, f64::INFINITY);
    assert_eq!(*e.state(), before);
}

// ---------------------------------------------------------------------------
// Coordinate mapping
// ---------------------------------------------------------------------------

#[test]
fn test_to_screen_to_image_inverse() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    e.zoom_at(3.7, Point::new(321.0, 123.0));
    e.pan_by(-42.5, 17.25);
    for p in [
        Point::new(0.0, 0.0),
        Point::new(3999.0, 2999.0),
        Point::new(-50.5, 12.25),
        Point::new(1234.567, 89.01),
    ] {
        let back = e.to_image(e.to_screen(p));
        assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-6);
        assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-6);
    }
}

#[test]
fn test_transform_matches_to_screen() {
    let mut e = engine_with(800.0, 600.0, 4000.0, 3000.0);
    e.zoom_at(2.5, Point::new(200.0, 100.0));
    let t = e.transform();
    assert_eq!(t.b, 0.0);
    assert_eq!(t.c, 0.0);
    let p = Point::new(77.0, 11.0);
    let (a, b) = (t.apply(p), e.to_screen(p));
    assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
    assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
}

#[test]
fn test_apply_and_reset_surface() {
    let e = engine_with(800.0, 600.0, 1000.0, 1000.0);
    let mut surface = RecordingSurface::default();
    e.apply_to_surface(&mut surface);
    assert_eq!(surface.transform, Some(e.transform()));
    ViewportEngine::reset_surface(&mut surface);
    assert_eq!(surface.transform, Some(Affine::IDENTITY));
}

// ---------------------------------------------------------------------------
// Invariants over operation sequences
// ---------------------------------------------------------------------------

#[test]
fn test_random_operation_sequences_hold_invariants() {
    let mut rng = Lcg(0x5eed);
    for _ in 0..50 {
        let mut e = ViewportEngine::new(1.0 + rng.next_f64() * 1500.0, 1.0 + rng.next_f64() * 1000.0);
        e.set_content_size(1.0 + rng.next_f64() * 8000.0, 1.0 + rng.next_f64() * 8000.0);
        assert_invariants(&e);

        for _ in 0..200 {
            match (rng.next_f64() * 5.0) as u32 {
                0 => e.set_viewport_size(1.0 + rng.next_f64() * 1500.0, 1.0 + rng.next_f64() * 1000.0),
                1 => e.set_content_size(1.0 + rng.next_f64() * 8000.0, 1.0 + rng.next_f64() * 8000.0),
                2 => {
                    let screen = Point::new(rng.next_f64() * 1500.0, rng.next_f64() * 1000.0);
                    e.zoom_at(0.25 + rng.next_f64() * 3.0, screen);
                }
                3 => e.pan_by((rng.next_f64() - 0.5) * 4000.0, (rng.next_f64() - 0.5) * 4000.0),
                _ => e.fit_contain(),
            }
            assert_invariants(&e);

            let p = Point::new(rng.next_f64() * 5000.0, rng.next_f64() * 5000.0);
            let back = e.to_image(e.to_screen(p));
            assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6);
        }
    }
}
