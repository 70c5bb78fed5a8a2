mod common;

use image::Rgba;
use vista_core::geometry::Point;
use vista_core::orientation::{normalize, normalize_inverse, OrientationCode};

use common::patterned_raster;

#[test]
fn test_upright_returns_same_buffer() {
    let raster = patterned_raster(5, 3);
    let out = normalize(&raster, OrientationCode::Upright);
    assert!(out.shares_storage(&raster));
    assert_eq!(out.dimensions(), (5, 3));
}

#[test]
fn test_output_dimensions() {
    let raster = patterned_raster(5, 3);
    for code in OrientationCode::ALL {
        let out = normalize(&raster, code);
        let expected = if code.swaps_axes() { (3, 5) } else { (5, 3) };
        assert_eq!(out.dimensions(), expected, "code {code}");
    }
}

#[test]
fn test_swapping_codes_are_the_rotation_family() {
    for code in OrientationCode::ALL {
        assert_eq!(code.swaps_axes(), code.value() >= 5, "code {code}");
    }
}

#[test]
fn test_round_trip_every_code() {
    for (w, h) in [(5, 3), (4, 4), (1, 7), (300, 250)] {
        let raster = patterned_raster(w, h);
        for code in OrientationCode::ALL {
            let stored = normalize_inverse(&raster, code);
            let upright = normalize(&stored, code);
            assert_eq!(upright, raster, "code {code} at {w}x{h}");
        }
    }
}

#[test]
fn test_inverse_pairs() {
    assert_eq!(OrientationCode::Rotate90.inverse(), OrientationCode::Rotate270);
    assert_eq!(OrientationCode::Rotate270.inverse(), OrientationCode::Rotate90);
    for code in [
        OrientationCode::Upright,
        OrientationCode::MirrorHorizontal,
        OrientationCode::Rotate180,
        OrientationCode::MirrorVertical,
        OrientationCode::Transpose,
        OrientationCode::Transverse,
    ] {
        assert_eq!(code.inverse(), code);
    }
}

#[test]
fn test_source_is_not_modified() {
    let raster = patterned_raster(6, 4);
    let before = raster.as_raw().to_vec();
    for code in OrientationCode::ALL {
        let _ = normalize(&raster, code);
    }
    assert_eq!(raster.as_raw(), before.as_slice());
}

/// Where the source's top-left pixel lands for each code, on a 3x2 source.
#[test]
fn test_top_left_pixel_destination() {
    let raster = patterned_raster(3, 2);
    let marker = *raster.image().get_pixel(0, 0);
    let cases = [
        (OrientationCode::Upright, (0, 0)),
        (OrientationCode::MirrorHorizontal, (2, 0)),
        (OrientationCode::Rotate180, (2, 1)),
        (OrientationCode::MirrorVertical, (0, 1)),
        (OrientationCode::Transpose, (0, 0)),
        (OrientationCode::Rotate90, (1, 0)),
        (OrientationCode::Transverse, (1, 2)),
        (OrientationCode::Rotate270, (0, 2)),
    ];
    for (code, (x, y)) in cases {
        let out = normalize(&raster, code);
        assert_eq!(*out.image().get_pixel(x, y), marker, "code {code}");
    }
}

#[test]
fn test_rotate90_moves_rows_to_columns() {
    // 3x2 source:
    //   a b c
    //   d e f
    // rotated 90 clockwise (2x3):
    //   d a
    //   e b
    //   f c
    let raster = patterned_raster(3, 2);
    let src = raster.image();
    let out = normalize(&raster, OrientationCode::Rotate90);
    let dst = out.image();
    assert_eq!(dst.get_pixel(0, 0), src.get_pixel(0, 1));
    assert_eq!(dst.get_pixel(1, 0), src.get_pixel(0, 0));
    assert_eq!(dst.get_pixel(0, 2), src.get_pixel(2, 1));
    assert_eq!(dst.get_pixel(1, 2), src.get_pixel(2, 0));
}

#[test]
fn test_transform_table_maps_corners_inside() {
    let (w, h) = (7u32, 3u32);
    for code in OrientationCode::ALL {
        let t = code.transform(w, h);
        let (dw, dh) = code.oriented_dimensions(w, h);
        for corner in [
            Point::new(0.0, 0.0),
            Point::new(w as f64, 0.0),
            Point::new(0.0, h as f64),
            Point::new(w as f64, h as f64),
        ] {
            let p = t.apply(corner);
            assert!(p.x >= 0.0 && p.x <= dw as f64, "code {code}: {p:?}");
            assert!(p.y >= 0.0 && p.y <= dh as f64, "code {code}: {p:?}");
        }
    }
}

#[test]
fn test_large_raster_uses_same_mapping() {
    // Above the parallel threshold.
    let raster = patterned_raster(400, 300);
    let out = normalize(&raster, OrientationCode::Rotate270);
    assert_eq!(out.dimensions(), (300, 400));
    // Top-right of the source ends at top-left of the destination.
    assert_eq!(out.image().get_pixel(0, 0), raster.image().get_pixel(399, 0));
    // Bottom-right of the destination comes from source (0, 299).
    assert_eq!(*out.image().get_pixel(299, 399), Rgba([0, 43, 47, 255]));
}
