use image::RgbaImage;
use rayon::prelude::*;

use crate::consts::{PARALLEL_PIXEL_THRESHOLD, RGBA_CHANNELS};
use crate::geometry::{Affine, Point};
use crate::raster::RasterBuffer;

use super::code::OrientationCode;

/// Produce an upright raster from one stored with orientation `code`.
///
/// `Upright` returns the input handle itself. Every other code draws the
/// source into a freshly allocated buffer under the table transform for
/// that code; the source is never modified.
pub fn normalize(raster: &RasterBuffer, code: OrientationCode) -> RasterBuffer {
    if code.is_upright() {
        return raster.clone();
    }
    let (width, height) = raster.dimensions();
    let (dst_w, dst_h) = code.oriented_dimensions(width, height);
    let forward = code.transform(width, height);
    RasterBuffer::new(draw_transformed(raster.image(), &forward, dst_w, dst_h))
}

/// Apply the inverse of `code`, i.e. turn an upright raster back into one
/// that `normalize(_, code)` would correct.
pub fn normalize_inverse(raster: &RasterBuffer, code: OrientationCode) -> RasterBuffer {
    normalize(raster, code.inverse())
}

/// Draw `src` into a `dst_w x dst_h` buffer where `forward` maps source
/// coordinates to destination coordinates.
///
/// Each destination pixel centre is pulled back through the inverse
/// transform and sampled nearest-neighbour. For the orientation table every
/// centre lands exactly on a source centre, so the copy is lossless.
fn draw_transformed(src: &RgbaImage, forward: &Affine, dst_w: u32, dst_h: u32) -> RgbaImage {
    let mut out = RgbaImage::new(dst_w, dst_h);
    let Some(inverse) = forward.invert() else {
        return out;
    };
    if dst_w == 0 || dst_h == 0 || src.width() == 0 || src.height() == 0 {
        return out;
    }

    let row_len = dst_w as usize * RGBA_CHANNELS;
    let dst: &mut [u8] = &mut out;

    if dst_w as usize * dst_h as usize >= PARALLEL_PIXEL_THRESHOLD {
        dst.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| fill_row(src, &inverse, y, row));
    } else {
        for (y, row) in dst.chunks_mut(row_len).enumerate() {
            fill_row(src, &inverse, y, row);
        }
    }

    out
}

fn fill_row(src: &RgbaImage, inverse: &Affine, y: usize, row: &mut [u8]) {
    let src_w = src.width();
    let src_h = src.height();
    let raw = src.as_raw();
    let cy = y as f64 + 0.5;

    for (x, px) in row.chunks_exact_mut(RGBA_CHANNELS).enumerate() {
        let p = inverse.apply(Point::new(x as f64 + 0.5, cy));
        let sx = (p.x.floor().max(0.0) as u32).min(src_w - 1);
        let sy = (p.y.floor().max(0.0) as u32).min(src_h - 1);
        let offset = (sy as usize * src_w as usize + sx as usize) * RGBA_CHANNELS;
        px.copy_from_slice(&raw[offset..offset + RGBA_CHANNELS]);
    }
}
