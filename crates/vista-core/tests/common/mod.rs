#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use vista_core::error::Result;
use vista_core::ingest::{FetchedBlob, Fetcher, ImageMime, RasterDecoder};
use vista_core::raster::RasterBuffer;

pub const TYPE_ASCII: u16 = 2;
pub const TYPE_SHORT: u16 = 3;
pub const TYPE_LONG: u16 = 4;

/// A raster where every pixel is distinct, so any misplaced pixel shows up.
pub fn patterned_raster(width: u32, height: u32) -> RasterBuffer {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([x as u8, y as u8, (x * 7 + y * 13) as u8, 255])
    });
    RasterBuffer::new(img)
}

/// Build a TIFF blob (as found after the `Exif\0\0` signature) with a single
/// IFD holding a `Make` entry followed by an orientation entry.
pub fn build_tiff(big_endian: bool, orientation: u16, field_type: u16, count: u32) -> Vec<u8> {
    let u16b = |v: u16| if big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
    let u32b = |v: u32| if big_endian { v.to_be_bytes() } else { v.to_le_bytes() };

    let mut tiff = Vec::new();
    tiff.extend_from_slice(if big_endian { b"MM" } else { b"II" });
    tiff.extend_from_slice(&u16b(42));
    tiff.extend_from_slice(&u32b(8));

    // IFD0 with two entries.
    tiff.extend_from_slice(&u16b(2));

    // Make = "Cam"
    tiff.extend_from_slice(&u16b(0x010F));
    tiff.extend_from_slice(&u16b(TYPE_ASCII));
    tiff.extend_from_slice(&u32b(4));
    tiff.extend_from_slice(b"Cam\0");

    // Orientation, value left-justified in the 4-byte field.
    tiff.extend_from_slice(&u16b(0x0112));
    tiff.extend_from_slice(&u16b(field_type));
    tiff.extend_from_slice(&u32b(count));
    tiff.extend_from_slice(&u16b(orientation));
    tiff.extend_from_slice(&[0, 0]);

    // Next IFD offset.
    tiff.extend_from_slice(&u32b(0));
    tiff
}

/// Wrap a payload in a JPEG marker segment.
pub fn segment(marker: u16, payload: &[u8]) -> Vec<u8> {
    let mut seg = marker.to_be_bytes().to_vec();
    seg.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    seg.extend_from_slice(payload);
    seg
}

pub fn exif_app1(tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    segment(0xFFE1, &payload)
}

/// SOI, an APP0 segment, an EXIF APP1 segment, a start-of-scan and EOI.
pub fn synthetic_jpeg(orientation: u16, big_endian: bool) -> Vec<u8> {
    synthetic_jpeg_with_tiff(&build_tiff(big_endian, orientation, TYPE_SHORT, 1))
}

pub fn synthetic_jpeg_with_tiff(tiff: &[u8]) -> Vec<u8> {
    let mut buf = vec![0xFF, 0xD8];
    buf.extend(segment(0xFFE0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"));
    buf.extend(exif_app1(tiff));
    buf.extend(segment(0xFFDA, &[0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]));
    buf.extend_from_slice(&[0x12, 0x34, 0xFF, 0xD9]);
    buf
}

/// Encode an RGB image of the given size as a real JPEG.
pub fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([120, 60, 30]),
    ));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg).expect("encode jpeg");
    out.into_inner()
}

/// Real JPEG with an EXIF orientation segment inserted after SOI.
pub fn encode_jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let jpeg = encode_jpeg(width, height);
    let mut out = jpeg[..2].to_vec();
    out.extend(exif_app1(&build_tiff(false, orientation, TYPE_SHORT, 1)));
    out.extend_from_slice(&jpeg[2..]);
    out
}

pub fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// Rewrite the IHDR width and height of an encoded PNG, leaving the pixel
/// data as it was. The chunk CRC is recomputed so the header still parses.
pub fn with_png_header_size(png: &[u8], width: u32, height: u32) -> Vec<u8> {
    assert_eq!(&png[12..16], b"IHDR");
    let mut out = png.to_vec();
    out[16..20].copy_from_slice(&width.to_be_bytes());
    out[20..24].copy_from_slice(&height.to_be_bytes());
    let crc = crc32(&out[12..29]);
    out[29..33].copy_from_slice(&crc.to_be_bytes());
    out
}

/// Bitwise CRC-32 (IEEE), as used by PNG chunks.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// Decoder that ignores the bytes and returns a blank raster of a fixed
/// size, for exercising large dimensions without encoding large files.
pub struct FixedSizeDecoder {
    pub width: u32,
    pub height: u32,
}

impl RasterDecoder for FixedSizeDecoder {
    fn dimensions(&self, _bytes: &[u8], _mime: ImageMime) -> Result<(u32, u32)> {
        Ok((self.width, self.height))
    }

    fn decode(&self, _bytes: &[u8], _mime: ImageMime) -> Result<RgbaImage> {
        Ok(RgbaImage::new(self.width, self.height))
    }
}

/// Fetcher that always answers with the same blob.
pub struct StubFetcher {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Fetcher for StubFetcher {
    fn fetch(&self, _url: &str) -> Result<FetchedBlob> {
        Ok(FetchedBlob {
            status: self.status,
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        })
    }
}
