//! Minimal JPEG/EXIF reader that extracts only the orientation tag.
//!
//! Every failure (bad signature, truncated segment, malformed entry) yields
//! `None`. Callers treat `None` as [`OrientationCode::Upright`].

use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use tracing::debug;

use super::code::OrientationCode;

const MARKER_SOI: u16 = 0xFFD8;
const MARKER_EOI: u16 = 0xFFD9;
const MARKER_SOS: u16 = 0xFFDA;
const MARKER_APP1: u16 = 0xFFE1;

const EXIF_SIGNATURE: &[u8; 6] = b"Exif\0\0";
const TIFF_MAGIC: u16 = 42;
const TAG_ORIENTATION: u16 = 0x0112;
const TYPE_SHORT: u16 = 3;
const IFD_ENTRY_SIZE: u64 = 12;

/// Whether the buffer starts with the JPEG start-of-image marker.
pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && BigEndian::read_u16(&bytes[..2]) == MARKER_SOI
}

/// Scan JPEG marker segments for an EXIF block and return its orientation.
pub fn parse_orientation(bytes: &[u8]) -> Option<OrientationCode> {
    let mut cursor = Cursor::new(bytes);
    if cursor.read_u16::<BigEndian>().ok()? != MARKER_SOI {
        return None;
    }

    loop {
        let marker = cursor.read_u16::<BigEndian>().ok()?;
        if marker == MARKER_SOS || marker == MARKER_EOI {
            return None;
        }

        let length_pos = cursor.position() as usize;
        let length = cursor.read_u16::<BigEndian>().ok()? as usize;
        // The length counts its own two bytes.
        if length < 2 {
            return None;
        }
        let segment_end = length_pos + length;

        if marker == MARKER_APP1 {
            let payload = bytes.get(length_pos + 2..segment_end)?;
            if let Some(tiff) = payload.strip_prefix(EXIF_SIGNATURE.as_slice()) {
                let found = parse_tiff(tiff);
                debug!(orientation = ?found, "EXIF block found");
                return found;
            }
        }

        cursor.set_position(segment_end as u64);
    }
}

fn parse_tiff(tiff: &[u8]) -> Option<OrientationCode> {
    match tiff.get(..2)? {
        b"II" => read_orientation_entry::<LittleEndian>(tiff),
        b"MM" => read_orientation_entry::<BigEndian>(tiff),
        _ => None,
    }
}

fn read_orientation_entry<B: ByteOrder>(tiff: &[u8]) -> Option<OrientationCode> {
    let mut cursor = Cursor::new(tiff);
    cursor.set_position(2);
    if cursor.read_u16::<B>().ok()? != TIFF_MAGIC {
        return None;
    }

    let ifd_offset = cursor.read_u32::<B>().ok()?;
    cursor.set_position(ifd_offset as u64);
    let entry_count = cursor.read_u16::<B>().ok()?;

    for _ in 0..entry_count {
        let entry_start = cursor.position();
        let tag = cursor.read_u16::<B>().ok()?;
        if tag == TAG_ORIENTATION {
            let field_type = cursor.read_u16::<B>().ok()?;
            let count = cursor.read_u32::<B>().ok()?;
            if field_type != TYPE_SHORT || count != 1 {
                return None;
            }
            let value = cursor.read_u16::<B>().ok()?;
            return OrientationCode::new(value);
        }
        cursor.set_position(entry_start + IFD_ENTRY_SIZE);
    }

    None
}
