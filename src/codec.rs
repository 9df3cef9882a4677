//! Binary meta file layout and the two conversions built on it.
//!
//! Layout (little-endian throughout):
//!
//! ```text
//! offset 0   version      [10 bytes, ASCII, NUL-padded]
//! offset 10  meta_count   [u32]
//! offset 14  record[0]    [40 bytes]
//! ...
//! total = 14 + 40 * meta_count
//! ```
//!
//! Each record is `tile_hash:u32`, three RGBA colours (`4 x u8` each), five
//! z-order `u32`s (`bg_for_z`, `bg_back_z`, `win_z`, `obj_z`, `obj_behind_z`)
//! and `flags:u32`.
use serde_json::Value;

use crate::error::MetaError;
use crate::record::{records_from_value, Color, MetaRecord};

pub const VERSION_SIZE: usize = 10;
pub const COUNT_SIZE: usize = 4;
pub const HEADER_SIZE: usize = VERSION_SIZE + COUNT_SIZE;
/// tile_hash + 3 colours + 5 z values + flags.
pub const RECORD_SIZE: usize = 4 + 3 * 4 + 5 * 4 + 4;
pub const SUPPORTED_VERSION: &str = "0_1_0";

/// Total file size for `meta_count` records.
pub fn expected_size(meta_count: u32) -> u64 {
    HEADER_SIZE as u64 + meta_count as u64 * RECORD_SIZE as u64
}

/// Decode a complete meta file into its records, in file order.
pub fn decode(bytes: &[u8]) -> Result<Vec<MetaRecord>, MetaError> {
    if bytes.len() < HEADER_SIZE {
        return Err(MetaError::TruncatedInput { need: HEADER_SIZE, got: bytes.len() });
    }
    let field = &bytes[..VERSION_SIZE];
    let version = read_version(field)?;
    if version != SUPPORTED_VERSION {
        return Err(MetaError::UnsupportedVersion(version.to_string()));
    }
    // Non-zero padding would not survive re-encoding.
    if field[version.len()..].iter().any(|&b| b != 0) {
        return Err(MetaError::UnsupportedVersion(field.escape_ascii().to_string()));
    }

    let meta_count = read_u32(bytes, VERSION_SIZE);
    let expected = expected_size(meta_count);
    if bytes.len() as u64 != expected {
        return Err(MetaError::SizeMismatch { actual: bytes.len(), expected });
    }

    Ok(bytes[HEADER_SIZE..].chunks_exact(RECORD_SIZE).map(unpack_record).collect())
}

/// Encode records into a complete meta file.
pub fn encode(records: &[MetaRecord]) -> Result<Vec<u8>, MetaError> {
    let count = u32::try_from(records.len())
        .map_err(|_| MetaError::SchemaError(format!("too many meta entries ({})", records.len())))?;
    let mut out = Vec::with_capacity(HEADER_SIZE + records.len() * RECORD_SIZE);
    out.extend_from_slice(&pack_version(SUPPORTED_VERSION)?);
    out.extend_from_slice(&count.to_le_bytes());
    for r in records {
        pack_record(&mut out, r);
    }
    Ok(out)
}

/// Validate a loosely typed text document and encode it.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, MetaError> {
    encode(&records_from_value(value)?)
}

/// Binary to pretty-printed JSON text.
pub fn bin_to_text(bytes: &[u8]) -> Result<String, MetaError> {
    let records = decode(bytes)?;
    Ok(serde_json::to_string_pretty(&records)?)
}

/// JSON text to binary.
pub fn text_to_bin(text: &str) -> Result<Vec<u8>, MetaError> {
    let value: Value = serde_json::from_str(text)?;
    encode_value(&value)
}

/// Version is the bytes before the first NUL.
fn read_version(field: &[u8]) -> Result<&str, MetaError> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let raw = &field[..end];
    if !raw.is_ascii() { return Err(MetaError::InvalidEncoding); }
    std::str::from_utf8(raw).map_err(|_| MetaError::InvalidEncoding)
}

/// Fixed-width version field. The string must leave room for a NUL terminator.
fn pack_version(version: &str) -> Result<[u8; VERSION_SIZE], MetaError> {
    let b = version.as_bytes();
    if !version.is_ascii() || b.len() >= VERSION_SIZE {
        return Err(MetaError::VersionTooLong(version.to_string()));
    }
    let mut field = [0u8; VERSION_SIZE];
    field[..b.len()].copy_from_slice(b);
    Ok(field)
}

fn read_u32(b: &[u8], off: usize) -> u32 {
    let mut tmp = [0u8; 4];
    tmp.copy_from_slice(&b[off..off + 4]);
    u32::from_le_bytes(tmp)
}

fn read_color(b: &[u8], off: usize) -> Color {
    let mut c = [0u8; 4];
    c.copy_from_slice(&b[off..off + 4]);
    c
}

fn unpack_record(b: &[u8]) -> MetaRecord {
    MetaRecord {
        tile_hash: read_u32(b, 0),
        bg_color: read_color(b, 4),
        win_color: read_color(b, 8),
        obj_color: read_color(b, 12),
        bg_for_z: read_u32(b, 16),
        bg_back_z: read_u32(b, 20),
        win_z: read_u32(b, 24),
        obj_z: read_u32(b, 28),
        obj_behind_z: read_u32(b, 32),
        flags: read_u32(b, 36),
    }
}

fn pack_record(out: &mut Vec<u8>, r: &MetaRecord) {
    out.extend_from_slice(&r.tile_hash.to_le_bytes());
    out.extend_from_slice(&r.bg_color);
    out.extend_from_slice(&r.win_color);
    out.extend_from_slice(&r.obj_color);
    for z in [r.bg_for_z, r.bg_back_z, r.win_z, r.obj_z, r.obj_behind_z, r.flags] {
        out.extend_from_slice(&z.to_le_bytes());
    }
}
