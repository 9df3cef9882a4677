//! Typed schema for one tile meta record and its validating constructor.
//!
//! Text input arrives as a loosely typed `serde_json::Value`. Every field is
//! checked for presence and range before a [`MetaRecord`] is built, so a
//! malformed record is rejected as a whole with the first violation found.
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::MetaError;

/// RGBA, one byte per channel.
pub type Color = [u8; 4];

/// Opaque black, the colour a freshly created record starts with.
pub const BLACK: Color = [0, 0, 0, 255];

/// Draw the object layer's colour 0 instead of treating it as transparent.
pub const DRAW_OBJ_C0: u32 = 1 << 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetaRecord {
    pub tile_hash: u32,
    pub bg_color: Color,
    pub win_color: Color,
    pub obj_color: Color,
    pub bg_for_z: u32,
    pub bg_back_z: u32,
    pub win_z: u32,
    pub obj_z: u32,
    pub obj_behind_z: u32,
    pub flags: u32,
}

impl MetaRecord {
    /// Record for `tile_hash` with black colours, zero z-order and no flags.
    pub fn new(tile_hash: u32) -> Self {
        Self {
            tile_hash,
            bg_color: BLACK,
            win_color: BLACK,
            obj_color: BLACK,
            bg_for_z: 0,
            bg_back_z: 0,
            win_z: 0,
            obj_z: 0,
            obj_behind_z: 0,
            flags: 0,
        }
    }

    /// Build a record from one text object, validating every field first.
    pub fn from_value(value: &Value) -> Result<Self, MetaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| MetaError::SchemaError(format!("meta entry must be an object, got {}", kind(value))))?;

        let bg_color = require_color(obj, "bg_color")?;
        let win_color = require_color(obj, "win_color")?;
        let obj_color = require_color(obj, "obj_color")?;
        let flags = optional_flags(obj)?;

        Ok(Self {
            tile_hash: require_u32(obj, "tile_hash")?,
            bg_color,
            win_color,
            obj_color,
            bg_for_z: require_u32(obj, "bg_for_z")?,
            bg_back_z: require_u32(obj, "bg_back_z")?,
            win_z: require_u32(obj, "win_z")?,
            obj_z: require_u32(obj, "obj_z")?,
            obj_behind_z: require_u32(obj, "obj_behind_z")?,
            flags,
        })
    }

    pub fn add_flags(&mut self, flags: u32) { self.flags |= flags; }

    pub fn clear_flags(&mut self, flags: u32) { self.flags &= !flags; }

    pub fn set_flags(&mut self, flags: u32) { self.flags = flags; }

    /// True when every bit of `flags` is set.
    pub fn has_flags(&self, flags: u32) -> bool { self.flags & flags == flags }
}

/// Validate a whole text document: it must be an array of record objects.
pub fn records_from_value(value: &Value) -> Result<Vec<MetaRecord>, MetaError> {
    let entries = value
        .as_array()
        .ok_or_else(|| MetaError::SchemaError(format!("text must be a list of meta objects, got {}", kind(value))))?;
    entries.iter().map(MetaRecord::from_value).collect()
}

fn require_color(obj: &Map<String, Value>, name: &'static str) -> Result<Color, MetaError> {
    let items = obj.get(name).and_then(Value::as_array).ok_or(MetaError::InvalidColor(name))?;
    if items.len() != 4 { return Err(MetaError::InvalidColor(name)); }
    let mut out = [0u8; 4];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or(MetaError::InvalidColor(name))?;
    }
    Ok(out)
}

fn optional_flags(obj: &Map<String, Value>) -> Result<u32, MetaError> {
    match obj.get("flags") {
        None => Ok(0),
        Some(v) => v.as_u64().and_then(|v| u32::try_from(v).ok()).ok_or(MetaError::InvalidFlags),
    }
}

fn require_u32(obj: &Map<String, Value>, name: &'static str) -> Result<u32, MetaError> {
    let v = obj.get(name).ok_or(MetaError::MissingField(name))?;
    match v {
        // Integers that do not fit u32, including negatives.
        Value::Number(n) if n.is_u64() || n.is_i64() => {
            n.as_u64().and_then(|v| u32::try_from(v).ok()).ok_or(MetaError::FieldOverflow(name))
        }
        // Integer literals beyond i64/u64 are parsed as f64.
        Value::Number(n)
            if n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0 && !(0.0..=u32::MAX as f64).contains(&f)) =>
        {
            Err(MetaError::FieldOverflow(name))
        }
        other => Err(MetaError::SchemaError(format!("\"{name}\" must be an integer, got {}", kind(other)))),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
