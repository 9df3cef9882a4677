//! Per-tile meta store as the emulator runtime keeps it.
//!
//! Records stay in insertion order (that order is what gets written to disk)
//! and are looked up by tile hash. When the same hash appears more than once,
//! lookups resolve to the first occurrence.
use crate::codec;
use crate::error::MetaError;
use crate::record::{Color, MetaRecord};

/// Partial update for [`MetaTable::upsert`]. `None` leaves a field untouched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MetaUpdate {
    pub bg_color: Option<Color>,
    pub win_color: Option<Color>,
    pub obj_color: Option<Color>,
    pub bg_for_z: Option<u32>,
    pub bg_back_z: Option<u32>,
    pub win_z: Option<u32>,
    pub obj_z: Option<u32>,
    pub obj_behind_z: Option<u32>,
}

impl MetaUpdate {
    fn apply(&self, r: &mut MetaRecord) {
        if let Some(c) = self.bg_color { r.bg_color = c; }
        if let Some(c) = self.win_color { r.win_color = c; }
        if let Some(c) = self.obj_color { r.obj_color = c; }
        if let Some(z) = self.bg_for_z { r.bg_for_z = z; }
        if let Some(z) = self.bg_back_z { r.bg_back_z = z; }
        if let Some(z) = self.win_z { r.win_z = z; }
        if let Some(z) = self.obj_z { r.obj_z = z; }
        if let Some(z) = self.obj_behind_z { r.obj_behind_z = z; }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MetaTable {
    records: Vec<MetaRecord>,
}

impl MetaTable {
    pub fn new() -> Self { Self::default() }

    pub fn from_records(records: Vec<MetaRecord>) -> Self { Self { records } }

    /// Load a table from a binary meta file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetaError> {
        codec::decode(bytes).map(Self::from_records)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, MetaError> { codec::encode(&self.records) }

    pub fn records(&self) -> &[MetaRecord] { &self.records }

    pub fn into_records(self) -> Vec<MetaRecord> { self.records }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn get(&self, tile_hash: u32) -> Option<&MetaRecord> {
        self.records.iter().find(|r| r.tile_hash == tile_hash)
    }

    pub fn get_mut(&mut self, tile_hash: u32) -> Option<&mut MetaRecord> {
        self.records.iter_mut().find(|r| r.tile_hash == tile_hash)
    }

    /// Apply `update` to the record for `tile_hash`, appending a default
    /// record first if none exists. Returns `true` when a record was created.
    pub fn upsert(&mut self, tile_hash: u32, update: MetaUpdate) -> bool {
        let (idx, created) = match self.records.iter().position(|r| r.tile_hash == tile_hash) {
            Some(idx) => (idx, false),
            None => {
                self.records.push(MetaRecord::new(tile_hash));
                (self.records.len() - 1, true)
            }
        };
        update.apply(&mut self.records[idx]);
        created
    }
}
