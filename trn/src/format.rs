//! On-disk layout of the trn.dat (TDB2) terrain database.
//!
//! The file is a fixed little-endian layout:
//!
//! - bytes `[0, 7)`: file header (format/version fields, not interpreted here)
//! - bytes `[7, 7 + 10*41)`: ten 41-byte level records, finest first; the
//!   resolution is a `u32le` at byte 4 of each record, in semicircle units
//! - next 6 bytes: root pointer (unused by point queries)
//! - immediately after: a flat array of 11-byte tile index entries covering
//!   all ten levels, level 0 first, row-major (south→north, west→east)
//! - at each entry's `offset`: tile data starting with a 17-byte header
//!
//! This module holds the layout constants and the raw record decoders;
//! [`crate::level`] and [`crate::db`] build the query machinery on top.

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 7;

/// Size of one level record in bytes.
pub const LEVEL_RECORD_SIZE: usize = 41;

/// Number of resolution levels (0 = finest ~0.176°, 9 = coarsest 90°).
pub const NUM_LEVELS: usize = 10;

/// Size of the root pointer in bytes (unused by point queries).
pub const ROOT_POINTER_SIZE: usize = 6;

/// Size of one tile index entry in bytes.
pub const INDEX_ENTRY_SIZE: usize = 11;

/// Size of the tile header at the start of each tile's data region.
pub const TILE_HEADER_SIZE: usize = 17;

/// The level table starts right after the file header.
pub const LEVEL_TABLE_OFFSET: usize = HEADER_SIZE;

/// The root pointer follows the level table.
pub const ROOT_POINTER_OFFSET: usize = LEVEL_TABLE_OFFSET + NUM_LEVELS * LEVEL_RECORD_SIZE;

/// The flat tile index follows the root pointer.
pub const FLAT_INDEX_OFFSET: usize = ROOT_POINTER_OFFSET + ROOT_POINTER_SIZE;

/// One semicircle is 180/2³¹ degrees, so the full ±180° range maps to an i32.
pub const SEMICIRCLE_TO_DEG: f64 = 180.0 / 2147483648.0;

/// Flags value marking a populated (non-empty) tile.
pub const TILE_POPULATED: u16 = 2;

/// One decoded tile index entry.
///
/// Entry layout: `offset: u32le`, `size: u24le` (3 raw bytes), 2 reserved
/// bytes, `flags: u16le`. Only [`TILE_POPULATED`] flags denote a tile with
/// elevation data behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Absolute file offset of the tile's data region.
    pub offset: u32,
    /// Size of the tile's data region in bytes.
    pub size: u32,
    /// Tile flags; 2 = populated.
    pub flags: u16,
}

impl IndexEntry {
    /// Decode an index entry from its raw 11 bytes.
    pub fn parse(raw: &[u8; INDEX_ENTRY_SIZE]) -> Self {
        // The 24-bit size has no native width; compose it byte by byte
        // rather than reinterpreting a 4-byte read, which would swallow
        // the following reserved/flags bytes.
        let size = raw[4] as u32 | (raw[5] as u32) << 8 | (raw[6] as u32) << 16;
        Self {
            offset: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            size,
            flags: u16::from_le_bytes([raw[9], raw[10]]),
        }
    }

    /// Whether this entry points at a populated tile large enough to hold
    /// at least its own header.
    pub fn is_populated(&self) -> bool {
        self.flags == TILE_POPULATED && self.size as usize >= TILE_HEADER_SIZE
    }
}

/// The fixed 17-byte header at the start of a tile's data region.
///
/// Only the elevation range matters for point queries; `data_size` bounds
/// optional higher-resolution payload data that this reader never decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHeader {
    /// Maximum elevation within the tile, meters.
    pub max_elevation: i16,
    /// Minimum elevation within the tile, meters.
    pub min_elevation: i16,
    /// Size of the sub-tile payload following the header, bytes.
    pub data_size: u16,
}

impl TileHeader {
    /// Decode a tile header from its raw 17 bytes.
    pub fn parse(raw: &[u8; TILE_HEADER_SIZE]) -> Self {
        Self {
            max_elevation: i16::from_le_bytes([raw[11], raw[12]]),
            min_elevation: i16::from_le_bytes([raw[13], raw[14]]),
            data_size: u16::from_le_bytes([raw[15], raw[16]]),
        }
    }
}
