//! Level table parsing and flat-index addressing.
//!
//! A trn.dat database stores ten resolution levels. Each level covers the
//! whole globe with a row-major grid of tiles, and the index entries for
//! all levels live in one flat on-disk array, finest level first. The
//! [`LevelTable`] precomputes each level's grid dimensions and its starting
//! position inside that array.

use crate::error::{Result, TrnError};
use crate::format::{
    FLAT_INDEX_OFFSET, LEVEL_RECORD_SIZE, LEVEL_TABLE_OFFSET, NUM_LEVELS, SEMICIRCLE_TO_DEG,
};

/// Grid geometry of one resolution level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelDescriptor {
    /// Per-tile resolution in semicircle units (180/2³¹ degrees each).
    pub resolution_semicircles: u32,
    /// Per-tile resolution in degrees.
    pub resolution_deg: f64,
    /// Number of tile rows covering -90°..90°.
    pub lat_tiles: usize,
    /// Number of tile columns covering -180°..180°.
    pub lon_tiles: usize,
}

impl LevelDescriptor {
    fn from_record(level: usize, record: &[u8]) -> Result<Self> {
        let semicircles = u32::from_le_bytes([record[4], record[5], record[6], record[7]]);
        if semicircles == 0 {
            return Err(TrnError::InvalidResolution {
                level,
                semicircles,
            });
        }
        let resolution_deg = semicircles as f64 * SEMICIRCLE_TO_DEG;

        // Stored resolutions are close-but-not-exact divisors of the globe,
        // so the grid dimensions must round to the nearest integer; plain
        // truncation reconstructs the wrong grid for some levels.
        let lat_tiles = (180.0 / resolution_deg).round() as usize;
        let lon_tiles = (360.0 / resolution_deg).round() as usize;

        Ok(Self {
            resolution_semicircles: semicircles,
            resolution_deg,
            lat_tiles,
            lon_tiles,
        })
    }

    /// Total number of tiles in this level's grid.
    pub fn tile_count(&self) -> usize {
        self.lat_tiles * self.lon_tiles
    }
}

/// The parsed level table of an open database.
///
/// Immutable after parsing; shared by every query against the handle.
#[derive(Debug, Clone)]
pub struct LevelTable {
    levels: Vec<LevelDescriptor>,
    entry_offsets: [usize; NUM_LEVELS],
    total_entries: usize,
}

impl LevelTable {
    /// Parse the level table from the start of the mapped file.
    ///
    /// Fails if the file cannot hold the header, all ten level records and
    /// the root pointer, or if any level declares a zero resolution.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < FLAT_INDEX_OFFSET {
            return Err(TrnError::Truncated { size: data.len() });
        }

        let mut levels = Vec::with_capacity(NUM_LEVELS);
        let mut entry_offsets = [0usize; NUM_LEVELS];
        let mut total_entries = 0usize;

        for level in 0..NUM_LEVELS {
            let start = LEVEL_TABLE_OFFSET + level * LEVEL_RECORD_SIZE;
            let descriptor =
                LevelDescriptor::from_record(level, &data[start..start + LEVEL_RECORD_SIZE])?;
            entry_offsets[level] = total_entries;
            total_entries += descriptor.tile_count();
            levels.push(descriptor);
        }

        Ok(Self {
            levels,
            entry_offsets,
            total_entries,
        })
    }

    /// Descriptor for the given level. Panics if `level >= 10`; callers
    /// validate the level before addressing the table.
    pub fn descriptor(&self, level: usize) -> &LevelDescriptor {
        &self.levels[level]
    }

    /// Starting index of this level's tiles inside the flat index array.
    pub fn entry_offset(&self, level: usize) -> usize {
        self.entry_offsets[level]
    }

    /// Flat index of the tile at `(row, col)` within the given level.
    pub fn entry_index(&self, level: usize, row: usize, col: usize) -> usize {
        self.entry_offsets[level] + row * self.levels[level].lon_tiles + col
    }

    /// Total number of index entries across all levels.
    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Iterate over the descriptors, finest level first.
    pub fn iter(&self) -> impl Iterator<Item = &LevelDescriptor> {
        self.levels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{HEADER_SIZE, ROOT_POINTER_SIZE};

    /// 45° in semicircles (2³¹ / 4).
    const RES_45: u32 = 536_870_912;
    /// 90° in semicircles (2³¹ / 2).
    const RES_90: u32 = 1_073_741_824;
    /// The finest real level, 180/1024 ≈ 0.17578125° (2³¹ / 1024).
    const RES_FINEST: u32 = 2_097_152;

    fn table_bytes(resolutions: &[u32; NUM_LEVELS]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        for &res in resolutions {
            let mut record = [0u8; LEVEL_RECORD_SIZE];
            record[4..8].copy_from_slice(&res.to_le_bytes());
            data.extend_from_slice(&record);
        }
        data.extend_from_slice(&[0u8; ROOT_POINTER_SIZE]);
        data
    }

    #[test]
    fn test_parse_grid_dimensions() {
        let mut resolutions = [RES_90; NUM_LEVELS];
        resolutions[0] = RES_FINEST;
        resolutions[1] = RES_45;
        let table = LevelTable::parse(&table_bytes(&resolutions)).unwrap();

        assert_eq!(table.descriptor(0).lat_tiles, 1024);
        assert_eq!(table.descriptor(0).lon_tiles, 2048);
        assert_eq!(table.descriptor(1).lat_tiles, 4);
        assert_eq!(table.descriptor(1).lon_tiles, 8);
        assert_eq!(table.descriptor(9).lat_tiles, 2);
        assert_eq!(table.descriptor(9).lon_tiles, 4);
        assert!((table.descriptor(1).resolution_deg - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_dimensions_round_to_nearest() {
        // One semicircle above the exact 1024-row resolution: 180/res is
        // slightly below 1024 and must round up, not truncate to 1023.
        let mut resolutions = [RES_90; NUM_LEVELS];
        resolutions[0] = RES_FINEST + 1;
        let table = LevelTable::parse(&table_bytes(&resolutions)).unwrap();

        assert_eq!(table.descriptor(0).lat_tiles, 1024);
        assert_eq!(table.descriptor(0).lon_tiles, 2048);
    }

    #[test]
    fn test_cumulative_entry_offsets() {
        let mut resolutions = [RES_90; NUM_LEVELS];
        resolutions[0] = RES_45; // 4×8 = 32 tiles
        let table = LevelTable::parse(&table_bytes(&resolutions)).unwrap();

        assert_eq!(table.entry_offset(0), 0);
        assert_eq!(table.entry_offset(1), 32);
        assert_eq!(table.entry_offset(2), 40);
        assert_eq!(table.total_entries(), 32 + 9 * 8);
    }

    #[test]
    fn test_entry_index_row_major() {
        let mut resolutions = [RES_90; NUM_LEVELS];
        resolutions[0] = RES_45;
        let table = LevelTable::parse(&table_bytes(&resolutions)).unwrap();

        assert_eq!(table.entry_index(0, 0, 0), 0);
        assert_eq!(table.entry_index(0, 2, 3), 2 * 8 + 3);
        assert_eq!(table.entry_index(1, 1, 1), 32 + 1 * 4 + 1);
    }

    #[test]
    fn test_truncated_table() {
        let data = table_bytes(&[RES_90; NUM_LEVELS]);
        let result = LevelTable::parse(&data[..100]);
        assert!(matches!(result, Err(TrnError::Truncated { size: 100 })));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let mut resolutions = [RES_90; NUM_LEVELS];
        resolutions[3] = 0;
        let result = LevelTable::parse(&table_bytes(&resolutions));
        assert!(matches!(
            result,
            Err(TrnError::InvalidResolution { level: 3, .. })
        ));
    }
}
