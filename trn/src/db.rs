//! Terrain database handle and point query resolution.
//!
//! [`TerrainDb`] memory-maps a trn.dat file, parses its level table once,
//! and answers point elevation queries. A query locates the tile covering
//! the coordinate at the finest requested level and falls back to coarser
//! levels while the tile is empty (open ocean and voids carry no fine data
//! but usually have coarse coverage).
//!
//! The handle holds no mutable state between queries: every query re-reads
//! its index entry and tile header through the mapping, so repeated queries
//! against an unmodified file return identical results. Callers who need
//! amortized performance can memoize results outside this crate.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Result, TrnError};
use crate::format::{
    IndexEntry, TileHeader, FLAT_INDEX_OFFSET, INDEX_ENTRY_SIZE, NUM_LEVELS, TILE_HEADER_SIZE,
};
use crate::level::LevelTable;

/// Degree boundary of the tile that answered a query.
///
/// The tile covers `[south, north) × [west, east)`; a coordinate exactly on
/// a boundary belongs to the tile whose south/west edge equals it, except at
/// lat=90 / lon=180 where the clamped edge tile answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl TileBounds {
    /// Whether the coordinate falls inside this tile (south/west inclusive).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.south..self.north).contains(&lat) && (self.west..self.east).contains(&lon)
    }
}

/// Result of a point elevation query.
///
/// The database stores one min/max elevation pair per tile; `elevation` is
/// the midpoint and `uncertainty` half the range (the median tile range at
/// the finest resolution is ~28m, so typical accuracy is ±14m).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elevation {
    /// Queried latitude in degrees.
    pub lat: f64,
    /// Queried longitude in degrees.
    pub lon: f64,
    /// Midpoint elevation estimate in meters.
    pub elevation: i32,
    /// Minimum elevation in the answering tile, meters.
    pub min_elevation: i16,
    /// Maximum elevation in the answering tile, meters.
    pub max_elevation: i16,
    /// Half the tile's elevation range, meters.
    pub uncertainty: i32,
    /// Level that actually answered (may be coarser than requested).
    pub level: usize,
    /// Tile size in degrees at the answering level.
    pub resolution_deg: f64,
    /// Degree boundary of the answering tile.
    pub bounds: TileBounds,
}

/// Handle to an open trn.dat terrain database.
///
/// The file is mapped read-only and released when the handle is dropped,
/// on every exit path. Queries never mutate the handle.
///
/// # Example
///
/// ```ignore
/// use trn::TerrainDb;
///
/// let db = TerrainDb::open("trn.dat")?;
/// if let Some(result) = db.query(46.8523, -121.7603)? {
///     println!("{}m (±{}m)", result.elevation, result.uncertainty);
/// }
/// ```
pub struct TerrainDb {
    /// Memory-mapped file data.
    data: Mmap,
    /// Parsed level table, immutable for the life of the handle.
    levels: LevelTable,
}

impl TerrainDb {
    /// Open a trn.dat file and parse its level table.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or mapped, if it is
    /// too short to contain the header and level table, or if a level
    /// record declares a zero resolution.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;

        // SAFETY: Memory mapping is safe as long as the file is not modified
        // while mapped. We open the file read-only and don't expose the mapping.
        let mmap = unsafe { Mmap::map(&file)? };

        let levels = LevelTable::parse(&mmap)?;

        Ok(Self {
            data: mmap,
            levels,
        })
    }

    /// The parsed level table.
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    /// Query elevation at the finest available resolution.
    ///
    /// Equivalent to [`Self::query_at_level`] with level 0.
    pub fn query(&self, lat: f64, lon: f64) -> Result<Option<Elevation>> {
        self.query_at_level(lat, lon, 0)
    }

    /// Query elevation starting at the given zoom level.
    ///
    /// Levels are tried in order from `level` to 9 and never skipped; the
    /// first populated tile answers. A result at a coarser level than
    /// requested means the finer tiles covering the point are empty.
    ///
    /// # Arguments
    ///
    /// * `lat` - Latitude in decimal degrees (-90 to 90)
    /// * `lon` - Longitude in decimal degrees (-180 to 180)
    /// * `level` - Zoom level to start at (0 = finest ~0.176°, 9 = coarsest 90°)
    ///
    /// # Returns
    ///
    /// - `Ok(Some(elevation))` - a populated tile covered the point
    /// - `Ok(None)` - no level has data for the point (e.g. open ocean
    ///   beyond the coarsest populated coverage)
    /// - `Err(...)` - level or coordinates out of range, validated before
    ///   any index access
    pub fn query_at_level(&self, lat: f64, lon: f64, level: usize) -> Result<Option<Elevation>> {
        if level >= NUM_LEVELS {
            return Err(TrnError::InvalidLevel { level });
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(TrnError::OutOfBounds { lat, lon });
        }

        // Fallback is a bounded loop rather than recursion: it can never
        // skip a level, and the coarsest level ends the search.
        for level in level..NUM_LEVELS {
            let descriptor = self.levels.descriptor(level);
            let res = descriptor.resolution_deg;

            // Tile indices, row-major south→north and west→east. The clamp
            // handles the exact lat=90 / lon=180 boundary.
            let row = (((lat + 90.0) / res).floor() as usize).min(descriptor.lat_tiles - 1);
            let col = (((lon + 180.0) / res).floor() as usize).min(descriptor.lon_tiles - 1);

            let entry = match self.index_entry(self.levels.entry_index(level, row, col)) {
                Some(entry) => entry,
                // Short read at the array boundary: treat as absent.
                None => continue,
            };

            if !entry.is_populated() {
                // Empty tile (ocean or void); retry one level coarser.
                continue;
            }

            let header = match self.tile_header(entry.offset) {
                Some(header) => header,
                None => return Ok(None),
            };

            let min = header.min_elevation as f64;
            let max = header.max_elevation as f64;

            let south = -90.0 + row as f64 * res;
            let west = -180.0 + col as f64 * res;

            return Ok(Some(Elevation {
                lat,
                lon,
                elevation: ((max + min) / 2.0).round() as i32,
                min_elevation: header.min_elevation,
                max_elevation: header.max_elevation,
                uncertainty: ((max - min) / 2.0).round() as i32,
                level,
                resolution_deg: res,
                bounds: TileBounds {
                    south,
                    north: south + res,
                    west,
                    east: west + res,
                },
            }));
        }

        Ok(None)
    }

    /// Read one tile index entry, or `None` if it lies past the end of the
    /// mapping (legitimate at array bounds during fallback).
    fn index_entry(&self, entry_index: usize) -> Option<IndexEntry> {
        let start = FLAT_INDEX_OFFSET + entry_index * INDEX_ENTRY_SIZE;
        let raw = self.data.get(start..start + INDEX_ENTRY_SIZE)?;
        Some(IndexEntry::parse(raw.try_into().ok()?))
    }

    /// Read the tile header at the given file offset, or `None` on a short
    /// read.
    fn tile_header(&self, offset: u32) -> Option<TileHeader> {
        let start = offset as usize;
        let raw = self.data.get(start..start + TILE_HEADER_SIZE)?;
        Some(TileHeader::parse(raw.try_into().ok()?))
    }
}

/// One-shot elevation query at the finest available resolution.
///
/// Opens the database, queries, and releases the handle on every exit path
/// (success, no-data and error alike).
pub fn get_elevation<P: AsRef<Path>>(path: P, lat: f64, lon: f64) -> Result<Option<Elevation>> {
    get_elevation_at_level(path, lat, lon, 0)
}

/// One-shot elevation query starting at the given zoom level.
pub fn get_elevation_at_level<P: AsRef<Path>>(
    path: P,
    lat: f64,
    lon: f64,
    level: usize,
) -> Result<Option<Elevation>> {
    let db = TerrainDb::open(path)?;
    db.query_at_level(lat, lon, level)
}
