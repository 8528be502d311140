//! # trn - Garmin terrain database reader
//!
//! Read-only library for querying elevation from Garmin `trn.dat` (TDB2)
//! multi-resolution terrain databases.
//!
//! ## Features
//!
//! - **Fast**: Memory-mapped I/O, level table parsed once per open
//! - **Stateless queries**: every query is independent and repeatable
//! - **Level fallback**: empty fine tiles (ocean/void) automatically fall
//!   back to coarser coverage
//! - **Offline**: works on a local `trn.dat` file, nothing else
//!
//! ## Quick Start
//!
//! ```ignore
//! use trn::TerrainDb;
//!
//! let db = TerrainDb::open("trn.dat")?;
//! if let Some(result) = db.query(46.8523, -121.7603)? {
//!     println!(
//!         "{}m (±{}m, level {})",
//!         result.elevation, result.uncertainty, result.level
//!     );
//! }
//!
//! // Or as a one-shot that opens and releases the file itself:
//! let result = trn::get_elevation("trn.dat", 46.8523, -121.7603)?;
//! ```
//!
//! ## Database Format
//!
//! A `trn.dat` file holds ten resolution levels, from ~0.176° tiles at
//! level 0 up to 90° tiles at level 9. Each tile carries one min/max
//! elevation pair; point queries return the midpoint with the half-range
//! as the uncertainty. Tile angles are stored in "semicircle" units of
//! 180/2³¹ degrees. See [`format`] for the byte-level layout.
//!
//! ## Concurrency
//!
//! A handle is safe to use from one thread at a time. Callers that query
//! from multiple threads should open one handle per thread; the library
//! adds no locking and no caching.

pub mod db;
pub mod error;
pub mod format;
pub mod level;

// Re-export main types at crate root for convenience
pub use db::{get_elevation, get_elevation_at_level, Elevation, TerrainDb, TileBounds};
pub use error::{Result, TrnError};
pub use format::NUM_LEVELS;
pub use level::{LevelDescriptor, LevelTable};
