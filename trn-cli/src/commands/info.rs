use anyhow::{Context, Result};
use std::path::PathBuf;
use trn::format::{FLAT_INDEX_OFFSET, INDEX_ENTRY_SIZE};
use trn::TerrainDb;

pub fn run(db: Option<PathBuf>) -> Result<()> {
    let path = super::db_path(db)?;

    let metadata = std::fs::metadata(&path)
        .with_context(|| format!("Failed to stat database: {}", path.display()))?;
    let db = TerrainDb::open(&path)
        .with_context(|| format!("Failed to open terrain database: {}", path.display()))?;

    println!("Database:  {}", path.display());
    println!("File size: {}", format_size(metadata.len()));
    println!();

    println!(
        "{:<6} {:>12} {:>12} {:>6} {:>6} {:>10} {:>10}",
        "LEVEL", "SEMICIRCLES", "DEGREES", "ROWS", "COLS", "TILES", "OFFSET"
    );
    println!("{}", "-".repeat(68));

    let levels = db.levels();
    for (level, descriptor) in levels.iter().enumerate() {
        println!(
            "{:<6} {:>12} {:>12.6} {:>6} {:>6} {:>10} {:>10}",
            level,
            descriptor.resolution_semicircles,
            descriptor.resolution_deg,
            descriptor.lat_tiles,
            descriptor.lon_tiles,
            descriptor.tile_count(),
            levels.entry_offset(level)
        );
    }

    println!();
    println!("Total index entries: {}", levels.total_entries());
    println!(
        "Flat index region:   {} bytes at offset {}",
        levels.total_entries() * INDEX_ENTRY_SIZE,
        FLAT_INDEX_OFFSET
    );

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
