use anyhow::{Context, Result};
use std::path::PathBuf;
use trn::TerrainDb;

/// Well-known locations with their commonly cited peak/surface elevations,
/// used as a sanity check against a real database.
const SPOT_CHECKS: &[(&str, f64, f64, i32)] = &[
    ("Mount Rainier", 46.8523, -121.7603, 4392),
    ("Mount Everest", 27.9881, 86.925, 8848),
    ("Denver, CO", 39.7392, -104.9903, 1609),
    ("Death Valley", 36.23, -116.83, -86),
    ("Dead Sea", 31.5, 35.5, -430),
    ("San Francisco", 37.7749, -122.4194, 0),
    ("Tokyo", 35.68, 139.69, 40),
    ("La Paz, Bolivia", -16.5, -68.15, 3640),
    ("Kilimanjaro", -3.07, 37.35, 5895),
    ("Amsterdam", 52.37, 4.89, -2),
    ("Pacific Ocean", 30.0, -150.0, 0),
];

pub fn run(db: Option<PathBuf>) -> Result<()> {
    let path = super::db_path(db)?;
    let db = TerrainDb::open(&path)
        .with_context(|| format!("Failed to open terrain database: {}", path.display()))?;

    println!(
        "{:<20} {:>8} {:>6} {:>6} {:>6} {:>5}  LEVEL",
        "LOCATION", "EXPECTED", "MIN", "MID", "MAX", "±"
    );
    println!("{}", "-".repeat(68));

    for &(name, lat, lon, expected) in SPOT_CHECKS {
        match db.query(lat, lon)? {
            Some(e) => println!(
                "{:<20} {:>8} {:>6} {:>6} {:>6} {:>5}  L{}",
                name, expected, e.min_elevation, e.elevation, e.max_elevation, e.uncertainty, e.level
            ),
            None => println!("{:<20} {:>8}   (no data)", name, expected),
        }
    }

    Ok(())
}
