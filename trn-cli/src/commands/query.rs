use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use trn::TerrainDb;

#[derive(Serialize)]
struct ElevationResponse {
    lat: f64,
    lon: f64,
    elevation: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_elevation: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_elevation: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uncertainty: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<usize>,
}

pub fn run(db: Option<PathBuf>, lat: f64, lon: f64, level: usize, json: bool) -> Result<()> {
    let path = super::db_path(db)?;
    let db = TerrainDb::open(&path)
        .with_context(|| format!("Failed to open terrain database: {}", path.display()))?;

    let result = db
        .query_at_level(lat, lon, level)
        .context("Failed to query elevation")?;

    if json {
        let response = match &result {
            Some(e) => ElevationResponse {
                lat,
                lon,
                elevation: Some(e.elevation),
                min_elevation: Some(e.min_elevation),
                max_elevation: Some(e.max_elevation),
                uncertainty: Some(e.uncertainty),
                level: Some(e.level),
            },
            None => ElevationResponse {
                lat,
                lon,
                elevation: None,
                min_elevation: None,
                max_elevation: None,
                uncertainty: None,
                level: None,
            },
        };
        println!("{}", serde_json::to_string(&response)?);
    } else if let Some(e) = result {
        println!("Location:    ({}, {})", lat, lon);
        println!("Elevation:   {}m (±{}m)", e.elevation, e.uncertainty);
        println!("Range:       {}m to {}m", e.min_elevation, e.max_elevation);
        println!(
            "Tile:        [{:.6}, {:.6}] to [{:.6}, {:.6}]",
            e.bounds.south, e.bounds.west, e.bounds.north, e.bounds.east
        );
        println!("Resolution:  {:.6}° (level {})", e.resolution_deg, e.level);
    } else {
        println!("no data");
    }

    Ok(())
}
