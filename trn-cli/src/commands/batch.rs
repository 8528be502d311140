use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use trn::TerrainDb;

pub fn run(
    db: Option<PathBuf>,
    input: PathBuf,
    output: Option<PathBuf>,
    lat_col: String,
    lon_col: String,
    level: usize,
) -> Result<()> {
    let path = super::db_path(db)?;
    let db = TerrainDb::open(&path)
        .with_context(|| format!("Failed to open terrain database: {}", path.display()))?;

    let file = File::open(&input).context("Failed to open input file")?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    // Find column indices
    let headers = reader.headers()?.clone();
    let lat_idx = headers
        .iter()
        .position(|h| h == lat_col)
        .with_context(|| format!("Column '{}' not found in CSV", lat_col))?;
    let lon_idx = headers
        .iter()
        .position(|h| h == lon_col)
        .with_context(|| format!("Column '{}' not found in CSV", lon_col))?;

    // Collect records for progress bar
    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;
    let total = records.len() as u64;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    // Prepare output
    let output_path = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap().to_string_lossy();
        input.with_file_name(format!("{}_elevation.csv", stem))
    });
    let output_file = File::create(&output_path).context("Failed to create output file")?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(output_file));

    // Write header
    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.push("elevation");
    new_headers.push("uncertainty");
    new_headers.push("level");
    writer.write_record(&new_headers)?;

    // Process records
    for record in records {
        let lat: f64 = record
            .get(lat_idx)
            .context("Missing latitude")?
            .parse()
            .context("Invalid latitude")?;
        let lon: f64 = record
            .get(lon_idx)
            .context("Missing longitude")?
            .parse()
            .context("Invalid longitude")?;

        let (elevation, uncertainty, answered_level) = match db.query_at_level(lat, lon, level) {
            Ok(Some(e)) => (
                e.elevation.to_string(),
                e.uncertainty.to_string(),
                e.level.to_string(),
            ),
            _ => ("no data".to_string(), String::new(), String::new()),
        };

        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.push(&elevation);
        new_record.push(&uncertainty);
        new_record.push(&answered_level);
        writer.write_record(&new_record)?;

        pb.inc(1);
    }

    pb.finish_with_message("done");
    writer.flush()?;

    println!("Output written to: {}", output_path.display());

    Ok(())
}
