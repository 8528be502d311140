use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Garmin trn.dat terrain elevation CLI tool
#[derive(Parser)]
#[command(name = "trn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the trn.dat terrain database
    #[arg(short, long, env = "TRN_DB", global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query elevation for a single coordinate
    Query {
        /// Latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long)]
        lon: f64,

        /// Zoom level to start at (0 = finest, 9 = coarsest)
        #[arg(short, long, default_value_t = 0)]
        level: usize,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Process elevations for multiple coordinates from a CSV file
    Batch {
        /// Input CSV file
        input: PathBuf,

        /// Output file (input name with _elevation suffix if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column name for latitude
        #[arg(long, default_value = "lat")]
        lat_col: String,

        /// Column name for longitude
        #[arg(long, default_value = "lon")]
        lon_col: String,

        /// Zoom level to start at (0 = finest, 9 = coarsest)
        #[arg(short, long, default_value_t = 0)]
        level: usize,
    },

    /// Display the database's level table and layout
    Info,

    /// Spot-check the database against well-known locations
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            lat,
            lon,
            level,
            json,
        } => commands::query::run(cli.db, lat, lon, level, json),
        Commands::Batch {
            input,
            output,
            lat_col,
            lon_col,
            level,
        } => commands::batch::run(cli.db, input, output, lat_col, lon_col, level),
        Commands::Info => commands::info::run(cli.db),
        Commands::Check => commands::check::run(cli.db),
    }
}
