use anyhow::{Context, Result};
use std::path::PathBuf;

pub mod batch;
pub mod check;
pub mod info;
pub mod query;

/// Resolve the database path from the CLI flag or the TRN_DB environment
/// variable.
fn db_path(db: Option<PathBuf>) -> Result<PathBuf> {
    match db {
        Some(path) => Ok(path),
        None => {
            let path = std::env::var("TRN_DB")
                .context("TRN_DB environment variable not set. Use --db or set TRN_DB")?;
            Ok(PathBuf::from(path))
        }
    }
}
