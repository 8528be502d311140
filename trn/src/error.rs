//! Error types for the trn library.

use thiserror::Error;

/// Errors that can occur when working with trn.dat terrain databases.
#[derive(Error, Debug)]
pub enum TrnError {
    /// IO error when opening or mapping the database file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is too short to hold the header, level table and root pointer.
    #[error("Truncated terrain database: {size} bytes (need at least 423 for header + level table)")]
    Truncated { size: usize },

    /// A level record declares a zero resolution, which cannot form a grid.
    #[error("Invalid resolution at level {level}: {semicircles} semicircles")]
    InvalidResolution { level: usize, semicircles: u32 },

    /// Requested zoom level is outside the 0..10 range.
    #[error("Level out of range: {level} (valid: 0-9)")]
    InvalidLevel { level: usize },

    /// Coordinates are outside valid coverage.
    #[error("Coordinates out of bounds: lat={lat}, lon={lon} (valid: lat ±90°, lon ±180°)")]
    OutOfBounds { lat: f64, lon: f64 },
}

/// Result type alias using [`TrnError`].
pub type Result<T> = std::result::Result<T, TrnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrnError::Truncated { size: 100 };
        assert!(err.to_string().contains("100"));

        let err = TrnError::OutOfBounds {
            lat: 91.0,
            lon: 0.0,
        };
        assert!(err.to_string().contains("91"));

        let err = TrnError::InvalidLevel { level: 10 };
        assert!(err.to_string().contains("10"));

        let err = TrnError::InvalidResolution {
            level: 3,
            semicircles: 0,
        };
        assert!(err.to_string().contains("level 3"));
    }
}
