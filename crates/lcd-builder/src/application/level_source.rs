//! Abstraction over where the level catalog comes from.
//!
//! The production implementations live in
//! `infrastructure::storage::levels`; tests substitute a `mockall` mock.

use std::path::PathBuf;

use lcd_core::{Level, LevelError};
use thiserror::Error;

/// Error type for loading a level catalog.
#[derive(Debug, Error)]
pub enum LevelSourceError {
    /// The catalog file could not be read.
    #[error("I/O error reading levels at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog content is not a valid list of levels.
    #[error("failed to parse level catalog {origin}: {reason}")]
    Parse { origin: String, reason: String },

    /// The levels parsed but do not form a valid catalog.
    #[error("invalid level catalog: {0}")]
    InvalidCatalog(#[from] LevelError),
}

/// Trait abstracting level catalog loading.
#[cfg_attr(test, mockall::automock)]
pub trait LevelSource {
    /// Human-readable origin used in log lines (a path, or `"bundled"`).
    fn describe(&self) -> String;

    /// Returns every level in display order.
    fn load(&self) -> Result<Vec<Level>, LevelSourceError>;
}
