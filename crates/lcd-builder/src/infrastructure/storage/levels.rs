//! Level catalog sources.
//!
//! Two [`LevelSource`] implementations:
//! - [`JsonLevelFile`] reads a JSON array of levels from disk.
//! - [`BundledLevels`] serves the catalog compiled into the binary.
//!
//! The JSON shape is a top-level array; each element carries `id`, `name`,
//! `description`, the six `color*_*` palette components, an optional
//! `completed` flag and an optional camelCase `requirements` object.

use std::path::{Path, PathBuf};

use lcd_core::Level;
use tracing::debug;

use crate::application::level_source::{LevelSource, LevelSourceError};

const BUNDLED_LEVELS_JSON: &str = include_str!("../../../assets/levels.json");

/// Parses a JSON level array.  `origin` only feeds the error message.
///
/// # Errors
///
/// Returns [`LevelSourceError::Parse`] with serde's line/column detail if the
/// content is not a valid level array.
pub fn parse_levels(json: &str, origin: &str) -> Result<Vec<Level>, LevelSourceError> {
    serde_json::from_str(json).map_err(|e| LevelSourceError::Parse {
        origin: origin.to_string(),
        reason: e.to_string(),
    })
}

/// Levels read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonLevelFile {
    path: PathBuf,
}

impl JsonLevelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LevelSource for JsonLevelFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<Level>, LevelSourceError> {
        debug!(path = %self.path.display(), "reading level catalog");
        let content = std::fs::read_to_string(&self.path).map_err(|source| LevelSourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_levels(&content, &self.describe())
    }
}

/// The catalog shipped inside the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledLevels;

impl LevelSource for BundledLevels {
    fn describe(&self) -> String {
        "bundled".to_string()
    }

    fn load(&self) -> Result<Vec<Level>, LevelSourceError> {
        parse_levels(BUNDLED_LEVELS_JSON, "bundled")
    }
}
