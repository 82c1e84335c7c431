//! TOML build description files.
//!
//! A build file captures one attempt at a level so it can be checked from
//! the command line:
//!
//! ```toml
//! level = 1
//!
//! [display]
//! size_width = 48
//! size_height = 27
//! res_width = 1920
//! res_height = "1080"
//!
//! [[layers]]
//! archetype = "standard-backlight"
//!
//! [[layers]]
//! archetype = "standard-glass"
//! thickness_mm = 2.0
//! ```
//!
//! Display fields are accepted as integers or strings and are handed to the
//! session unparsed, so a value like `27.5` or `16.0` surfaces as the same
//! [`InputError`](lcd_core::InputError) a user typing it would get.

use std::fmt;
use std::path::{Path, PathBuf};

use lcd_core::{ArchetypeId, LevelError, StackError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::application::session::BuildSession;

/// Error type for reading and applying build files.
#[derive(Debug, Error)]
pub enum BuildFileError {
    #[error("I/O error reading build file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse build file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("layer {index} cannot be placed: {source}")]
    Stack {
        index: usize,
        #[source]
        source: StackError,
    },

    #[error(transparent)]
    Level(#[from] LevelError),
}

/// A display dimension exactly as written in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawField::Int(v) => write!(f, "{v}"),
            // Debug keeps the fraction (`16.0`), so floats never pass as integers.
            RawField::Float(v) => write!(f, "{v:?}"),
            RawField::Text(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDisplay {
    pub size_width: RawField,
    pub size_height: RawField,
    pub res_width: RawField,
    pub res_height: RawField,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayerEntry {
    pub archetype: ArchetypeId,
    /// Omitted means the archetype's minimum thickness.
    #[serde(default)]
    pub thickness_mm: Option<f32>,
}

/// A parsed build file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuildFile {
    /// Level to check against; the session's default level when absent.
    #[serde(default)]
    pub level: Option<u32>,
    pub display: RawDisplay,
    /// Bottom layer first.
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
}

impl BuildFile {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildFileError::Io`] if the file cannot be read or
    /// [`BuildFileError::Parse`] if it is not a valid build description.
    pub fn load(path: &Path) -> Result<Self, BuildFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| BuildFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// # Errors
    ///
    /// Returns [`BuildFileError::Parse`] for malformed TOML, missing fields or
    /// unknown archetype ids.
    pub fn parse(content: &str) -> Result<Self, BuildFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Replaces the session's stack with this file's layers and selects its
    /// level.
    ///
    /// # Errors
    ///
    /// Returns [`BuildFileError::Stack`] for a thickness outside the layer's
    /// range, or [`BuildFileError::Level`] for a level the catalog lacks.
    pub fn apply(&self, session: &mut BuildSession) -> Result<(), BuildFileError> {
        if let Some(id) = self.level {
            session.select_level(id)?;
        }

        session.clear_layers();
        for (index, entry) in self.layers.iter().enumerate() {
            session.add_layer(entry.archetype);
            if let Some(thickness) = entry.thickness_mm {
                session
                    .set_layer_thickness(index, thickness)
                    .map_err(|source| BuildFileError::Stack { index, source })?;
            }
        }
        debug!(layers = self.layers.len(), level = ?self.level, "applied build file");
        Ok(())
    }

    /// Width, height, horizontal and vertical resolution, as text.
    pub fn display_fields(&self) -> [String; 4] {
        [
            self.display.size_width.to_string(),
            self.display.size_height.to_string(),
            self.display.res_width.to_string(),
            self.display.res_height.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::StackLimits;
    use lcd_core::{Level, LevelCatalog, LevelPalette, Requirements};

    const STANDARD_BUILD: &str = r#"
level = 1

[display]
size_width = 16
size_height = "9"
res_width = 1920
res_height = 1080

[[layers]]
archetype = "standard-backlight"

[[layers]]
archetype = "polarizer"

[[layers]]
archetype = "tft-array"

[[layers]]
archetype = "liquid-crystal"

[[layers]]
archetype = "polarizer"

[[layers]]
archetype = "standard-glass"
thickness_mm = 2.0
"#;

    fn session() -> BuildSession {
        let levels = [0, 1]
            .into_iter()
            .map(|id| Level {
                id,
                name: format!("Level {id}"),
                description: String::new(),
                palette: LevelPalette::default(),
                completed: false,
                requirements: Requirements::default(),
            })
            .collect();
        BuildSession::new(LevelCatalog::from_levels(levels).unwrap(), StackLimits::default())
    }

    #[test]
    fn test_parse_accepts_mixed_integer_and_string_fields() {
        let file = BuildFile::parse(STANDARD_BUILD).unwrap();

        assert_eq!(file.level, Some(1));
        assert_eq!(file.layers.len(), 6);
        assert_eq!(file.layers[5].thickness_mm, Some(2.0));
        assert_eq!(
            file.display_fields(),
            ["16".to_string(), "9".to_string(), "1920".to_string(), "1080".to_string()]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_archetype() {
        let content = r#"
[display]
size_width = 1
size_height = 1
res_width = 1
res_height = 1

[[layers]]
archetype = "oled-panel"
"#;
        assert!(matches!(BuildFile::parse(content), Err(BuildFileError::Parse(_))));
    }

    #[test]
    fn test_parse_requires_display_section() {
        assert!(matches!(BuildFile::parse("level = 0\n"), Err(BuildFileError::Parse(_))));
    }

    #[test]
    fn test_float_field_is_left_for_input_validation() {
        let content = r#"
[display]
size_width = 27.5
size_height = 9
res_width = 1920
res_height = 1080
"#;
        let file = BuildFile::parse(content).unwrap();
        let mut session = session();

        let [w, h, rw, rh] = file.display_fields();
        let err = session.run_raw(&w, &h, &rw, &rh).unwrap_err();

        assert_eq!(err.field(), lcd_core::DisplayField::SizeWidth);
    }

    #[test]
    fn test_whole_valued_float_is_not_accepted_as_integer() {
        let content = r#"
[display]
size_width = 16.0
size_height = 9
res_width = 1920
res_height = 1080
"#;
        let file = BuildFile::parse(content).unwrap();

        let [w, h, rw, rh] = file.display_fields();
        let err = session().run_raw(&w, &h, &rw, &rh).unwrap_err();

        assert_eq!(w, "16.0");
        assert_eq!(err.field(), lcd_core::DisplayField::SizeWidth);
    }

    #[test]
    fn test_apply_replaces_stack_and_selects_level() {
        // Arrange
        let file = BuildFile::parse(STANDARD_BUILD).unwrap();
        let mut session = session();
        session.add_layer(ArchetypeId::MiniLedBacklight);

        // Act
        file.apply(&mut session).unwrap();

        // Assert
        assert_eq!(session.layers().len(), 6);
        assert_eq!(session.layers()[0].archetype, ArchetypeId::StandardBacklight);
        assert_eq!(session.layers()[5].thickness_mm, 2.0);
        assert_eq!(session.active_level().map(|l| l.id), Some(1));

        let [w, h, rw, rh] = file.display_fields();
        let report = session.run_raw(&w, &h, &rw, &rh).unwrap();
        assert!(report.passed());
        assert_eq!(report.level_id, Some(1));
    }

    #[test]
    fn test_apply_reports_index_of_bad_thickness() {
        let content = r#"
[display]
size_width = 16
size_height = 9
res_width = 1920
res_height = 1080

[[layers]]
archetype = "standard-backlight"

[[layers]]
archetype = "polarizer"
thickness_mm = 0.01
"#;
        let file = BuildFile::parse(content).unwrap();

        let err = file.apply(&mut session()).unwrap_err();

        assert!(matches!(err, BuildFileError::Stack { index: 1, .. }));
    }

    #[test]
    fn test_apply_rejects_unknown_level() {
        let mut file = BuildFile::parse(STANDARD_BUILD).unwrap();
        file.level = Some(42);

        let err = file.apply(&mut session()).unwrap_err();

        assert!(matches!(err, BuildFileError::Level(LevelError::UnknownLevel(42))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = BuildFile::load(Path::new("/nonexistent/build.toml")).unwrap_err();
        assert!(matches!(err, BuildFileError::Io { .. }));
    }
}
