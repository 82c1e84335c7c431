//! TOML-based configuration for the builder.
//!
//! Reads and writes `BuilderConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\LcdBuilder\config.toml`
//! - Linux:    `~/.config/lcd-builder/config.toml`
//! - macOS:    `~/Library/Application Support/LcdBuilder/config.toml`
//!
//! Example:
//!
//! ```toml
//! [builder]
//! log_level = "debug"
//! levels_path = "/usr/share/lcd-builder/levels.json"
//!
//! [stack]
//! max_layer_thickness_mm = 10.0
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, so the builder
//! works before a config file exists and with files missing newer fields.

use std::path::{Path, PathBuf};

use lcd_core::{catalog, MAX_LAYER_THICKNESS_MM};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::session::StackLimits;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BuilderConfig {
    #[serde(default)]
    pub builder: GeneralConfig,
    #[serde(default)]
    pub stack: StackConfig,
}

/// General behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Level catalog to load instead of the bundled one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels_path: Option<PathBuf>,
}

/// Layer stack editing limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackConfig {
    /// Upper bound for a single layer's thickness, in millimetres.
    #[serde(default = "default_max_layer_thickness")]
    pub max_layer_thickness_mm: f32,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_layer_thickness() -> f32 {
    MAX_LAYER_THICKNESS_MM
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            levels_path: None,
        }
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            max_layer_thickness_mm: default_max_layer_thickness(),
        }
    }
}

impl BuilderConfig {
    /// Rejects values that parse but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the layer thickness cap lies
    /// outside `[thickest archetype minimum, MAX_LAYER_THICKNESS_MM]`.  A
    /// smaller cap would leave freshly placed layers above it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = self.stack.max_layer_thickness_mm;
        let floor = catalog()
            .iter()
            .map(|archetype| archetype.min_thickness_mm)
            .fold(0.0_f32, f32::max);
        if !max.is_finite() || max < floor || max > MAX_LAYER_THICKNESS_MM {
            return Err(ConfigError::Invalid {
                field: "stack.max_layer_thickness_mm",
                reason: format!(
                    "expected between {floor} and {MAX_LAYER_THICKNESS_MM} millimetres, got {max}"
                ),
            });
        }
        Ok(())
    }

    pub fn stack_limits(&self) -> StackLimits {
        StackLimits {
            max_layer_thickness_mm: self.stack.max_layer_thickness_mm,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `BuilderConfig` from the platform path, returning the defaults if
/// the file does not yet exist.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<BuilderConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `BuilderConfig` from `path`, returning the defaults if the file does
/// not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] for out-of-range values.
pub fn load_config_from(path: &Path) -> Result<BuilderConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: BuilderConfig = toml::from_str(&content)?;
            cfg.validate()?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BuilderConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &BuilderConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("LcdBuilder"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("lcd-builder"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("LcdBuilder")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
