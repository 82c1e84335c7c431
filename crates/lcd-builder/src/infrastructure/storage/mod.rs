//! Storage infrastructure: everything the builder reads from disk.
//!
//! - `config` – the TOML configuration file in the platform config directory.
//! - `levels` – level catalogs, either a JSON file or the bundled catalog.
//! - `build_file` – TOML descriptions of a single build for headless runs.
//!
//! Keeping storage concerns here, rather than scattered through the
//! application, means the file formats can change without touching the
//! session or the engine.

pub mod build_file;
pub mod config;
pub mod levels;
