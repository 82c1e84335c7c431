//! # lcd-core
//!
//! Shared library for Display Builder containing the layer catalog, the
//! display domain entities, and the validation engine that decides whether an
//! assembled layer stack forms a working LCD that satisfies a level's
//! requirements.
//!
//! It has zero dependencies on the file system, terminal, or UI frameworks.
//!
//! # Architecture overview (for beginners)
//!
//! Display Builder lets a user assemble a liquid-crystal display out of
//! physical films (backlight, polarizers, transistor array, liquid crystal,
//! glass), declare its size and resolution, and then "run" the build against
//! the requirements of a level.
//!
//! This crate (`lcd-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – The data model: the fixed catalog of layer archetypes, the
//!   append/pop-only layer stack, the declared display dimensions, the optional
//!   requirements bag, and the level catalog.
//!
//! - **`engine`** – Pure functions that read a stack snapshot, a display spec
//!   and a requirements bag, and produce a verdict plus a metrics snapshot
//!   (thickness, PPI, backlight and glass classification).

// Declare the two top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/engine/mod.rs).
pub mod domain;
pub mod engine;

// Re-export the most-used types at the crate root so callers can write
// `lcd_core::LayerStack` instead of `lcd_core::domain::stack::LayerStack`.
pub use domain::catalog::{catalog, ArchetypeId, LayerArchetype, LayerKind, MAX_LAYER_THICKNESS_MM};
pub use domain::display::{DisplayField, DisplaySpec, InputError};
pub use domain::level::{Level, LevelCatalog, LevelError, LevelPalette};
pub use domain::requirements::{Requirements, RequirementsError};
pub use domain::stack::{LayerStack, PlacedLayer, StackError};
pub use engine::check::{run_check, CheckFailure, CheckReport, FailureCategory, Metric, Verdict};
pub use engine::metrics::{BacklightType, GlassType, MetricsSnapshot};
pub use engine::structure::is_valid_lcd_structure;
