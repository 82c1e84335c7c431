//! Application layer for the builder.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules) and the infrastructure (files, terminal, config).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "run my
//!   build against the selected level and mark it completed if it passes").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so level catalogs can come from a file, the bundled data, or a test mock.
//! - **Contain no file system access and no terminal output**.
//!
//! # Sub-modules
//!
//! - **`level_source`** – The trait that supplies the list of levels.
//!
//! - **`session`** – The builder session: it owns the layer stack, the last
//!   declared display spec, the level catalog and the active level, and runs
//!   the validation engine on request.

pub mod level_source;
pub mod session;
