//! Domain entities for Display Builder.
//!
//! This module contains pure data types and their invariants, with no
//! infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain** (or "entities" layer).  Domain code:
//!
//! - Contains the core business rules of the application.
//! - Has **no** imports from file-system APIs, terminals, or UI frameworks.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Here the domain is the vocabulary of a display build: which layers exist,
//! how they are stacked, what size the display claims to be, and what a level
//! asks of it.

/// The fixed registry of layer archetypes.
pub mod catalog;
/// Declared physical size and pixel resolution.
pub mod display;
/// Levels and the in-memory level catalog.
pub mod level;
/// The optional-constraint bag a build must satisfy.
pub mod requirements;
/// The ordered, append/pop-only stack of placed layers.
pub mod stack;
