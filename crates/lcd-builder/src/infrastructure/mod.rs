//! Infrastructure layer for the builder.
//!
//! Contains the file-system adapters: configuration, level catalogs and
//! build description files.
//!
//! **Dependency rule**: this layer may depend on `application` and `lcd_core`,
//! but MUST NOT be imported by the `application` or domain layers.

pub mod storage;
