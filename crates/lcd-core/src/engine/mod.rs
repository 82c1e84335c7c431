//! The validation engine.
//!
//! Everything in this module is a pure function of its inputs: a borrowed
//! slice of placed layers, a [`DisplaySpec`](crate::DisplaySpec) and a
//! [`Requirements`](crate::Requirements) bag.  There is no shared state, so a
//! run on an unchanged snapshot always produces the same report.
//!
//! # Sub-modules
//!
//! - **`structure`** – Decides whether the ordered layer kinds form a working
//!   LCD.
//! - **`metrics`** – Derives thickness, aspect-ratio consistency, PPI, and the
//!   backlight / glass classification.
//! - **`check`** – Runs the ordered gate sequence and produces the verdict.

pub mod check;
pub mod metrics;
pub mod structure;
