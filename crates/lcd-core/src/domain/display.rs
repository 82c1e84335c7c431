//! Declared physical size and pixel resolution of the display being built.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four user-entered dimension fields, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayField {
    SizeWidth,
    SizeHeight,
    ResolutionWidth,
    ResolutionHeight,
}

impl fmt::Display for DisplayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DisplayField::SizeWidth => "width (cm)",
            DisplayField::SizeHeight => "height (cm)",
            DisplayField::ResolutionWidth => "resolution width (px)",
            DisplayField::ResolutionHeight => "resolution height (px)",
        };
        f.write_str(s)
    }
}

/// Malformed dimension input, detected before the engine runs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Input Error: {field} must be a non-negative whole number, got {value:?}")]
    NotAnInteger { field: DisplayField, value: String },
}

impl InputError {
    /// The field that should receive focus.
    pub fn field(&self) -> DisplayField {
        match self {
            InputError::NotAnInteger { field, .. } => *field,
        }
    }
}

/// Declared size (centimetres) and resolution (pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySpec {
    pub size_width_cm: u32,
    pub size_height_cm: u32,
    pub res_width_px: u32,
    pub res_height_px: u32,
}

impl DisplaySpec {
    pub fn new(size_width_cm: u32, size_height_cm: u32, res_width_px: u32, res_height_px: u32) -> Self {
        Self {
            size_width_cm,
            size_height_cm,
            res_width_px,
            res_height_px,
        }
    }

    /// Parses the four text fields, reporting the first one that is not a
    /// non-negative whole number.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NotAnInteger`] naming the offending field.
    pub fn parse(
        size_width: &str,
        size_height: &str,
        res_width: &str,
        res_height: &str,
    ) -> Result<Self, InputError> {
        Ok(Self {
            size_width_cm: parse_field(DisplayField::SizeWidth, size_width)?,
            size_height_cm: parse_field(DisplayField::SizeHeight, size_height)?,
            res_width_px: parse_field(DisplayField::ResolutionWidth, res_width)?,
            res_height_px: parse_field(DisplayField::ResolutionHeight, res_height)?,
        })
    }
}

fn parse_field(field: DisplayField, raw: &str) -> Result<u32, InputError> {
    raw.trim().parse().map_err(|_| InputError::NotAnInteger {
        field,
        value: raw.to_string(),
    })
}
