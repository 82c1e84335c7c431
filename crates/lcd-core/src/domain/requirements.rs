//! The optional-constraint bag a build must satisfy to pass a level.
//!
//! Every field is optional; an absent field places no constraint on the
//! corresponding metric.  The serialized field names follow the level catalog
//! format (`minResolutionWidth`, `minPPI`, `reflectiveGlass`, ...).

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A requirements bag that can never be satisfied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequirementsError {
    #[error("invalid requirements: minimum {metric} ({min}) exceeds maximum ({max})")]
    InvertedRange {
        metric: &'static str,
        min: String,
        max: String,
    },
}

/// Acceptable ranges and flags for one level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_resolution_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_resolution_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_resolution_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_resolution_height: Option<u32>,
    #[serde(rename = "minPPI", default, skip_serializing_if = "Option::is_none")]
    pub min_ppi: Option<u32>,
    #[serde(rename = "maxPPI", default, skip_serializing_if = "Option::is_none")]
    pub max_ppi: Option<u32>,
    /// Physical width in centimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    /// Physical height in centimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    /// Total stack thickness in millimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_thickness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_thickness: Option<f32>,
    /// `true` requires a mini-LED backlight, `false` a standard one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miniled: Option<bool>,
    /// `true` requires standard (reflective) outer glass, `false` low-reflective.
    /// Some outer glass is always required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflective_glass: Option<bool>,
}

impl Requirements {
    /// Checks that every declared range is satisfiable.
    ///
    /// The engine never calls this; loaders do, so that a level with
    /// `min > max` is rejected when the catalog is read instead of becoming
    /// silently unwinnable.
    ///
    /// # Errors
    ///
    /// Returns [`RequirementsError::InvertedRange`] for the first metric whose
    /// minimum exceeds its maximum.
    pub fn validate(&self) -> Result<(), RequirementsError> {
        check_range("resolution width", self.min_resolution_width, self.max_resolution_width)?;
        check_range("resolution height", self.min_resolution_height, self.max_resolution_height)?;
        check_range("PPI", self.min_ppi, self.max_ppi)?;
        check_range("width", self.min_width, self.max_width)?;
        check_range("height", self.min_height, self.max_height)?;
        check_range("thickness", self.min_thickness, self.max_thickness)?;
        Ok(())
    }

    /// Returns `true` when no field is set.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Human-readable lines for the constraints that are set, in the order the
    /// level info panel lists them.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        push_line(&mut lines, "Minimum resolution width", self.min_resolution_width, "px");
        push_line(&mut lines, "Maximum resolution width", self.max_resolution_width, "px");
        push_line(&mut lines, "Minimum resolution height", self.min_resolution_height, "px");
        push_line(&mut lines, "Maximum resolution height", self.max_resolution_height, "px");
        push_line(&mut lines, "Minimum PPI", self.min_ppi, "");
        push_line(&mut lines, "Maximum PPI", self.max_ppi, "");
        push_line(&mut lines, "Minimum width", self.min_width, "cm");
        push_line(&mut lines, "Maximum width", self.max_width, "cm");
        push_line(&mut lines, "Minimum height", self.min_height, "cm");
        push_line(&mut lines, "Maximum height", self.max_height, "cm");
        if let Some(min) = self.min_thickness {
            lines.push(format!("Minimum thickness: {min:.1}mm"));
        }
        if let Some(max) = self.max_thickness {
            lines.push(format!("Maximum thickness: {max:.1}mm"));
        }
        match self.miniled {
            Some(true) => lines.push("Backlight: Mini-LED".to_string()),
            Some(false) => lines.push("Backlight: Standard LED".to_string()),
            None => {}
        }
        match self.reflective_glass {
            Some(true) => lines.push("Outer glass: Standard".to_string()),
            Some(false) => lines.push("Outer glass: Low-reflective".to_string()),
            None => {}
        }
        lines
    }
}

fn check_range<T: PartialOrd + Display>(
    metric: &'static str,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), RequirementsError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(RequirementsError::InvertedRange {
            metric,
            min: min.to_string(),
            max: max.to_string(),
        }),
        _ => Ok(()),
    }
}

fn push_line(lines: &mut Vec<String>, label: &str, value: Option<u32>, unit: &str) {
    if let Some(v) = value {
        lines.push(format!("{label}: {v}{unit}"));
    }
}
