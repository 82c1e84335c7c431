//! The ordered gate sequence that turns a build into a verdict.
//!
//! Gates run in a fixed order and the first failing gate decides the
//! diagnostic message; later gates are not evaluated.  The order is:
//!
//! ```text
//! 1. aspect ratio        (Dimensions)
//! 2. layer structure     (Structure)
//! 3. -- PPI is computed from here on --
//! 4. backlight type      (Requirements)
//! 5. outer glass present (Structure)
//! 6. outer glass type    (Requirements)
//! 7-8.   thickness min / max
//! 9.     resolution width / height min / max
//! 10.    PPI min / max
//! 11.    physical width / height min / max
//! ```
//!
//! A failed verdict is a normal value, never an error: the user edits the
//! build and runs it again.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::metrics::{aspect_ratios_match, BacklightType, GlassType, MetricsSnapshot};
use super::structure::is_valid_lcd_structure;
use crate::domain::display::DisplaySpec;
use crate::domain::requirements::Requirements;
use crate::domain::stack::PlacedLayer;

/// Integer metrics compared against optional min/max bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    ResolutionWidth,
    ResolutionHeight,
    Ppi,
    Width,
    Height,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::ResolutionWidth => "resolution width",
            Metric::ResolutionHeight => "resolution height",
            Metric::Ppi => "PPI",
            Metric::Width => "width",
            Metric::Height => "height",
        })
    }
}

/// Broad class of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureCategory {
    Dimensions,
    Structure,
    Requirements,
}

/// The gate that rejected a build.  The `Display` impl is the message shown
/// to the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckFailure {
    #[error("Dimensions Error: Display aspect ratios (cm and pixels) do not match.")]
    AspectRatioMismatch,

    #[error("Structure Error: Display's layers are not placed correctly.")]
    LayersMisplaced,

    #[error("Requirements Error: wrong LCD backlight type.")]
    WrongBacklight {
        required: BacklightType,
        found: BacklightType,
    },

    #[error("Structure Error: no outer glass.")]
    NoOuterGlass,

    #[error("Requirements Error: wrong outer glass type.")]
    WrongGlass { required: GlassType, found: GlassType },

    #[error(
        "Requirements Error: display too thin: {thickness_mm}mm \
         (minimum thickness requirement not respected)."
    )]
    TooThin { thickness_mm: f32, min_mm: f32 },

    #[error(
        "Requirements Error: display too thick: {thickness_mm}mm \
         (maximum thickness requirement not respected)."
    )]
    TooThick { thickness_mm: f32, max_mm: f32 },

    #[error("Requirements Error: minimum {metric} requirement not respected.")]
    BelowMinimum { metric: Metric, value: u32, min: u32 },

    #[error("Requirements Error: maximum {metric} requirement not respected.")]
    AboveMaximum { metric: Metric, value: u32, max: u32 },
}

impl CheckFailure {
    pub fn category(&self) -> FailureCategory {
        match self {
            CheckFailure::AspectRatioMismatch => FailureCategory::Dimensions,
            CheckFailure::LayersMisplaced | CheckFailure::NoOuterGlass => FailureCategory::Structure,
            _ => FailureCategory::Requirements,
        }
    }

    /// `true` for failures raised before PPI is computed.
    fn precedes_ppi(&self) -> bool {
        matches!(self, CheckFailure::AspectRatioMismatch | CheckFailure::LayersMisplaced)
    }
}

/// Pass/fail outcome of one run.  `message` is empty when the run passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
    #[serde(skip)]
    pub failure: Option<CheckFailure>,
}

impl Verdict {
    fn from_outcome(outcome: Result<(), CheckFailure>) -> Self {
        match outcome {
            Ok(()) => Self {
                passed: true,
                message: String::new(),
                failure: None,
            },
            Err(failure) => Self {
                passed: false,
                message: failure.to_string(),
                failure: Some(failure),
            },
        }
    }

    pub fn category(&self) -> Option<FailureCategory> {
        self.failure.as_ref().map(CheckFailure::category)
    }
}

/// Verdict plus the metrics the results panel displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub verdict: Verdict,
    pub metrics: MetricsSnapshot,
}

/// Validates `layers` (back to front) with `spec` against `requirements`.
///
/// `requirements` is used as given; an inverted range simply makes the build
/// unwinnable.  Loaders reject such ranges with
/// [`Requirements::validate`](crate::Requirements::validate).
///
/// `metrics.ppi` is 0 when the run stops before the PPI step.
pub fn run_check(
    layers: &[PlacedLayer],
    spec: &DisplaySpec,
    requirements: &Requirements,
) -> CheckReport {
    let mut metrics = MetricsSnapshot::capture(layers, spec);
    let outcome = evaluate(layers, spec, requirements, &metrics);

    if let Err(failure) = &outcome {
        debug!(category = ?failure.category(), "build rejected: {failure}");
        if failure.precedes_ppi() {
            metrics.ppi = 0;
        }
    }

    CheckReport {
        verdict: Verdict::from_outcome(outcome),
        metrics,
    }
}

fn evaluate(
    layers: &[PlacedLayer],
    spec: &DisplaySpec,
    req: &Requirements,
    metrics: &MetricsSnapshot,
) -> Result<(), CheckFailure> {
    if !aspect_ratios_match(spec) {
        return Err(CheckFailure::AspectRatioMismatch);
    }

    if !is_valid_lcd_structure(layers.iter().map(PlacedLayer::kind)) {
        return Err(CheckFailure::LayersMisplaced);
    }

    if let Some(miniled) = req.miniled {
        let required = if miniled {
            BacklightType::MiniLedLcd
        } else {
            BacklightType::Lcd
        };
        if metrics.backlight_type != required {
            return Err(CheckFailure::WrongBacklight {
                required,
                found: metrics.backlight_type,
            });
        }
    }

    if metrics.glass_type == GlassType::None {
        return Err(CheckFailure::NoOuterGlass);
    }

    if let Some(reflective) = req.reflective_glass {
        let required = if reflective {
            GlassType::Standard
        } else {
            GlassType::LowReflective
        };
        if metrics.glass_type != required {
            return Err(CheckFailure::WrongGlass {
                required,
                found: metrics.glass_type,
            });
        }
    }

    let thickness_mm = metrics.thickness_mm;
    if let Some(min_mm) = req.min_thickness {
        if thickness_mm < min_mm {
            return Err(CheckFailure::TooThin { thickness_mm, min_mm });
        }
    }
    if let Some(max_mm) = req.max_thickness {
        if thickness_mm > max_mm {
            return Err(CheckFailure::TooThick { thickness_mm, max_mm });
        }
    }

    within(Metric::ResolutionWidth, spec.res_width_px, req.min_resolution_width, req.max_resolution_width)?;
    within(Metric::ResolutionHeight, spec.res_height_px, req.min_resolution_height, req.max_resolution_height)?;
    within(Metric::Ppi, metrics.ppi, req.min_ppi, req.max_ppi)?;
    within(Metric::Width, spec.size_width_cm, req.min_width, req.max_width)?;
    within(Metric::Height, spec.size_height_cm, req.min_height, req.max_height)?;

    Ok(())
}

fn within(metric: Metric, value: u32, min: Option<u32>, max: Option<u32>) -> Result<(), CheckFailure> {
    if let Some(min) = min {
        if value < min {
            return Err(CheckFailure::BelowMinimum { metric, value, min });
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(CheckFailure::AboveMaximum { metric, value, max });
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
