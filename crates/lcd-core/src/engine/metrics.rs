//! Physical metrics derived from a layer stack and the declared display spec.

use std::fmt;

use serde::Serialize;

use crate::domain::catalog::{ArchetypeId, LayerKind};
use crate::domain::display::DisplaySpec;
use crate::domain::stack::PlacedLayer;

/// Centimetre to inch conversion factor.
pub const INCHES_PER_CM: f64 = 0.39371;

/// Width of the tolerance band for aspect-ratio consistency.
const ASPECT_TOLERANCE: f64 = 0.5;

/// Backlight classification of an assembled display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BacklightType {
    #[serde(rename = "LCD")]
    Lcd,
    #[serde(rename = "Mini-LED LCD")]
    MiniLedLcd,
}

impl BacklightType {
    /// Native contrast ratio advertised for this backlight type.
    pub fn contrast_ratio(self) -> &'static str {
        match self {
            BacklightType::Lcd => "1000:1",
            BacklightType::MiniLedLcd => "1 000 000:1",
        }
    }
}

impl fmt::Display for BacklightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BacklightType::Lcd => "LCD",
            BacklightType::MiniLedLcd => "Mini-LED LCD",
        })
    }
}

/// Classification of the outermost layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GlassType {
    /// The outermost layer is missing or is not glass.
    #[serde(rename = "none")]
    None,
    #[serde(rename = "Standard Glass")]
    Standard,
    #[serde(rename = "Low-reflective Glass")]
    LowReflective,
}

impl fmt::Display for GlassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GlassType::None => "none",
            GlassType::Standard => "Standard Glass",
            GlassType::LowReflective => "Low-reflective Glass",
        })
    }
}

/// Sum of all layer thicknesses in millimetres.  Independent of order.
pub fn total_thickness_mm(layers: &[PlacedLayer]) -> f32 {
    layers.iter().map(|l| l.thickness_mm).sum()
}

/// Returns `true` if the pixel aspect ratio and the physical aspect ratio
/// differ by less than the tolerance band.
///
/// The difference `res_w/res_h - size_w/size_h` must lie in `(-0.5, 0.5]`.
/// A zero height on either side fails the check instead of dividing by zero.
pub fn aspect_ratios_match(spec: &DisplaySpec) -> bool {
    if spec.res_height_px == 0 || spec.size_height_cm == 0 {
        return false;
    }
    let pixel_ratio = f64::from(spec.res_width_px) / f64::from(spec.res_height_px);
    let size_ratio = f64::from(spec.size_width_cm) / f64::from(spec.size_height_cm);
    let r_adapted = pixel_ratio - size_ratio;

    (0.0..=ASPECT_TOLERANCE).contains(&r_adapted) || (r_adapted < 0.0 && r_adapted > -ASPECT_TOLERANCE)
}

/// Pixels per inch along the diagonal, rounded down.  Zero when the physical
/// diagonal is zero.
pub fn ppi(spec: &DisplaySpec) -> u32 {
    let inch_width = f64::from(spec.size_width_cm) * INCHES_PER_CM;
    let inch_height = f64::from(spec.size_height_cm) * INCHES_PER_CM;
    let diagonal_inches = inch_width.hypot(inch_height);
    if diagonal_inches == 0.0 {
        return 0;
    }
    let diagonal_pixels = f64::from(spec.res_width_px).hypot(f64::from(spec.res_height_px));
    (diagonal_pixels / diagonal_inches).floor() as u32
}

/// Classifies the backlight as the first non-glass layer from the back.
///
/// Only the mini-LED archetype yields [`BacklightType::MiniLedLcd`].  A stack
/// that is empty or holds only glass classifies as [`BacklightType::Lcd`].
pub fn backlight_type(layers: &[PlacedLayer]) -> BacklightType {
    match layers.iter().find(|l| l.kind() != LayerKind::Glass) {
        Some(layer) if layer.archetype == ArchetypeId::MiniLedBacklight => BacklightType::MiniLedLcd,
        _ => BacklightType::Lcd,
    }
}

/// Classifies the outermost layer.
pub fn glass_type(layers: &[PlacedLayer]) -> GlassType {
    match layers.last().map(|l| l.archetype) {
        Some(ArchetypeId::StandardGlass) => GlassType::Standard,
        Some(ArchetypeId::LowReflectiveGlass) => GlassType::LowReflective,
        _ => GlassType::None,
    }
}

/// Metrics reported alongside a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub thickness_mm: f32,
    pub ppi: u32,
    pub backlight_type: BacklightType,
    pub glass_type: GlassType,
}

impl MetricsSnapshot {
    /// Derives every metric from `layers` and `spec`.
    pub fn capture(layers: &[PlacedLayer], spec: &DisplaySpec) -> Self {
        Self {
            thickness_mm: total_thickness_mm(layers),
            ppi: ppi(spec),
            backlight_type: backlight_type(layers),
            glass_type: glass_type(layers),
        }
    }
}
