//! Layer archetype catalog.
//!
//! Every layer the user can place is instantiated from one of seven fixed
//! archetypes.  An archetype carries the layer's kind (what role it plays in
//! the optical stack), its display name, a short description, and the minimum
//! physical thickness a placed instance may have.
//!
//! Classification elsewhere in the crate compares [`ArchetypeId`] values, never
//! display names, so renaming an archetype cannot change a verdict.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for the thickness of any placed layer, in millimetres.
pub const MAX_LAYER_THICKNESS_MM: f32 = 10.0;

/// The optical role a layer plays in an LCD stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    Backlight,
    TftArray,
    LiquidCrystal,
    Polarizer,
    Glass,
    /// Wildcard slot in the canonical LCD pattern.  Never a placed layer.
    None,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LayerKind::Backlight => "backlight",
            LayerKind::TftArray => "tft-array",
            LayerKind::LiquidCrystal => "liquid-crystal",
            LayerKind::Polarizer => "polarizer",
            LayerKind::Glass => "glass",
            LayerKind::None => "none",
        };
        f.write_str(s)
    }
}

/// Stable identity of a catalog archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchetypeId {
    StandardBacklight,
    MiniLedBacklight,
    TftArray,
    LiquidCrystal,
    Polarizer,
    StandardGlass,
    LowReflectiveGlass,
}

impl ArchetypeId {
    /// All archetype ids in picker order.
    pub const ALL: [ArchetypeId; 7] = [
        ArchetypeId::StandardBacklight,
        ArchetypeId::MiniLedBacklight,
        ArchetypeId::TftArray,
        ArchetypeId::LiquidCrystal,
        ArchetypeId::Polarizer,
        ArchetypeId::StandardGlass,
        ArchetypeId::LowReflectiveGlass,
    ];

    /// Returns the static catalog entry for this id.
    pub fn archetype(self) -> &'static LayerArchetype {
        &ARCHETYPES[self as usize]
    }

    /// Shorthand for `self.archetype().kind`.
    pub fn kind(self) -> LayerKind {
        self.archetype().kind
    }

    /// The kebab-case identifier used in build files and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            ArchetypeId::StandardBacklight => "standard-backlight",
            ArchetypeId::MiniLedBacklight => "mini-led-backlight",
            ArchetypeId::TftArray => "tft-array",
            ArchetypeId::LiquidCrystal => "liquid-crystal",
            ArchetypeId::Polarizer => "polarizer",
            ArchetypeId::StandardGlass => "standard-glass",
            ArchetypeId::LowReflectiveGlass => "low-reflective-glass",
        }
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no catalog archetype.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown layer archetype: {0:?}")]
pub struct UnknownArchetype(pub String);

impl FromStr for ArchetypeId {
    type Err = UnknownArchetype;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArchetypeId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownArchetype(s.to_string()))
    }
}

/// An immutable catalog definition that placed layers are instantiated from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerArchetype {
    pub id: ArchetypeId,
    pub kind: LayerKind,
    /// Human-readable name shown in the picker and results panel.
    pub name: &'static str,
    /// Descriptive text shown in the picker.
    pub info: &'static str,
    /// Thickness a freshly placed layer starts at, and the lower bound for resizing.
    pub min_thickness_mm: f32,
}

// Indexed by `ArchetypeId as usize`; the order must match the enum declaration.
static ARCHETYPES: [LayerArchetype; 7] = [
    LayerArchetype {
        id: ArchetypeId::StandardBacklight,
        kind: LayerKind::Backlight,
        name: "Standard LED Backlight",
        info: "The backlight lights up the display. It sits at the back of your display and \
               its light goes through different layers.",
        min_thickness_mm: 0.5,
    },
    LayerArchetype {
        id: ArchetypeId::MiniLedBacklight,
        kind: LayerKind::Backlight,
        name: "Mini-LED Backlight",
        info: "The Mini-LED Backlight is a backlight that can turn off specific LEDs. It can \
               provide higher contrast and true blacks, since Liquid Crystals don't turn fully \
               opaque.",
        min_thickness_mm: 1.1,
    },
    LayerArchetype {
        id: ArchetypeId::TftArray,
        kind: LayerKind::TftArray,
        name: "TFT Array",
        info: "The Thin-Film Transistor Array is a transparent film that controls the Liquid \
               Crystals by providing them with more or less electrical current. Transistors are \
               electrical circuit parts that act like a switch.",
        min_thickness_mm: 0.2,
    },
    LayerArchetype {
        id: ArchetypeId::LiquidCrystal,
        kind: LayerKind::LiquidCrystal,
        name: "Liquid Crystal Array",
        info: "The Liquid Crystals are transparent, but they turn almost fully opaque when \
               enough current is applied. They dim the light provided by the backlight. In front \
               of them sits a color filter that splits the light into red, green and blue.",
        min_thickness_mm: 0.1,
    },
    LayerArchetype {
        id: ArchetypeId::Polarizer,
        kind: LayerKind::Polarizer,
        name: "Polarizer",
        info: "The polarizer blocks light that is not oscillating in one specific direction. \
               Two of them are required to produce visible images.",
        min_thickness_mm: 0.1,
    },
    LayerArchetype {
        id: ArchetypeId::StandardGlass,
        kind: LayerKind::Glass,
        name: "Standard Glass",
        info: "Standard, reflective glass.",
        min_thickness_mm: 0.3,
    },
    LayerArchetype {
        id: ArchetypeId::LowReflectiveGlass,
        kind: LayerKind::Glass,
        name: "Low-reflective Glass",
        info: "Low-reflective glass stays readable in environments with uncontrolled lighting.",
        min_thickness_mm: 0.4,
    },
];

/// Returns every archetype in picker order.
pub fn catalog() -> &'static [LayerArchetype] {
    &ARCHETYPES
}

// ── Tests ─────────────────────────────────────────────────────────────────────
