//! The layer stack: an ordered, append/pop-only sequence of placed layers.
//!
//! Index 0 is the back of the display (furthest from the viewer); the last
//! element is the outermost layer.  Layers are only ever appended at the end
//! and only the most recently added layer may be removed, so the stack behaves
//! as a LIFO rather than a general list.  Thickness is the only property that
//! can be edited in place.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use super::catalog::{ArchetypeId, LayerKind, MAX_LAYER_THICKNESS_MM};

/// Errors returned by stack edits.
#[derive(Debug, Error, PartialEq)]
pub enum StackError {
    /// No layer exists at the requested position.
    #[error("no layer at index {index} (stack holds {len} layers)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The requested thickness lies outside `[archetype minimum, cap]`.
    #[error("thickness {requested}mm for {archetype} is outside {min}mm..={max}mm")]
    ThicknessOutOfRange {
        archetype: ArchetypeId,
        requested: f32,
        min: f32,
        max: f32,
    },
}

/// One physical film in the assembled display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLayer {
    /// Unique id of this placement.
    pub id: Uuid,
    pub archetype: ArchetypeId,
    pub thickness_mm: f32,
}

impl PlacedLayer {
    /// Instantiates `archetype` at its minimum thickness.
    pub fn new(archetype: ArchetypeId) -> Self {
        Self {
            id: Uuid::new_v4(),
            archetype,
            thickness_mm: archetype.archetype().min_thickness_mm,
        }
    }

    /// Instantiates `archetype` at an explicit thickness without range checks.
    ///
    /// Intended for fixtures and snapshots; interactive edits go through
    /// [`LayerStack::set_thickness`].
    pub fn with_thickness(archetype: ArchetypeId, thickness_mm: f32) -> Self {
        Self {
            thickness_mm,
            ..Self::new(archetype)
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.archetype.kind()
    }

    pub fn name(&self) -> &'static str {
        self.archetype.archetype().name
    }
}

/// Ordered stack of placed layers owned by a build session.
#[derive(Debug, Clone)]
pub struct LayerStack {
    layers: Vec<PlacedLayer>,
    max_thickness_mm: f32,
}

impl LayerStack {
    /// Creates an empty stack with the default 10mm per-layer cap.
    pub fn new() -> Self {
        Self::with_max_thickness(MAX_LAYER_THICKNESS_MM)
    }

    /// Creates an empty stack with a custom per-layer thickness cap.
    pub fn with_max_thickness(max_thickness_mm: f32) -> Self {
        Self {
            layers: Vec::new(),
            max_thickness_mm,
        }
    }

    /// Appends a new layer at its archetype's minimum thickness.
    pub fn push(&mut self, archetype: ArchetypeId) -> &PlacedLayer {
        self.layers.push(PlacedLayer::new(archetype));
        &self.layers[self.layers.len() - 1]
    }

    /// Removes and returns the most recently added layer.
    ///
    /// Popping an empty stack is a no-op that returns `None`.
    pub fn pop(&mut self) -> Option<PlacedLayer> {
        self.layers.pop()
    }

    /// Resizes the layer at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::IndexOutOfBounds`] if no layer sits at `index`.
    /// Returns [`StackError::ThicknessOutOfRange`] if `thickness_mm` is not
    /// finite or lies outside `[archetype minimum, cap]`.  Out-of-range values
    /// are rejected, never clamped.
    pub fn set_thickness(&mut self, index: usize, thickness_mm: f32) -> Result<(), StackError> {
        let len = self.layers.len();
        let max = self.max_thickness_mm;
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(StackError::IndexOutOfBounds { index, len })?;

        let min = layer.archetype.archetype().min_thickness_mm;
        if !thickness_mm.is_finite() || thickness_mm < min || thickness_mm > max {
            warn!(
                archetype = %layer.archetype,
                requested = thickness_mm,
                "rejected layer thickness outside {min}..={max}"
            );
            return Err(StackError::ThicknessOutOfRange {
                archetype: layer.archetype,
                requested: thickness_mm,
                min,
                max,
            });
        }

        layer.thickness_mm = thickness_mm;
        Ok(())
    }

    /// Removes every layer.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Borrowed view of the layers, back to front.
    pub fn layers(&self) -> &[PlacedLayer] {
        &self.layers
    }

    /// The kind of each layer, back to front.
    pub fn kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(PlacedLayer::kind).collect()
    }

    /// Owned copy of the current layers for a validation run.
    pub fn snapshot(&self) -> Vec<PlacedLayer> {
        self.layers.clone()
    }

    /// Display labels of the form `"1. Standard LED Backlight"`.
    pub fn labels(&self) -> Vec<String> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, layer)| format!("{}. {}", i + 1, layer.name()))
            .collect()
    }

    /// The per-layer thickness cap in millimetres.
    pub fn max_thickness_mm(&self) -> f32 {
        self.max_thickness_mm
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
