//! Levels and the in-memory level catalog.
//!
//! A level pairs a name and description with a [`Requirements`] bag.  Levels
//! are static data supplied by an outer layer (a JSON file or the bundled
//! catalog); the only mutable part is the `completed` flag, which a session
//! sets after a passing run.  Progress is never persisted by this crate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::requirements::{Requirements, RequirementsError};

/// Errors raised while assembling or updating a [`LevelCatalog`].
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("duplicate level id {0}")]
    DuplicateId(u32),

    #[error("unknown level id {0}")]
    UnknownLevel(u32),

    #[error("level {level} has unsatisfiable requirements: {source}")]
    InvalidRequirements {
        level: u32,
        #[source]
        source: RequirementsError,
    },
}

/// The two gradient colors a level is drawn with, as RGB components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelPalette {
    #[serde(rename = "color1_Red")]
    pub color1_red: f64,
    #[serde(rename = "color1_Green")]
    pub color1_green: f64,
    #[serde(rename = "color1_Blue")]
    pub color1_blue: f64,
    #[serde(rename = "color2_Red")]
    pub color2_red: f64,
    #[serde(rename = "color2_Green")]
    pub color2_green: f64,
    #[serde(rename = "color2_Blue")]
    pub color2_blue: f64,
}

/// One level of the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub palette: LevelPalette,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub requirements: Requirements,
}

/// Ordered collection of levels with unique ids.
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Builds a catalog, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::DuplicateId`] if two levels share an id, or
    /// [`LevelError::InvalidRequirements`] if any level declares an inverted
    /// range.
    pub fn from_levels(levels: Vec<Level>) -> Result<Self, LevelError> {
        let mut seen = HashSet::with_capacity(levels.len());
        for level in &levels {
            if !seen.insert(level.id) {
                return Err(LevelError::DuplicateId(level.id));
            }
            level
                .requirements
                .validate()
                .map_err(|source| LevelError::InvalidRequirements {
                    level: level.id,
                    source,
                })?;
        }
        Ok(Self { levels })
    }

    pub fn get(&self, id: u32) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// The first level in catalog order, used when nothing is selected.
    pub fn first(&self) -> Option<&Level> {
        self.levels.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Flags level `id` as completed.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::UnknownLevel`] if no level has that id.
    pub fn mark_completed(&mut self, id: u32) -> Result<(), LevelError> {
        let level = self
            .levels
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(LevelError::UnknownLevel(id))?;
        level.completed = true;
        Ok(())
    }

    pub fn completed_count(&self) -> usize {
        self.levels.iter().filter(|l| l.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(id: u32) -> Level {
        Level {
            id,
            name: format!("Level {id}"),
            description: "test level".to_string(),
            palette: LevelPalette::default(),
            completed: false,
            requirements: Requirements::default(),
        }
    }

    #[test]
    fn test_from_levels_preserves_order() {
        let catalog = LevelCatalog::from_levels(vec![level(3), level(1), level(2)]).unwrap();
        let ids: Vec<u32> = catalog.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(catalog.first().map(|l| l.id), Some(3));
    }

    #[test]
    fn test_from_levels_rejects_duplicate_ids() {
        let err = LevelCatalog::from_levels(vec![level(1), level(1)]).unwrap_err();
        assert_eq!(err, LevelError::DuplicateId(1));
    }

    #[test]
    fn test_from_levels_rejects_inverted_requirements() {
        let mut bad = level(7);
        bad.requirements.min_height = Some(50);
        bad.requirements.max_height = Some(10);

        let err = LevelCatalog::from_levels(vec![level(1), bad]).unwrap_err();

        assert!(matches!(err, LevelError::InvalidRequirements { level: 7, .. }));
    }

    #[test]
    fn test_mark_completed_sets_flag() {
        let mut catalog = LevelCatalog::from_levels(vec![level(0), level(1)]).unwrap();

        catalog.mark_completed(1).unwrap();

        assert!(catalog.get(1).unwrap().completed);
        assert!(!catalog.get(0).unwrap().completed);
        assert_eq!(catalog.completed_count(), 1);
    }

    #[test]
    fn test_mark_completed_unknown_level() {
        let mut catalog = LevelCatalog::from_levels(vec![level(0)]).unwrap();
        assert_eq!(catalog.mark_completed(9), Err(LevelError::UnknownLevel(9)));
    }

    #[test]
    fn test_level_deserializes_flat_palette_fields() {
        let json = r#"{
            "id": 0,
            "name": "First Display",
            "description": "Build any working LCD.",
            "color1_Red": 0.1, "color1_Green": 0.2, "color1_Blue": 0.3,
            "color2_Red": 0.4, "color2_Green": 0.5, "color2_Blue": 0.6,
            "completed": false,
            "requirements": { "minThickness": 1.0 }
        }"#;

        let level: Level = serde_json::from_str(json).expect("deserialize");

        assert_eq!(level.name, "First Display");
        assert_eq!(level.palette.color1_green, 0.2);
        assert_eq!(level.palette.color2_blue, 0.6);
        assert_eq!(level.requirements.min_thickness, Some(1.0));
    }

    #[test]
    fn test_level_without_requirements_is_unconstrained() {
        let json = r#"{
            "id": 4, "name": "Free Build", "description": "",
            "color1_Red": 0, "color1_Green": 0, "color1_Blue": 0,
            "color2_Red": 1, "color2_Green": 1, "color2_Blue": 1
        }"#;
        let level: Level = serde_json::from_str(json).expect("deserialize");
        assert!(level.requirements.is_unconstrained());
        assert!(!level.completed);
    }
}
