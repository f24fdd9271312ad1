//! Walk settings and tunables
//!
//! Persisted as JSON next to the binary; any missing field falls back to the
//! built-in default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{LabyrinthError, Result};

/// Labyrinth, movement and pickup tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Maze ===
    /// Labyrinth side, in cells
    pub side: usize,
    /// Probability of opening an extra wall at each dead end (0 = perfect maze)
    pub braid: f32,

    // === World ===
    /// Half of the floor extent in world units
    pub world_half_extent: f32,

    // === Movement ===
    /// Walking speed (world units per second)
    pub walk_speed: f32,
    /// Turning speed (radians per second)
    pub turn_rate: f32,
    /// Agent bounding radius for collision probes
    pub agent_bbox: f32,

    // === Items ===
    /// Rendered item width/height
    pub item_size: f32,
    /// Pickup distance in grid cells
    pub pickup_radius: f32,
    /// Random draws before the spawner scans for a free cell
    pub max_spawn_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            side: LAB_SIDE,
            braid: 0.0,

            world_half_extent: WORLD_HALF_EXTENT,

            walk_speed: WALK_SPEED,
            turn_rate: TURN_RATE,
            agent_bbox: AGENT_BBOX,

            item_size: ITEM_SIZE,
            pickup_radius: PICKUP_RADIUS,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(MIN_LAB_SIDE..=MAX_LAB_SIDE).contains(&self.side) {
            return Err(LabyrinthError::InvalidSide {
                side: self.side,
                min: MIN_LAB_SIDE,
                max: MAX_LAB_SIDE,
            });
        }
        if !(0.0..=1.0).contains(&self.braid) {
            return Err(LabyrinthError::InvalidBraid(self.braid));
        }
        positive("world_half_extent", self.world_half_extent)?;
        non_negative("walk_speed", self.walk_speed)?;
        non_negative("turn_rate", self.turn_rate)?;
        non_negative("agent_bbox", self.agent_bbox)?;
        positive("item_size", self.item_size)?;
        positive("pickup_radius", self.pickup_radius)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LabyrinthError::setting(name, format!("{value} must be finite and > 0")))
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LabyrinthError::setting(name, format!("{value} must be finite and >= 0")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.side, 15);
        assert!((settings.walk_speed - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "side": 21, "braid": 0.5 }"#).unwrap();
        assert_eq!(settings.side, 21);
        assert!((settings.braid - 0.5).abs() < f32::EPSILON);
        assert_eq!(settings.max_spawn_attempts, MAX_SPAWN_ATTEMPTS);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "side": 2 }"#),
            Err(LabyrinthError::InvalidSide { side: 2, .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "braid": 1.5 }"#),
            Err(LabyrinthError::InvalidBraid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "world_half_extent": 0.0 }"#),
            Err(LabyrinthError::InvalidSetting { name: "world_half_extent", .. })
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(LabyrinthError::Json(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "labyrinth_walk_settings_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            side: 9,
            walk_speed: 4.0,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
