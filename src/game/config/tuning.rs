//! Tuning table
//!
//! Every gameplay constant in one place. `Default` is the shipped tuning;
//! a JSON file may override any subset of fields, section by section.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::ViewConfig;
use crate::game::robo::RoboConfig;
use crate::game::systems::ArmouryConfig;
use crate::physics::{BulletConfig, Vector3};

// ============================================================================
// ERRORS
// ============================================================================

/// Errors that can occur while loading a tuning table.
#[derive(Debug)]
pub enum TuningError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON deserialization error.
    Json(serde_json::Error),
    /// Values that parse but cannot drive a match.
    Invalid(String),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "IO error: {e}"),
            TuningError::Json(e) => write!(f, "JSON error: {e}"),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Json(e)
    }
}

// ============================================================================
// SECTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Gravitational acceleration at time rate 1 (m/s²)
    pub gravity: f64,
    /// Battle length (ms)
    pub match_length_ms: u32,
    /// Time-rate change per SpeedUp / SlowDown press
    pub rate_step: f64,
    /// Lowest reachable time rate
    pub min_rate: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            match_length_ms: 99_000,
            rate_step: 0.1,
            min_rate: 0.1,
        }
    }
}

/// Strategy used when the two combatants touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactShape {
    #[default]
    Sphere,
    Cuboid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub robo_contact: ContactShape,
}

/// Initial placement of everything in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Spawn point of each combatant
    pub spawns: [Vector3; 2],
    /// Initial heading of each combatant (degrees)
    pub headings: [f64; 2],
    pub wall_position: Vector3,
    pub wall_half_extents: Vector3,
    /// Half side length of the square ground
    pub ground_half_extent: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spawns: [Vector3::new(0.0, 10.0, -1.0), Vector3::new(0.0, 10.0, -20.0)],
            headings: [180.0, 0.0],
            wall_position: Vector3::new(0.0, 1.2, -15.0),
            wall_half_extents: Vector3::new(2.0, 1.2, 0.1),
            ground_half_extent: 100.0,
        }
    }
}

// ============================================================================
// TUNING
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub environment: EnvironmentConfig,
    pub robo: RoboConfig,
    pub bullet: BulletConfig,
    pub armoury: ArmouryConfig,
    pub view: ViewConfig,
    pub collision: CollisionConfig,
    pub layout: LayoutConfig,
}

impl Tuning {
    /// Parse and validate a JSON tuning table. Missing fields keep defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "tuning loaded");
        Ok(tuning)
    }

    pub fn to_json_string(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |reason: &str| Err(TuningError::Invalid(reason.to_owned()));

        if self.robo.mass <= 0.0 {
            return invalid("robo.mass must be positive");
        }
        if self.armoury.quota == 0 {
            return invalid("armoury.quota must be at least 1");
        }
        if self.bullet.max_age_ms == 0 {
            return invalid("bullet.max_age_ms must be positive");
        }
        if self.environment.gravity < 0.0 {
            return invalid("environment.gravity must not be negative");
        }
        if self.environment.min_rate <= 0.0 {
            return invalid("environment.min_rate must be positive");
        }
        if self.robo.angle_scale <= 0.0 {
            return invalid("robo.angle_scale must be positive");
        }
        if self.view.pitch_limit < 0.0 {
            return invalid("view.pitch_limit must not be negative");
        }
        let (min_view, max_view) = self.view.angle_of_view_range;
        if min_view > max_view {
            return invalid("view.angle_of_view_range must be ordered (min, max)");
        }
        if self.view.near_clip <= 0.0 || self.view.far_clip <= 0.0 {
            return invalid("view clip planes must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.armoury.quota, 1000);
        assert_eq!(tuning.environment.match_length_ms, 99_000);
        assert_eq!(tuning.collision.robo_contact, ContactShape::Sphere);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(
            r#"{ "armoury": { "quota": 4 }, "collision": { "robo_contact": "cuboid" } }"#,
        )
        .unwrap();
        assert_eq!(tuning.armoury.quota, 4);
        assert_eq!(tuning.collision.robo_contact, ContactShape::Cuboid);
        assert_eq!(tuning.robo, RoboConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json_string().unwrap();
        let parsed = Tuning::from_json_str(&json).unwrap();
        assert_eq!(parsed.armoury, tuning.armoury);
        assert_eq!(parsed.collision, tuning.collision);
        assert_eq!(parsed.layout.spawns, tuning.layout.spawns);
        assert!((parsed.robo.creep_epsilon - tuning.robo.creep_epsilon).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_zero_quota() {
        let err = Tuning::from_json_str(r#"{ "armoury": { "quota": 0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_values_that_break_controls() {
        let cases = [
            r#"{ "view": { "pitch_limit": -1.0 } }"#,
            r#"{ "view": { "angle_of_view_range": [120.0, 30.0] } }"#,
            r#"{ "view": { "near_clip": 0.0 } }"#,
            r#"{ "view": { "far_clip": -10.0 } }"#,
            r#"{ "robo": { "angle_scale": 0.0 } }"#,
            r#"{ "robo": { "angle_scale": -3.0 } }"#,
        ];
        for json in cases {
            let err = Tuning::from_json_str(json).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(_)), "accepted {json}");
        }
    }

    #[test]
    fn test_accepts_zero_pitch_limit_and_fixed_view() {
        let tuning = Tuning::from_json_str(
            r#"{ "view": { "pitch_limit": 0.0, "angle_of_view_range": [60.0, 60.0] } }"#,
        )
        .unwrap();
        assert_eq!(tuning.view.pitch_limit, 0.0);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/nonexistent/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
