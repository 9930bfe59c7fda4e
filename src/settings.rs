//! Query and driver settings
//!
//! Loaded from a JSON file next to the scene; missing fields fall back to
//! the demo defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::consts::*;

/// Tunable parameters for the FOV camera and the tick driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Camera ===
    /// Full FOV cone angle in degrees (the query uses half of it)
    pub fov_angle_degrees: f32,
    /// Distance from the camera to its facing point
    pub facing_distance: f32,
    /// Distance past the facing point at which boundary points are placed
    pub boundary_reach: f32,

    // === Driver ===
    /// Camera translation per tick (pixels)
    pub camera_speed: f32,
    /// Camera turn per tick (radians)
    pub turn_step: f32,
    /// Entity spin per tick (radians)
    pub spin_step: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fov_angle_degrees: FOV_ANGLE_DEGREES,
            facing_distance: FACING_DISTANCE,
            boundary_reach: BOUNDARY_REACH,

            camera_speed: FOV_CAMERA_SPEED,
            turn_step: FOV_TURN_STEP,
            spin_step: ENTITY_SPIN_STEP,
        }
    }
}

impl Settings {
    /// Half of the FOV cone, in radians
    pub fn half_angle(&self) -> f32 {
        (self.fov_angle_degrees * 0.5).to_radians()
    }

    /// Check the settings describe a usable camera and driver
    pub fn validate(&self) -> Result<(), Error> {
        let deg = self.fov_angle_degrees;
        if !deg.is_finite() || deg <= 0.0 || deg >= 360.0 {
            return Err(Error::InvalidFovAngle(deg));
        }

        // A zero turn step would never finish a sweep
        let positive = [
            ("facing_distance", self.facing_distance),
            ("turn_step", self.turn_step),
        ];
        let finite = [
            ("boundary_reach", self.boundary_reach),
            ("camera_speed", self.camera_speed),
            ("spin_step", self.spin_step),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidSetting { field, value });
            }
        }
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(Error::InvalidSetting { field, value });
            }
        }
        if self.boundary_reach < 0.0 {
            return Err(Error::InvalidSetting {
                field: "boundary_reach",
                value: self.boundary_reach,
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
