//! Sightline - 2D line of sight with a bounded field of view
//!
//! Core modules:
//! - `sim`: Visibility queries (segment intersection, FOV clipping, occlusion scan)
//!   plus the polygon entities, scene and camera they run against
//! - `settings`: Data-driven query and driver tuning
//! - `error`: Construction/configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use settings::Settings;

use glam::Vec2;

/// Scene configuration constants
pub mod consts {
    /// Full FOV cone angle of the demo camera
    pub const FOV_ANGLE_DEGREES: f32 = 60.0;
    /// Camera translation per tick (pixels)
    pub const FOV_CAMERA_SPEED: f32 = 1.0;
    /// Camera turn per tick (radians)
    pub const FOV_TURN_STEP: f32 = 0.01;
    /// Entity spin per tick (radians)
    pub const ENTITY_SPIN_STEP: f32 = 0.01;
    /// Distance from the camera to its facing point
    pub const FACING_DISTANCE: f32 = 50.0;
    /// How far past the facing point the boundary ray points are placed.
    /// Edges beyond this distance are never clipped against the boundary.
    pub const BOUNDARY_REACH: f32 = 10_000.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Rotate `point` counter-clockwise by `angle` radians about `pivot`
#[inline]
pub fn rotate_about(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    pivot + Vec2::from_angle(angle).rotate(point - pivot)
}
