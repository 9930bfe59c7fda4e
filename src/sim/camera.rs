//! FOV camera pose
//!
//! The camera carries three world-space points besides its position: the
//! facing point and one point on each FOV boundary ray. They are derived
//! from the half angle once, at construction. After that the host moves
//! and turns all of them together.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Settings, rotate_about, wrap_angle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FovCamera {
    pub position: Vec2,
    /// Point the camera looks towards
    pub facing: Vec2,
    /// Far point on the left boundary ray
    pub left_boundary: Vec2,
    /// Far point on the right boundary ray
    pub right_boundary: Vec2,
    /// Accumulated heading in [0, 2π)
    heading: f32,
}

impl FovCamera {
    /// Place a camera at `position` looking along `heading` (radians).
    ///
    /// The boundary points sit `facing_distance + reach` away from the
    /// camera, rotated by ∓`half_angle` from the facing direction.
    pub fn new(
        position: Vec2,
        heading: f32,
        half_angle: f32,
        facing_distance: f32,
        reach: f32,
    ) -> Self {
        let dir = Vec2::from_angle(heading);
        let far = position + dir * (facing_distance + reach);
        Self {
            position,
            facing: position + dir * facing_distance,
            left_boundary: rotate_about(far, position, -half_angle),
            right_boundary: rotate_about(far, position, half_angle),
            heading: wrap_angle(heading),
        }
    }

    /// Camera using the distances and FOV angle from `settings`
    pub fn from_settings(position: Vec2, heading: f32, settings: &Settings) -> Self {
        Self::new(
            position,
            heading,
            settings.half_angle(),
            settings.facing_distance,
            settings.boundary_reach,
        )
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Unit facing direction, or zero if the facing point sits on the camera
    pub fn direction(&self) -> Vec2 {
        (self.facing - self.position).normalize_or_zero()
    }

    /// Move the camera and all its reference points by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.facing += delta;
        self.left_boundary += delta;
        self.right_boundary += delta;
    }

    /// Turn the facing point and both boundary points about the camera
    pub fn turn(&mut self, delta: f32) {
        self.facing = rotate_about(self.facing, self.position, delta);
        self.left_boundary = rotate_about(self.left_boundary, self.position, delta);
        self.right_boundary = rotate_about(self.right_boundary, self.position, delta);
        self.heading = wrap_angle(self.heading + delta);
    }
}
