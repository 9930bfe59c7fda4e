//! Angular field-of-view test
//!
//! A cone test only: range is unbounded.

use glam::{DVec2, Vec2};

/// Whether `target` lies inside the cone of half angle `half_angle`
/// (radians) opening from `observer` towards `facing_point`.
///
/// The boundary is inclusive. A zero-length facing or target direction
/// fails closed and reports `false` for any half angle.
///
/// Compared in f64 without normalizing, so a point exactly on the centre
/// ray passes even with a zero half angle.
pub fn in_fov(observer: Vec2, facing_point: Vec2, target: Vec2, half_angle: f32) -> bool {
    let observer = observer.as_dvec2();
    let facing = facing_point.as_dvec2() - observer;
    let to_target = target.as_dvec2() - observer;

    if facing == DVec2::ZERO || to_target == DVec2::ZERO {
        return false;
    }

    let lengths = (facing.length_squared() * to_target.length_squared()).sqrt();
    facing.dot(to_target) >= f64::from(half_angle).cos() * lengths
}
