//! Polygon entities
//!
//! Vertices are stored in world space and mutated in place: moving or
//! rotating an entity rewrites its vertex buffer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{rotate_about, wrap_angle};

/// A polygon placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEntity {
    /// Closed vertex loop in world space (last connects back to first)
    vertices: Vec<Vec2>,
    /// World anchor the shape was placed at
    position: Vec2,
    /// Rotation pivot, as an offset from `position`
    pub centroid: Vec2,
    /// Accumulated rotation in [0, 2π)
    rotation: f32,
}

impl WorldEntity {
    /// Create an entity at the origin from a template shape.
    ///
    /// The shape is copied, so the template can be reused for other entities.
    pub fn new(shape: &[Vec2], centroid: Vec2) -> Self {
        Self {
            vertices: shape.to_vec(),
            position: Vec2::ZERO,
            centroid,
            rotation: 0.0,
        }
    }

    /// Builder-style placement
    pub fn at(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// World-space point the entity rotates about
    pub fn pivot(&self) -> Vec2 {
        self.position + self.centroid
    }

    /// Edges of the vertex loop, wrapping the last vertex to the first
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Move the anchor to `position`, dragging every vertex by the same delta
    pub fn set_position(&mut self, position: Vec2) {
        self.translate(position - self.position);
    }

    /// Translate the anchor and every vertex by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        for v in &mut self.vertices {
            *v += delta;
        }
    }

    /// Rotate every vertex by `delta` radians about the pivot
    pub fn rotate(&mut self, delta: f32) {
        self.rotation = wrap_angle(self.rotation + delta);
        let pivot = self.pivot();
        for v in &mut self.vertices {
            *v = rotate_about(*v, pivot, delta);
        }
    }

    /// Translate by `translation`, then rotate by `rotation` about the
    /// translated pivot
    pub fn apply_rigid_transform(&mut self, translation: Vec2, rotation: f32) {
        self.translate(translation);
        if rotation != 0.0 {
            self.rotate(rotation);
        }
    }

    /// Axis-aligned bounds of the current vertices, as (min, max)
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Whether `point` lies inside the axis-aligned bounds (used for picking)
    pub fn bounds_contain(&self, point: Vec2) -> bool {
        self.bounds()
            .is_some_and(|(lo, hi)| point.cmpge(lo).all() && point.cmple(hi).all())
    }
}
