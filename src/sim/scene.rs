//! Scene: the fixed set of polygons a query runs against
//!
//! The host owns the scene and mutates it between queries; the visibility
//! engine only ever borrows it.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::WorldEntity;
use crate::Error;

/// Index of an entity within its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub usize);

impl EntityId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed collection of world entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    entities: Vec<WorldEntity>,
}

impl Scene {
    pub fn new(entities: Vec<WorldEntity>) -> Self {
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        id.0 < self.entities.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&WorldEntity> {
        self.entities.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut WorldEntity> {
        self.entities.get_mut(id.0)
    }

    /// All entities with their ids, in scene order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &WorldEntity)> {
        self.entities.iter().enumerate().map(|(i, e)| (EntityId(i), e))
    }

    /// Every entity except `target`, in scene order
    pub fn obstacles(&self, target: EntityId) -> impl Iterator<Item = &WorldEntity> {
        self.iter()
            .filter(move |(id, _)| *id != target)
            .map(|(_, e)| e)
    }

    /// Topmost entity whose bounds contain `point` (last in scene order wins)
    pub fn pick(&self, point: Vec2) -> Option<EntityId> {
        self.entities
            .iter()
            .rposition(|e| e.bounds_contain(point))
            .map(EntityId)
    }
}

/// Serialized description of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDesc {
    /// Vertex loop in model space (placed at the origin)
    pub shape: Vec<Vec2>,
    /// World placement
    pub position: Vec2,
    /// Rotation pivot relative to `position`
    #[serde(default)]
    pub centroid: Vec2,
}

/// Where the FOV camera starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    pub position: Vec2,
    /// Facing angle in radians (π/2 looks down the +y axis)
    pub heading: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        // Centre of an 853x480 view inset by a 5% safe area
        Self {
            position: Vec2::new(383.0, 216.0),
            heading: std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Serialized description of a scene and its initial target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    pub entities: Vec<EntityDesc>,
    /// Index of the entity the camera is looking for
    pub target: EntityId,
    #[serde(default)]
    pub camera: CameraDesc,
}

impl SceneDesc {
    /// Validate the description and build the scene
    pub fn build(&self) -> Result<(Scene, EntityId), Error> {
        let mut entities = Vec::with_capacity(self.entities.len());
        for (i, desc) in self.entities.iter().enumerate() {
            if desc.shape.len() < 2 {
                return Err(Error::InsufficientVertices {
                    entity: i,
                    count: desc.shape.len(),
                });
            }
            let finite = desc.shape.iter().all(|v| v.is_finite())
                && desc.position.is_finite()
                && desc.centroid.is_finite();
            if !finite {
                return Err(Error::NonFiniteCoordinate { entity: i });
            }
            entities.push(WorldEntity::new(&desc.shape, desc.centroid).at(desc.position));
        }

        let scene = Scene::new(entities);
        if !scene.contains(self.target) {
            return Err(Error::UnknownEntity(self.target));
        }
        log::debug!(
            "Built scene with {} entities, target {}",
            scene.len(),
            self.target.index()
        );
        Ok((scene, self.target))
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene description from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let desc = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded scene with {} entities from {}",
            desc.entities.len(),
            path.display()
        );
        Ok(desc)
    }

    /// The classic four-shape demo: a square target, a triangle, a concave
    /// crescent and a second square beside the target.
    pub fn demo() -> Self {
        let square = vec![
            Vec2::new(0.0, 50.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(0.0, 0.0),
        ];
        let triangle = vec![
            Vec2::new(0.0, 49.0),
            Vec2::new(23.0, 3.0),
            Vec2::new(49.0, 49.0),
        ];
        let crescent = [
            (3.0, 38.0),
            (1.0, 32.0),
            (0.0, 26.0),
            (0.0, 21.0),
            (1.0, 14.0),
            (4.0, 8.0),
            (8.0, 5.0),
            (12.0, 2.0),
            (16.0, 0.0),
            (20.0, 0.0),
            (28.0, 0.0),
            (34.0, 1.0),
            (40.0, 4.0),
            (44.0, 8.0),
            (47.0, 14.0),
            (49.0, 20.0),
            (49.0, 27.0),
            (48.0, 32.0),
            (45.0, 37.0),
            (44.0, 32.0),
            (42.0, 28.0),
            (36.0, 22.0),
            (29.0, 19.0),
            (20.0, 19.0),
            (13.0, 22.0),
            (7.0, 28.0),
            (5.0, 34.0),
        ]
        .into_iter()
        .map(|(x, y)| Vec2::new(x, y))
        .collect();

        Self {
            entities: vec![
                EntityDesc {
                    shape: square.clone(),
                    position: Vec2::new(460.0, 240.0),
                    centroid: Vec2::new(25.0, 25.0),
                },
                EntityDesc {
                    shape: triangle,
                    position: Vec2::new(300.0, 100.0),
                    centroid: Vec2::new(23.0, 34.0),
                },
                EntityDesc {
                    shape: crescent,
                    position: Vec2::new(100.0, 100.0),
                    centroid: Vec2::new(25.0, 25.0),
                },
                EntityDesc {
                    shape: square,
                    position: Vec2::new(500.0, 300.0),
                    centroid: Vec2::new(25.0, 25.0),
                },
            ],
            target: EntityId(3),
            camera: CameraDesc::default(),
        }
    }
}
