//! Line-of-sight simulation module
//!
//! Everything a visibility query touches lives here. Queries are pure:
//! - No I/O, no hidden mutation of entity geometry
//! - Stable iteration order (entity index, then vertex order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod entity;
pub mod fov;
pub mod raster;
pub mod scene;
pub mod segment;
pub mod tick;
pub mod visibility;

pub use camera::FovCamera;
pub use entity::WorldEntity;
pub use fov::in_fov;
pub use raster::LineWalk;
pub use scene::{CameraDesc, EntityDesc, EntityId, Scene, SceneDesc};
pub use segment::{segment_intersection, segments_intersect};
pub use tick::{SightState, TickInput, tick};
pub use visibility::{LineOfSight, Sighting, any_point_visible, clip_edge};
