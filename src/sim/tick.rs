//! Fixed-step driver
//!
//! Applies one tick of host input to the scene and camera, then runs the
//! single visibility query for that tick.

use glam::Vec2;

use super::camera::FovCamera;
use super::scene::{EntityId, Scene, SceneDesc};
use super::visibility::LineOfSight;
use crate::{Error, Settings};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Camera movement direction; each axis is scaled by `camera_speed`
    pub camera_move: Vec2,
    /// Camera turn direction (-1, 0 or 1), scaled by `turn_step`
    pub camera_turn: f32,
    /// Make this entity the one the camera is looking for
    pub retarget: Option<EntityId>,
    /// Drag an entity so its anchor sits at the given position
    pub drag: Option<(EntityId, Vec2)>,
    /// Spin an entity by `spin_step` about its pivot
    pub spin: Option<EntityId>,
}

/// Everything the driver owns between ticks
#[derive(Debug, Clone)]
pub struct SightState {
    pub scene: Scene,
    pub los: LineOfSight,
    pub settings: Settings,
    /// Result of the previous tick's query
    pub visible: bool,
    /// Ticks run so far
    pub time_ticks: u64,
}

impl SightState {
    /// Build the scene and camera described by `desc`
    pub fn new(desc: &SceneDesc, settings: Settings) -> Result<Self, Error> {
        settings.validate()?;
        let (scene, target) = desc.build()?;
        let camera = FovCamera::from_settings(desc.camera.position, desc.camera.heading, &settings);
        let los = LineOfSight::new(camera, target, settings.half_angle());
        let visible = los.is_visible(&scene);
        Ok(Self {
            scene,
            los,
            settings,
            visible,
            time_ticks: 0,
        })
    }

    /// The demo scene with default settings
    pub fn demo() -> Result<Self, Error> {
        Self::new(&SceneDesc::demo(), Settings::default())
    }
}

/// Advance the state by one tick and report whether the target is visible
pub fn tick(state: &mut SightState, input: &TickInput) -> bool {
    state.time_ticks += 1;

    // Camera pose
    if input.camera_move != Vec2::ZERO {
        state
            .los
            .camera_mut()
            .translate(input.camera_move * state.settings.camera_speed);
    }
    if input.camera_turn != 0.0 {
        state
            .los
            .camera_mut()
            .turn(input.camera_turn * state.settings.turn_step);
    }

    // Target selection
    if let Some(id) = input.retarget {
        if state.scene.contains(id) {
            state.los.set_target(id);
        } else {
            log::warn!("Ignoring retarget to unknown entity {}", id.index());
        }
    }

    // Entity manipulation
    if let Some((id, position)) = input.drag {
        match state.scene.get_mut(id) {
            Some(entity) => entity.set_position(position),
            None => log::warn!("Ignoring drag of unknown entity {}", id.index()),
        }
    }
    if let Some(id) = input.spin {
        match state.scene.get_mut(id) {
            Some(entity) => entity.rotate(state.settings.spin_step),
            None => log::warn!("Ignoring spin of unknown entity {}", id.index()),
        }
    }

    let visible = state.los.is_visible(&state.scene);
    if visible != state.visible {
        log::info!(
            "Tick {}: target {} {}",
            state.time_ticks,
            state.los.target().index(),
            if visible { "spotted" } else { "lost" }
        );
    }
    state.visible = visible;
    visible
}
