//! Line-of-sight queries
//!
//! A target is visible when any point on any of its edges, clipped to the
//! FOV cone, can be joined to the camera without crossing an obstacle edge.
//! Edges are sampled pixel by pixel, and the first unblocked sample ends
//! the query. A sliver of exposure therefore counts as seen.

use glam::Vec2;

use super::camera::FovCamera;
use super::entity::WorldEntity;
use super::fov::in_fov;
use super::raster::LineWalk;
use super::scene::{EntityId, Scene};
use super::segment::{segment_intersection, segments_intersect};

/// Clip the edge `(v, v_next)` to the FOV cone.
///
/// Returns the part of the edge to scan, or `None` when both endpoints are
/// outside the cone. When exactly one endpoint is inside, the outside one is
/// replaced by the edge's intersection with the left boundary segment,
/// falling back to the right one. If neither boundary crosses the edge the
/// outside endpoint is kept as is.
pub fn clip_edge(
    camera: &FovCamera,
    half_angle: f32,
    v: Vec2,
    v_next: Vec2,
) -> Option<(Vec2, Vec2)> {
    let v_in = in_fov(camera.position, camera.facing, v, half_angle);
    let next_in = in_fov(camera.position, camera.facing, v_next, half_angle);

    let boundary_crossing = || {
        segment_intersection(camera.position, camera.left_boundary, v, v_next)
            .or_else(|| segment_intersection(camera.position, camera.right_boundary, v, v_next))
    };

    match (v_in, next_in) {
        (true, true) => Some((v, v_next)),
        (true, false) => match boundary_crossing() {
            Some(clip) => Some((v, clip)),
            None => {
                log::trace!("edge {:?}->{:?} crosses no boundary, scanning unclipped", v, v_next);
                Some((v, v_next))
            }
        },
        (false, true) => match boundary_crossing() {
            Some(clip) => Some((clip, v_next)),
            None => {
                log::trace!("edge {:?}->{:?} crosses no boundary, scanning unclipped", v, v_next);
                Some((v, v_next))
            }
        },
        (false, false) => None,
    }
}

/// Whether the sight line from `observer` to `point` crosses any obstacle edge
fn is_occluded(observer: Vec2, point: Vec2, obstacles: &[&WorldEntity]) -> bool {
    obstacles.iter().any(|obstacle| {
        obstacle
            .edges()
            .any(|(a, b)| segments_intersect(observer, point, a, b))
    })
}

/// First sample along `start..=end` the observer can see, counting how many
/// samples were tested on the way
fn first_visible_sample(
    start: Vec2,
    end: Vec2,
    observer: Vec2,
    obstacles: &[&WorldEntity],
    samples: &mut usize,
) -> Option<Vec2> {
    for point in LineWalk::new(start, end) {
        *samples += 1;
        if !is_occluded(observer, point, obstacles) {
            return Some(point);
        }
    }
    None
}

/// Whether any sampled point of the segment `start..=end` is unoccluded
/// from `observer`
pub fn any_point_visible(
    start: Vec2,
    end: Vec2,
    observer: Vec2,
    obstacles: &[&WorldEntity],
) -> bool {
    let mut samples = 0;
    first_visible_sample(start, end, observer, obstacles, &mut samples).is_some()
}

/// Outcome of a single visibility query
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sighting {
    /// First unoccluded sample, if any
    pub point: Option<Vec2>,
    /// Index of the target edge (starting vertex) the sample belongs to
    pub edge: Option<usize>,
    /// Number of sample points tested before the query ended
    pub samples: usize,
}

impl Sighting {
    pub fn visible(&self) -> bool {
        self.point.is_some()
    }
}

/// Line-of-sight engine bound to one target entity.
///
/// Holds the camera pose and FOV half angle; the scene is borrowed for
/// each query so the host stays free to move entities between ticks.
#[derive(Debug, Clone)]
pub struct LineOfSight {
    camera: FovCamera,
    target: EntityId,
    half_angle: f32,
}

impl LineOfSight {
    pub fn new(camera: FovCamera, target: EntityId, half_angle: f32) -> Self {
        Self {
            camera,
            target,
            half_angle,
        }
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    /// Track a different entity; every other entity becomes an obstacle
    pub fn set_target(&mut self, target: EntityId) {
        if target != self.target {
            log::debug!("Target changed {} -> {}", self.target.index(), target.index());
        }
        self.target = target;
    }

    pub fn half_angle(&self) -> f32 {
        self.half_angle
    }

    pub fn camera(&self) -> &FovCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FovCamera {
        &mut self.camera
    }

    /// Update the camera pose, then query visibility of the target
    pub fn is_visible_from(
        &mut self,
        scene: &Scene,
        observer: Vec2,
        facing: Vec2,
        left_boundary: Vec2,
        right_boundary: Vec2,
    ) -> bool {
        self.camera.position = observer;
        self.camera.facing = facing;
        self.camera.left_boundary = left_boundary;
        self.camera.right_boundary = right_boundary;
        self.is_visible(scene)
    }

    /// Whether the target can be seen from the current camera pose
    pub fn is_visible(&self, scene: &Scene) -> bool {
        self.query(scene).visible()
    }

    /// Run the query and report where the target was first seen
    pub fn query(&self, scene: &Scene) -> Sighting {
        let mut sighting = Sighting::default();

        let Some(target) = scene.get(self.target) else {
            log::warn!("Target {} is not in the scene", self.target.index());
            return sighting;
        };
        let obstacles: Vec<&WorldEntity> = scene.obstacles(self.target).collect();
        let observer = self.camera.position;

        for (i, (v, v_next)) in target.edges().enumerate() {
            let Some((start, end)) = clip_edge(&self.camera, self.half_angle, v, v_next) else {
                continue;
            };
            if let Some(point) =
                first_visible_sample(start, end, observer, &obstacles, &mut sighting.samples)
            {
                sighting.point = Some(point);
                sighting.edge = Some(i);
                return sighting;
            }
        }

        sighting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::SceneDesc;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

    fn square(size: f32, position: Vec2) -> WorldEntity {
        let shape = [
            Vec2::new(0.0, size),
            Vec2::new(size, size),
            Vec2::new(size, 0.0),
            Vec2::new(0.0, 0.0),
        ];
        WorldEntity::new(&shape, Vec2::splat(size * 0.5)).at(position)
    }

    /// Camera at the origin looking along +x with a 30° half angle
    fn camera() -> FovCamera {
        FovCamera::new(Vec2::ZERO, 0.0, FRAC_PI_6, 50.0, 10_000.0)
    }

    fn engine() -> LineOfSight {
        LineOfSight::new(camera(), EntityId(0), FRAC_PI_6)
    }

    #[test]
    fn test_unobstructed_target_is_visible() {
        let scene = Scene::new(vec![square(10.0, Vec2::new(100.0, -5.0))]);
        let los = engine();
        let sighting = los.query(&scene);
        assert!(sighting.visible());
        assert_eq!(sighting.samples, 1);
        assert_eq!(sighting.edge, Some(0));
    }

    #[test]
    fn test_target_outside_cone_is_not_visible() {
        // Behind the camera
        let scene = Scene::new(vec![square(10.0, Vec2::new(-100.0, -5.0))]);
        let los = engine();
        let sighting = los.query(&scene);
        assert!(!sighting.visible());
        assert_eq!(sighting.samples, 0);
    }

    #[test]
    fn test_wall_blocks_target() {
        let scene = Scene::new(vec![
            square(10.0, Vec2::new(100.0, -5.0)),
            // Tall thin wall between camera and target
            WorldEntity::new(
                &[
                    Vec2::new(0.0, -40.0),
                    Vec2::new(2.0, -40.0),
                    Vec2::new(2.0, 40.0),
                    Vec2::new(0.0, 40.0),
                ],
                Vec2::ZERO,
            )
            .at(Vec2::new(50.0, 0.0)),
        ]);
        let los = engine();
        let sighting = los.query(&scene);
        assert!(!sighting.visible());
        // Every sample of every edge was tried: 4 edges of 11 samples each
        assert_eq!(sighting.samples, 44);
    }

    /// Vertical wall at x=50 whose top sits just below y=5
    fn low_wall() -> WorldEntity {
        WorldEntity::new(&[Vec2::new(50.0, -10.0), Vec2::new(50.0, 4.75)], Vec2::ZERO)
    }

    #[test]
    fn test_any_point_visible_fully_blocked() {
        let wall = WorldEntity::new(
            &[Vec2::new(50.0, -40.0), Vec2::new(50.0, 40.0)],
            Vec2::ZERO,
        );
        assert!(!any_point_visible(
            Vec2::new(100.0, -5.0),
            Vec2::new(100.0, 5.0),
            Vec2::ZERO,
            &[&wall]
        ));
        // Nothing in the way
        assert!(any_point_visible(
            Vec2::new(100.0, -5.0),
            Vec2::new(100.0, 5.0),
            Vec2::ZERO,
            &[]
        ));
    }

    #[test]
    fn test_any_point_visible_only_last_sample_exposed() {
        // Sight lines to y=0..9 pass under the wall's top, y=10 clears it
        let wall = low_wall();
        let start = Vec2::new(100.0, 0.0);
        let end = Vec2::new(100.0, 10.0);
        assert!(any_point_visible(start, end, Vec2::ZERO, &[&wall]));

        let mut samples = 0;
        let seen = first_visible_sample(start, end, Vec2::ZERO, &[&wall], &mut samples);
        assert_eq!(seen, Some(end));
        assert_eq!(samples, 11);

        // Reversed, the exposed sample is the first one and ends the scan
        let mut samples = 0;
        let seen = first_visible_sample(end, start, Vec2::ZERO, &[&wall], &mut samples);
        assert_eq!(seen, Some(end));
        assert_eq!(samples, 1);
    }

    #[test]
    fn test_any_point_visible_single_point() {
        let point = Vec2::new(100.0, 0.0);
        assert!(any_point_visible(point, point, Vec2::ZERO, &[]));
        assert!(!any_point_visible(point, point, Vec2::ZERO, &[&low_wall()]));
        // The pixel above clears the wall
        let above = Vec2::new(100.0, 10.0);
        assert!(any_point_visible(above, above, Vec2::ZERO, &[&low_wall()]));
    }

    #[test]
    fn test_very_long_target_edge() {
        let target = WorldEntity::new(
            &[Vec2::new(1.0e3, 0.0), Vec2::new(1.5e9, 1.5e9)],
            Vec2::ZERO,
        );
        let scene = Scene::new(vec![target]);
        let cam = FovCamera::new(Vec2::ZERO, FRAC_PI_4, FRAC_PI_6, 50.0, 10_000.0);
        let los = LineOfSight::new(cam, EntityId(0), FRAC_PI_6);
        let sighting = los.query(&scene);
        assert!(sighting.visible());
        assert_eq!(sighting.samples, 1);
    }

    #[test]
    fn test_partially_covered_target_is_visible() {
        let scene = Scene::new(vec![
            square(20.0, Vec2::new(100.0, -10.0)),
            // Covers only the lower half of the target's angular extent
            square(10.0, Vec2::new(50.0, -10.0)),
        ]);
        let los = engine();
        let sighting = los.query(&scene);
        assert!(sighting.visible());
        let seen = sighting.point.unwrap();
        assert!(!is_occluded(Vec2::ZERO, seen, &[scene.get(EntityId(1)).unwrap()]));
    }

    #[test]
    fn test_clip_edge_cases() {
        let cam = camera();
        // Both inside
        let inside = clip_edge(&cam, FRAC_PI_6, Vec2::new(100.0, -10.0), Vec2::new(100.0, 10.0));
        assert_eq!(inside, Some((Vec2::new(100.0, -10.0), Vec2::new(100.0, 10.0))));

        // Both outside
        assert_eq!(
            clip_edge(&cam, FRAC_PI_6, Vec2::new(-100.0, 0.0), Vec2::new(-100.0, 10.0)),
            None
        );

        // Start inside, end past the +y boundary: clipped where the boundary crosses x=100
        let (start, end) =
            clip_edge(&cam, FRAC_PI_6, Vec2::new(100.0, 0.0), Vec2::new(100.0, 200.0)).unwrap();
        assert_eq!(start, Vec2::new(100.0, 0.0));
        let expected_y = 100.0 * FRAC_PI_6.tan();
        assert!((end - Vec2::new(100.0, expected_y)).length() < 0.05);

        // End inside, start past the -y boundary
        let (start, end) =
            clip_edge(&cam, FRAC_PI_6, Vec2::new(100.0, -200.0), Vec2::new(100.0, 0.0)).unwrap();
        assert!((start - Vec2::new(100.0, -expected_y)).length() < 0.05);
        assert_eq!(end, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_clip_keeps_endpoint_when_no_boundary_crosses() {
        // Camera whose boundary points are far too close to reach the edge
        let cam = FovCamera::new(Vec2::ZERO, 0.0, FRAC_PI_6, 1.0, 1.0);
        let v = Vec2::new(100.0, 0.0);
        let v_next = Vec2::new(100.0, 200.0);
        assert_eq!(clip_edge(&cam, FRAC_PI_6, v, v_next), Some((v, v_next)));
    }

    #[test]
    fn test_edge_outside_cone_contributes_nothing() {
        // The only in-cone edge is blocked; the out-of-cone edges would be
        // unoccluded but must never be sampled
        let cam = FovCamera::new(Vec2::ZERO, 0.0, FRAC_PI_2 * 0.1, 50.0, 10_000.0);
        let target = WorldEntity::new(
            &[
                Vec2::new(100.0, -1.0),
                Vec2::new(100.0, 1.0),
                Vec2::new(100.0, 300.0),
                Vec2::new(-300.0, 300.0),
            ],
            Vec2::ZERO,
        );
        let wall = square(40.0, Vec2::new(40.0, -20.0));
        let scene = Scene::new(vec![target, wall]);
        let los = LineOfSight::new(cam, EntityId(0), FRAC_PI_2 * 0.1);
        assert!(!los.is_visible(&scene));
    }

    #[test]
    fn test_set_target_switches_roles() {
        let scene = Scene::new(vec![
            square(10.0, Vec2::new(100.0, -5.0)),
            square(40.0, Vec2::new(40.0, -20.0)),
        ]);
        let mut los = engine();
        // Square 0 is hidden behind square 1
        assert!(!los.is_visible(&scene));
        // Square 1 has nothing in front of it
        los.set_target(EntityId(1));
        assert_eq!(los.target(), EntityId(1));
        assert!(los.is_visible(&scene));
    }

    #[test]
    fn test_unknown_target_fails_closed() {
        let scene = Scene::new(vec![square(10.0, Vec2::new(100.0, -5.0))]);
        let los = LineOfSight::new(camera(), EntityId(7), FRAC_PI_6);
        assert!(!los.is_visible(&scene));
    }

    #[test]
    fn test_is_visible_from_updates_camera() {
        let scene = Scene::new(vec![square(10.0, Vec2::new(100.0, -5.0))]);
        let mut los = engine();
        // Look the other way: the target is behind
        let turned = FovCamera::new(Vec2::ZERO, std::f32::consts::PI, FRAC_PI_6, 50.0, 10_000.0);
        assert!(!los.is_visible_from(
            &scene,
            turned.position,
            turned.facing,
            turned.left_boundary,
            turned.right_boundary
        ));
        assert_eq!(los.camera().facing, turned.facing);
    }

    #[test]
    fn test_query_is_idempotent() {
        let desc = SceneDesc::demo();
        let (scene, target) = desc.build().unwrap();
        let cam = FovCamera::new(Vec2::new(380.0, 216.0), FRAC_PI_2, FRAC_PI_6, 50.0, 10_000.0);
        let los = LineOfSight::new(cam, target, FRAC_PI_6);
        let snapshot = scene.clone();
        let first = los.query(&scene);
        let second = los.query(&scene);
        assert_eq!(first, second);
        assert_eq!(scene, snapshot);
    }
}
