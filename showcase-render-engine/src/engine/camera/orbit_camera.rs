use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    DEFAULT_CAMERA_POSITION, DEFAULT_LOOK_TARGET, MAX_ORBIT_DISTANCE, MAX_POLAR_ANGLE,
    MIN_ORBIT_DISTANCE, MIN_POLAR_ANGLE, ORBIT_DAMPING, ORBIT_PITCH_SENSITIVITY,
    ORBIT_YAW_SENSITIVITY,
};

use crate::engine::camera::camera_tween::CameraRig;
use crate::engine::scroll::scroll_state::PauseState;
use crate::engine::scroll::visibility::NarrativeMode;

/// Marker for the single showcase camera entity.
#[derive(Component)]
pub struct ShowcaseCamera;

/// Spherical free-look state around the rig's look target. Only in charge
/// while the scroll narrative is not; section flights hand their final pose
/// back via `sync_from_pose`.
#[derive(Resource, Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub polar: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let mut orbit = Self {
            yaw: 0.0,
            polar: 0.0,
            distance: 0.0,
        };
        orbit.sync_from_pose(DEFAULT_CAMERA_POSITION, DEFAULT_LOOK_TARGET);
        orbit
    }
}

impl OrbitCamera {
    /// Camera position implied by the current spherical coordinates.
    pub fn position(&self, target: Vec3) -> Vec3 {
        let offset = Vec3::new(
            self.polar.sin() * self.yaw.sin(),
            self.polar.cos(),
            self.polar.sin() * self.yaw.cos(),
        ) * self.distance;
        target + offset
    }

    /// Adopt an externally produced pose so free-look resumes from it.
    pub fn sync_from_pose(&mut self, position: Vec3, target: Vec3) {
        let offset = position - target;
        self.distance = offset
            .length()
            .clamp(MIN_ORBIT_DISTANCE, MAX_ORBIT_DISTANCE);
        if offset.length() > f32::EPSILON {
            self.polar = (offset.y / offset.length())
                .clamp(-1.0, 1.0)
                .acos()
                .clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);
            self.yaw = offset.x.atan2(offset.z);
        }
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_YAW_SENSITIVITY;
        self.polar = (self.polar - delta.y * ORBIT_PITCH_SENSITIVITY)
            .clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);
    }

    pub fn zoom(&mut self, amount: f32) {
        let dolly_speed = (self.distance * 0.2).clamp(0.5, 60.0);
        self.distance =
            (self.distance - amount * dolly_speed).clamp(MIN_ORBIT_DISTANCE, MAX_ORBIT_DISTANCE);
    }
}

/// Spawn the showcase camera at its hero pose. Starts inactive; the render
/// gate switches it on once the scroll position warrants rendering.
pub fn spawn_showcase_camera(mut commands: Commands) {
    commands.spawn((
        ShowcaseCamera,
        Camera3d::default(),
        Camera {
            is_active: false,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: constants::camera::CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(DEFAULT_CAMERA_POSITION)
            .looking_at(DEFAULT_LOOK_TARGET, Vec3::Y),
    ));
}

/// Free-look controller: drag to orbit, wheel to zoom, no pan. Idle while
/// the narrative owns the camera, while paused, and during flights.
pub fn orbit_camera_controller(
    mode: Res<NarrativeMode>,
    pause: Res<PauseState>,
    rig: Res<CameraRig>,
    time: Res<Time>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    mut orbit: ResMut<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<ShowcaseCamera>>,
) {
    if mode.is_in_scroll_mode || pause.paused || rig.is_running() {
        mouse_motion.clear();
        scroll_events.clear();
        return;
    }

    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.rotate(mouse_delta);
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    let target = rig.look_target;
    let target_pos = orbit.position(target);
    let target_rot = Transform::from_translation(target_pos)
        .looking_at(target, Vec3::Y)
        .rotation;

    let lerp_speed = (ORBIT_DAMPING * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target_pos, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, lerp_speed);
}
