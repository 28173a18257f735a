use bevy::prelude::*;
use constants::camera::SECTION_TWEEN_DURATION_SECS;

use crate::engine::assets::narrative_manifest::NarrativeManifest;
use crate::engine::camera::orbit_camera::{OrbitCamera, ShowcaseCamera};
use crate::engine::scroll::scroll_state::PauseState;
use crate::engine::scroll::section_resolver::SectionChanged;
use crate::engine::scroll::visibility::NarrativeMode;

/// Smoothstep ease: `p * p * (3 - 2p)` with `p` clamped to [0, 1]. Bounded, so
/// the interpolation can never overshoot its endpoints.
pub fn smoothstep(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

/// Fraction of a flight within which progress is considered complete. A
/// 1.2 s flight is done 0.12 ms early at worst, far under a frame.
const COMPLETION_EPSILON: f32 = 1e-4;

/// What to do when a section change arrives while a flight is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TweenPolicy {
    /// Drop the new request; the camera keeps flying to its current target.
    /// A fast scroller can skip a section's camera target entirely.
    #[default]
    DropWhileBusy,
    /// Abort the current flight and start a new one from the current
    /// interpolated pose toward the most recent target.
    LatestWins,
}

impl TweenPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "drop" => Some(Self::DropWhileBusy),
            "latest" => Some(Self::LatestWins),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DropWhileBusy => "drop",
            Self::LatestWins => "latest",
        }
    }
}

/// One in-flight camera interpolation. Start values are the camera's live
/// pose at creation time, not the previous flight's endpoint.
#[derive(Debug, Clone, Copy)]
pub struct CameraTween {
    start_position: Vec3,
    end_position: Vec3,
    start_target: Vec3,
    end_target: Vec3,
    start_time: f32,
    duration_secs: f32,
}

impl CameraTween {
    pub fn new(
        start_position: Vec3,
        end_position: Vec3,
        start_target: Vec3,
        end_target: Vec3,
        start_time: f32,
        duration_secs: f32,
    ) -> Self {
        Self {
            start_position,
            end_position,
            start_target,
            end_target,
            start_time,
            duration_secs: duration_secs.max(f32::EPSILON),
        }
    }

    pub fn end_position(&self) -> Vec3 {
        self.end_position
    }

    /// Interpolated pose at `now`, plus the clamped progress value. Progress
    /// within `COMPLETION_EPSILON` of the end snaps to 1.0, so float
    /// rounding in the elapsed-time division cannot hold a finished flight
    /// open for an extra frame.
    pub fn sample(&self, now: f32) -> (Vec3, Vec3, f32) {
        let elapsed = now - self.start_time;
        let mut progress = (elapsed / self.duration_secs).clamp(0.0, 1.0);
        if progress >= 1.0 - COMPLETION_EPSILON {
            progress = 1.0;
        }
        let eased = smoothstep(progress);
        (
            self.start_position.lerp(self.end_position, eased),
            self.start_target.lerp(self.end_target, eased),
            progress,
        )
    }
}

/// Camera flight state. One rig per app; at most one tween runs at a time.
#[derive(Resource, Debug, Default)]
pub struct CameraRig {
    policy: TweenPolicy,
    active: Option<CameraTween>,
    /// Where the camera currently looks; the orbit-controls target.
    pub look_target: Vec3,
    /// Set once the camera entity exists. Requests before that are dropped.
    pub initialized: bool,
}

impl CameraRig {
    pub fn policy(&self) -> TweenPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: TweenPolicy) {
        self.policy = policy;
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Request a flight to a new pose. Returns whether a tween was started.
    ///
    /// No-op when paused, before the camera exists, or while another flight
    /// is in progress under `DropWhileBusy`. Under `LatestWins` the
    /// in-flight tween is replaced, restarting cleanly from the supplied
    /// live pose.
    #[allow(clippy::too_many_arguments)]
    pub fn animate_to(
        &mut self,
        current_position: Vec3,
        current_target: Vec3,
        end_position: Vec3,
        end_target: Vec3,
        now: f32,
        duration_secs: f32,
        paused: bool,
    ) -> bool {
        if paused || !self.initialized {
            return false;
        }
        if self.active.is_some() && self.policy == TweenPolicy::DropWhileBusy {
            return false;
        }

        self.active = Some(CameraTween::new(
            current_position,
            end_position,
            current_target,
            end_target,
            now,
            duration_secs,
        ));
        true
    }

    /// Advance the active flight. Returns the pose to apply this frame, or
    /// `None` when idle. A pause observed here terminates the flight
    /// immediately, leaving the camera wherever the last frame put it.
    pub fn advance(&mut self, now: f32, paused: bool) -> Option<(Vec3, Vec3)> {
        if paused {
            self.active = None;
            return None;
        }

        let tween = self.active.as_ref()?;
        let (position, target, progress) = tween.sample(now);
        self.look_target = target;
        if progress >= 1.0 {
            self.active = None;
        }
        Some((position, target))
    }
}

/// Flag the rig as live once the showcase camera has spawned.
pub fn mark_rig_initialized(
    mut rig: ResMut<CameraRig>,
    cameras: Query<Entity, With<ShowcaseCamera>>,
) {
    if !rig.initialized && !cameras.is_empty() {
        rig.initialized = true;
    }
}

/// Start a flight toward the newly active section's camera target.
pub fn start_section_tween(
    mut changes: EventReader<SectionChanged>,
    manifest: Option<Res<NarrativeManifest>>,
    mode: Res<NarrativeMode>,
    pause: Res<PauseState>,
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
    cameras: Query<&Transform, With<ShowcaseCamera>>,
) {
    let Some(manifest) = manifest else {
        return;
    };
    let Ok(camera_transform) = cameras.single() else {
        return;
    };

    for change in changes.read() {
        if !mode.is_in_scroll_mode {
            continue;
        }
        let (Some(end_position), Some(end_target)) = (
            manifest.camera_target(change.index),
            manifest.look_target(change.index),
        ) else {
            continue;
        };

        let current_target = rig.look_target;
        rig.animate_to(
            camera_transform.translation,
            current_target,
            end_position,
            end_target,
            time.elapsed_secs(),
            SECTION_TWEEN_DURATION_SECS,
            pause.paused,
        );
    }
}

/// Apply the active flight to the camera each frame and hand the final pose
/// back to the orbit controller when it completes.
pub fn advance_camera_tween(
    time: Res<Time>,
    pause: Res<PauseState>,
    mut rig: ResMut<CameraRig>,
    mut orbit: ResMut<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<ShowcaseCamera>>,
) {
    let was_running = rig.is_running();
    let Some((position, target)) = rig.advance(time.elapsed_secs(), pause.paused) else {
        // A pause observed mid-flight cancels it. The camera transform
        // still holds the last interpolated pose, so free-look must resume
        // from there rather than the previous flight's endpoint.
        if was_running && !rig.is_running() {
            if let Ok(transform) = cameras.single_mut() {
                let look_target = rig.look_target;
                orbit.sync_from_pose(transform.translation, look_target);
            }
        }
        return;
    };

    if let Ok(mut transform) = cameras.single_mut() {
        transform.translation = position;
        transform.look_at(target, Vec3::Y);
    }

    // Flight just finished: let the free-look orbit resume from this pose
    // instead of snapping back to its stale spherical coordinates.
    if was_running && !rig.is_running() {
        orbit.sync_from_pose(position, target);
    }
}

/// Native policy toggle; the RPC bridge owns this setting on WASM.
#[cfg(not(target_arch = "wasm32"))]
pub fn keyboard_policy_toggle(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut rig: ResMut<CameraRig>,
) {
    if keyboard.just_pressed(KeyCode::KeyT) {
        let next = match rig.policy() {
            TweenPolicy::DropWhileBusy => TweenPolicy::LatestWins,
            TweenPolicy::LatestWins => TweenPolicy::DropWhileBusy,
        };
        rig.set_policy(next);
        println!("Tween policy: {}", next.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    const EPS: f32 = 1e-4;

    fn rig_with_policy(policy: TweenPolicy) -> CameraRig {
        let mut rig = CameraRig {
            initialized: true,
            ..Default::default()
        };
        rig.set_policy(policy);
        rig
    }

    #[test]
    fn smoothstep_is_bounded_and_symmetric() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(-2.0), 0.0);
        assert_eq!(smoothstep(3.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < EPS);
        for i in 0..=20 {
            let p = i as f32 / 20.0;
            let e = smoothstep(p);
            assert!((0.0..=1.0).contains(&e));
        }
    }

    #[test]
    fn tween_hits_endpoints_exactly() {
        let tween = CameraTween::new(
            Vec3::new(80.0, 40.0, 80.0),
            Vec3::new(0.0, 120.0, 30.0),
            Vec3::ZERO,
            Vec3::new(0.0, 20.0, 0.0),
            10.0,
            1.2,
        );

        let (pos, target, progress) = tween.sample(10.0);
        assert_eq!(progress, 0.0);
        assert!((pos - Vec3::new(80.0, 40.0, 80.0)).length() < EPS);
        assert!(target.length() < EPS);

        let (pos, target, progress) = tween.sample(11.2);
        assert_eq!(progress, 1.0);
        assert!((pos - Vec3::new(0.0, 120.0, 30.0)).length() < EPS);
        assert!((target - Vec3::new(0.0, 20.0, 0.0)).length() < EPS);
    }

    #[test]
    fn tween_approaches_target_monotonically() {
        let start = Vec3::new(80.0, 40.0, 80.0);
        let end = Vec3::new(-40.0, 10.0, 70.0);
        let tween = CameraTween::new(start, end, Vec3::ZERO, Vec3::ZERO, 0.0, 1.2);

        let mut last_distance = f32::INFINITY;
        for i in 0..=60 {
            let now = i as f32 * 0.02;
            let (pos, _, _) = tween.sample(now);
            let distance = (pos - end).length();
            assert!(
                distance <= last_distance + EPS,
                "moved away from target at t={now}"
            );
            last_distance = distance;
        }
    }

    #[test]
    fn drop_while_busy_keeps_the_first_target() {
        let mut rig = rig_with_policy(TweenPolicy::DropWhileBusy);
        let first_target = Vec3::new(0.0, 120.0, 30.0);

        assert!(rig.animate_to(
            Vec3::splat(80.0),
            Vec3::ZERO,
            first_target,
            Vec3::ZERO,
            0.0,
            1.2,
            false,
        ));
        // A second change mid-flight is silently dropped.
        assert!(!rig.animate_to(
            Vec3::splat(70.0),
            Vec3::ZERO,
            Vec3::new(-40.0, 10.0, 70.0),
            Vec3::ZERO,
            0.3,
            1.2,
            false,
        ));
        assert_eq!(rig.active.unwrap().end_position(), first_target);

        // After completion the rig accepts requests again.
        rig.advance(1.3, false);
        assert!(!rig.is_running());
        assert!(rig.animate_to(
            Vec3::splat(70.0),
            Vec3::ZERO,
            Vec3::new(-40.0, 10.0, 70.0),
            Vec3::ZERO,
            1.3,
            1.2,
            false,
        ));
    }

    #[test]
    fn latest_wins_restarts_from_the_live_pose() {
        let mut rig = rig_with_policy(TweenPolicy::LatestWins);
        rig.animate_to(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::ZERO,
            0.0,
            1.0,
            false,
        );
        let (mid_pos, _) = rig.advance(0.5, false).unwrap();

        assert!(rig.animate_to(
            mid_pos,
            Vec3::ZERO,
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::ZERO,
            0.5,
            1.0,
            false,
        ));
        // The replacement starts where the aborted flight left off.
        let (pos, _) = rig.advance(0.5, false).unwrap();
        assert!((pos - mid_pos).length() < EPS);
        assert_eq!(rig.active.unwrap().end_position(), Vec3::new(0.0, 100.0, 0.0));
    }

    #[test]
    fn flight_completes_at_its_nominal_end_time() {
        let mut rig = rig_with_policy(TweenPolicy::DropWhileBusy);
        rig.animate_to(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::ZERO,
            10.0,
            1.2,
            false,
        );

        // Float rounding puts 10.0 + 1.2 a hair short of a full duration;
        // the flight must still finish on this frame, at the endpoint.
        let (pos, _) = rig.advance(10.0 + 1.2, false).unwrap();
        assert!((pos - Vec3::new(100.0, 0.0, 0.0)).length() < EPS);
        assert!(!rig.is_running());
    }

    #[test]
    fn pause_mid_flight_hands_the_live_pose_to_free_look() {
        let start = Vec3::new(80.0, 40.0, 80.0);
        let end = Vec3::new(0.0, 120.0, 30.0);

        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.insert_resource(PauseState::default());
        world.insert_resource(OrbitCamera::default());
        let mut rig = CameraRig {
            initialized: true,
            ..Default::default()
        };
        rig.animate_to(start, Vec3::ZERO, end, Vec3::ZERO, 0.0, 1.2, false);
        world.insert_resource(rig);
        world.spawn((ShowcaseCamera, Transform::from_translation(start)));

        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(0.5));
        world.run_system_once(advance_camera_tween).unwrap();

        let mut cameras = world.query_filtered::<&Transform, With<ShowcaseCamera>>();
        let mid = cameras.single(&world).unwrap().translation;
        assert!((mid - start).length() > 1.0);
        assert!((mid - end).length() > 1.0);

        // Pause cancels the flight; the free-look orbit must resume from
        // the camera's actual pose, not a previous flight's endpoint.
        world.resource_mut::<PauseState>().paused = true;
        world.run_system_once(advance_camera_tween).unwrap();

        assert!(!world.resource::<CameraRig>().is_running());
        let look_target = world.resource::<CameraRig>().look_target;
        let resumed = world.resource::<OrbitCamera>().position(look_target);
        assert!(
            (resumed - mid).length() < 0.5,
            "free-look would jump from {mid} to {resumed}"
        );
    }

    #[test]
    fn pause_terminates_without_snapping() {
        let mut rig = rig_with_policy(TweenPolicy::DropWhileBusy);
        rig.animate_to(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::ZERO,
            0.0,
            1.0,
            false,
        );
        rig.advance(0.4, false);

        // Pause observed at the top of the next frame: flight ends, no pose
        // is produced, so the camera stays at its last interpolated spot.
        assert_eq!(rig.advance(0.5, true), None);
        assert!(!rig.is_running());
        assert_eq!(rig.advance(0.6, false), None);
    }

    #[test]
    fn requests_are_dropped_while_paused_or_unmounted() {
        let mut rig = rig_with_policy(TweenPolicy::DropWhileBusy);
        rig.initialized = false;
        assert!(!rig.animate_to(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::X,
            Vec3::ZERO,
            0.0,
            1.0,
            false,
        ));

        rig.initialized = true;
        assert!(!rig.animate_to(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::X,
            Vec3::ZERO,
            0.0,
            1.0,
            true,
        ));
        assert!(!rig.is_running());
    }

    #[test]
    fn policy_parses_from_rpc_strings() {
        assert_eq!(TweenPolicy::from_str("drop"), Some(TweenPolicy::DropWhileBusy));
        assert_eq!(TweenPolicy::from_str("latest"), Some(TweenPolicy::LatestWins));
        assert_eq!(TweenPolicy::from_str("queue"), None);
        assert_eq!(TweenPolicy::from_str(TweenPolicy::LatestWins.as_str()), Some(TweenPolicy::LatestWins));
    }
}
