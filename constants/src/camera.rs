use bevy::prelude::*;

/// Camera pose before the first narrative section takes over.
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(80.0, 40.0, 80.0);
pub const DEFAULT_LOOK_TARGET: Vec3 = Vec3::ZERO;

pub const CAMERA_FOV_DEGREES: f32 = 60.0;

/// Duration of the camera flight between two section targets.
pub const SECTION_TWEEN_DURATION_SECS: f32 = 1.2;

/// Free-look orbit limits, matching the showcase framing: the model always
/// stays in view and the camera never dives under the ground plane.
pub const MIN_ORBIT_DISTANCE: f32 = 50.0;
pub const MAX_ORBIT_DISTANCE: f32 = 300.0;
pub const MIN_POLAR_ANGLE: f32 = std::f32::consts::PI / 6.0;
pub const MAX_POLAR_ANGLE: f32 = std::f32::consts::PI - std::f32::consts::PI / 6.0;

/// Per-second lerp rate applied when damping the free-look camera toward
/// its target pose.
pub const ORBIT_DAMPING: f32 = 12.0;

pub const ORBIT_YAW_SENSITIVITY: f32 = 0.0035;
pub const ORBIT_PITCH_SENSITIVITY: f32 = 0.0030;
