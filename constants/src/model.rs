use bevy::prelude::*;

/// The GLB export is produced by the site's content pipeline and is not
/// checked in. Place it at `showcase-render-engine/assets/models/treetino.glb`
/// before running; without it the app stays in the loading state waiting for
/// the scene's meshes.
pub const MODEL_ASSET_PATH: &str = "models/treetino.glb";

/// The source model is authored in millimetres and Z-up; scale it down and
/// stand it upright under the camera orbit.
pub const MODEL_SCALE: f32 = 0.02;
pub const MODEL_OFFSET: Vec3 = Vec3::new(0.0, -70.0, 0.0);
pub const MODEL_ROTATION_X: f32 = std::f32::consts::FRAC_PI_2;

/// Idle spin speeds in radians per second. The narrative spin is slower so
/// camera flights read clearly against a near-static model.
pub const IDLE_SPIN_FREE: f32 = 0.03;
pub const IDLE_SPIN_NARRATIVE: f32 = 0.012;

/// Material adjustments applied once after the scene loads, toning the
/// bright authored materials down to the site's palette.
pub const MATERIAL_COLOR_DARKEN: f32 = 0.6;
pub const MATERIAL_METALLIC_FACTOR: f32 = 0.7;
pub const MATERIAL_ROUGHNESS_FACTOR: f32 = 1.3;
pub const MATERIAL_EMISSIVE_FACTOR: f32 = 0.1;
