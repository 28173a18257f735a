use bevy::prelude::*;

/// Base ambient brightness before any section boost.
pub const BASE_AMBIENT_BRIGHTNESS: f32 = 240.0;

/// Key directional light (shadow caster) illuminance in lux.
pub const BASE_KEY_ILLUMINANCE: f32 = 7_000.0;

/// Fill directional light illuminance in lux.
pub const BASE_FILL_ILLUMINANCE: f32 = 4_000.0;

/// Accent point light intensity in lumens.
pub const BASE_ACCENT_INTENSITY: f32 = 300_000.0;

/// Top spotlight intensity in lumens when active.
pub const BASE_TOP_SPOT_INTENSITY: f32 = 800_000.0;

/// The top spotlight only switches on above this boost value, reserving the
/// bright top-lit look for a single narrative section.
pub const SPOTLIGHT_BOOST_THRESHOLD: f32 = 1.5;

pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 5.0);
pub const FILL_LIGHT_POSITION: Vec3 = Vec3::new(-10.0, 5.0, -5.0);
pub const ACCENT_LIGHT_POSITION: Vec3 = Vec3::new(0.0, 10.0, 0.0);
pub const TOP_SPOT_POSITION: Vec3 = Vec3::new(0.0, 250.0, 0.0);

pub const TOP_SPOT_OUTER_ANGLE: f32 = 0.6;
/// Penumbra fraction of the spot cone; inner angle = outer * (1 - penumbra).
pub const TOP_SPOT_PENUMBRA: f32 = 0.5;
