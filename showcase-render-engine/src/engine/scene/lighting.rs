use bevy::prelude::*;
use constants::lighting::{
    ACCENT_LIGHT_POSITION, BASE_ACCENT_INTENSITY, BASE_AMBIENT_BRIGHTNESS, BASE_FILL_ILLUMINANCE,
    BASE_KEY_ILLUMINANCE, BASE_TOP_SPOT_INTENSITY, FILL_LIGHT_POSITION, KEY_LIGHT_POSITION,
    SPOTLIGHT_BOOST_THRESHOLD, TOP_SPOT_OUTER_ANGLE, TOP_SPOT_PENUMBRA, TOP_SPOT_POSITION,
};

use crate::engine::assets::narrative_manifest::NarrativeManifest;
use crate::engine::scroll::section_resolver::SectionChanged;

#[derive(Component)]
pub struct KeyLight;

#[derive(Component)]
pub struct FillLight;

#[derive(Component)]
pub struct AccentLight;

#[derive(Component)]
pub struct TopSpotlight;

/// Intensity of a continuously scaled light under a section boost.
pub fn scaled_intensity(base: f32, boost: f32) -> f32 {
    base * boost
}

/// The top spotlight is a step function of the boost rather than a scale.
/// Strictly above the threshold it runs at the scaled intensity, at or below
/// it stays dark.
pub fn spotlight_intensity(base: f32, boost: f32) -> f32 {
    if boost > SPOTLIGHT_BOOST_THRESHOLD {
        base * boost
    } else {
        0.0
    }
}

/// Spawn the four-light rig around the model. The top spotlight starts dark;
/// only a boosted section switches it on.
pub fn spawn_light_rig(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: BASE_AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        KeyLight,
        DirectionalLight {
            illuminance: BASE_KEY_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(KEY_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        FillLight,
        DirectionalLight {
            illuminance: BASE_FILL_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(FILL_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        AccentLight,
        PointLight {
            intensity: BASE_ACCENT_INTENSITY,
            range: 200.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(ACCENT_LIGHT_POSITION),
    ));

    commands.spawn((
        TopSpotlight,
        SpotLight {
            intensity: 0.0,
            range: 500.0,
            outer_angle: TOP_SPOT_OUTER_ANGLE,
            inner_angle: TOP_SPOT_OUTER_ANGLE * (1.0 - TOP_SPOT_PENUMBRA),
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(TOP_SPOT_POSITION).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    println!("→ Light rig spawned");
}

/// Retarget every light to the new section's boost when the active section
/// changes. Lights snap to their new values; only the camera animates.
pub fn apply_light_boost(
    mut changes: EventReader<SectionChanged>,
    manifest: Option<Res<NarrativeManifest>>,
    mut ambient: ResMut<AmbientLight>,
    mut key_lights: Query<&mut DirectionalLight, (With<KeyLight>, Without<FillLight>)>,
    mut fill_lights: Query<&mut DirectionalLight, (With<FillLight>, Without<KeyLight>)>,
    mut accent_lights: Query<&mut PointLight, With<AccentLight>>,
    mut top_spots: Query<&mut SpotLight, With<TopSpotlight>>,
) {
    let Some(manifest) = manifest else {
        return;
    };

    // Coalesce to the newest change; intermediate boosts never render anyway.
    let Some(change) = changes.read().last() else {
        return;
    };
    let boost = manifest.light_boost(change.index);

    ambient.brightness = scaled_intensity(BASE_AMBIENT_BRIGHTNESS, boost);
    if let Ok(mut key) = key_lights.single_mut() {
        key.illuminance = scaled_intensity(BASE_KEY_ILLUMINANCE, boost);
    }
    if let Ok(mut fill) = fill_lights.single_mut() {
        fill.illuminance = scaled_intensity(BASE_FILL_ILLUMINANCE, boost);
    }
    if let Ok(mut accent) = accent_lights.single_mut() {
        accent.intensity = scaled_intensity(BASE_ACCENT_INTENSITY, boost);
    }
    if let Ok(mut spot) = top_spots.single_mut() {
        spot.intensity = spotlight_intensity(BASE_TOP_SPOT_INTENSITY, boost);
    }
}
