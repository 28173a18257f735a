use bevy::prelude::*;
use std::collections::HashSet;
use constants::model::{
    IDLE_SPIN_FREE, IDLE_SPIN_NARRATIVE, MATERIAL_COLOR_DARKEN, MATERIAL_EMISSIVE_FACTOR,
    MATERIAL_METALLIC_FACTOR, MATERIAL_ROUGHNESS_FACTOR, MODEL_ASSET_PATH, MODEL_OFFSET,
    MODEL_ROTATION_X, MODEL_SCALE,
};

use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scroll::scroll_state::PauseState;
use crate::engine::scroll::visibility::NarrativeMode;

/// Root entity of the showcase model's GLTF scene.
#[derive(Component)]
pub struct ShowcaseModel;

/// Spawn the model scene. The source asset is authored Z-up at building
/// scale, so the root transform shrinks it and tips it upright.
pub fn spawn_model(mut commands: Commands, asset_server: Res<AssetServer>) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(MODEL_ASSET_PATH));

    commands.spawn((
        ShowcaseModel,
        SceneRoot(scene),
        Transform::from_translation(MODEL_OFFSET)
            .with_rotation(Quat::from_rotation_x(MODEL_ROTATION_X))
            .with_scale(Vec3::splat(MODEL_SCALE)),
    ));

    println!("→ Model scene requested: {}", MODEL_ASSET_PATH);
}

/// Flag the model as spawned once its GLTF scene has produced mesh entities.
pub fn watch_model_ready(mut progress: ResMut<LoadingProgress>, meshes: Query<&Mesh3d>) {
    if !progress.model_spawned && !meshes.is_empty() {
        progress.model_spawned = true;
        println!("→ Model meshes ready");
    }
}

/// One-time pass over the imported materials. GLTF exports arrive too bright
/// and too glossy for the dark page backdrop, so every material is darkened,
/// de-metalled, and roughened, with a faint self-glow so silhouettes read
/// against black.
pub fn adjust_model_materials(
    mut progress: ResMut<LoadingProgress>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    handles: Query<&MeshMaterial3d<StandardMaterial>>,
) {
    if progress.materials_adjusted || !progress.model_spawned {
        return;
    }
    if handles.is_empty() {
        return;
    }

    // GLTF meshes share material assets, so dedupe by asset id; each
    // material gets the adjustment once no matter how many meshes use it.
    let unique: HashSet<AssetId<StandardMaterial>> =
        handles.iter().map(|handle| handle.0.id()).collect();

    let mut adjusted = 0;
    for id in unique {
        let Some(material) = materials.get_mut(id) else {
            continue;
        };

        let mut color = material.base_color.to_linear();
        color.red *= MATERIAL_COLOR_DARKEN;
        color.green *= MATERIAL_COLOR_DARKEN;
        color.blue *= MATERIAL_COLOR_DARKEN;
        material.base_color = Color::from(color);

        material.metallic = (material.metallic * MATERIAL_METALLIC_FACTOR).clamp(0.0, 1.0);
        material.perceptual_roughness =
            (material.perceptual_roughness * MATERIAL_ROUGHNESS_FACTOR).clamp(0.089, 1.0);
        material.emissive = color * MATERIAL_EMISSIVE_FACTOR;

        adjusted += 1;
    }

    if adjusted > 0 {
        progress.materials_adjusted = true;
        println!("→ Adjusted {adjusted} model materials");
    }
}

/// Idle turntable spin. Slower while the narrative drives the camera, so the
/// flights land where the section targets expect, and frozen while paused.
pub fn spin_model(
    time: Res<Time>,
    mode: Res<NarrativeMode>,
    pause: Res<PauseState>,
    mut models: Query<&mut Transform, With<ShowcaseModel>>,
) {
    if pause.paused {
        return;
    }

    let rate = if mode.is_in_scroll_mode {
        IDLE_SPIN_NARRATIVE
    } else {
        IDLE_SPIN_FREE
    };

    for mut transform in models.iter_mut() {
        transform.rotate_y(rate * time.delta_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn world_with_material() -> (World, Handle<StandardMaterial>) {
        let mut world = World::new();
        world.insert_resource(LoadingProgress {
            model_spawned: true,
            ..Default::default()
        });
        world.init_resource::<Assets<StandardMaterial>>();

        let handle = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color: Color::linear_rgb(1.0, 1.0, 1.0),
                metallic: 1.0,
                perceptual_roughness: 0.5,
                ..Default::default()
            });
        (world, handle)
    }

    #[test]
    fn shared_materials_darken_exactly_once() {
        let (mut world, handle) = world_with_material();

        // Two meshes referencing the same material asset, as GLTF imports
        // routinely produce.
        world.spawn(MeshMaterial3d(handle.clone()));
        world.spawn(MeshMaterial3d(handle.clone()));

        world.run_system_once(adjust_model_materials).unwrap();

        let material = world
            .resource::<Assets<StandardMaterial>>()
            .get(&handle)
            .unwrap()
            .clone();
        let color = material.base_color.to_linear();
        assert!(
            (color.red - MATERIAL_COLOR_DARKEN).abs() < 1e-5,
            "expected one darkening pass ({MATERIAL_COLOR_DARKEN}), got {}",
            color.red
        );
        assert!((material.metallic - MATERIAL_METALLIC_FACTOR).abs() < 1e-5);
        assert!(world.resource::<LoadingProgress>().materials_adjusted);
    }

    #[test]
    fn adjustment_does_not_reapply_once_flagged() {
        let (mut world, handle) = world_with_material();
        world.spawn(MeshMaterial3d(handle.clone()));

        world.run_system_once(adjust_model_materials).unwrap();
        world.run_system_once(adjust_model_materials).unwrap();

        let color = world
            .resource::<Assets<StandardMaterial>>()
            .get(&handle)
            .unwrap()
            .base_color
            .to_linear();
        assert!((color.red - MATERIAL_COLOR_DARKEN).abs() < 1e-5);
    }
}
