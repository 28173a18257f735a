use bevy::prelude::*;

use crate::engine::camera::orbit_camera::ShowcaseCamera;
use crate::engine::scene::model::ShowcaseModel;
use crate::engine::scroll::visibility::NarrativeMode;

/// Apply the visibility gate to the render pipeline. Rendering stops
/// entirely outside the render window; inside it the scene can be warm but
/// hidden until the narrative region scrolls into view.
pub fn sync_scene_visibility(
    mode: Res<NarrativeMode>,
    mut cameras: Query<&mut Camera, With<ShowcaseCamera>>,
    mut models: Query<&mut Visibility, With<ShowcaseModel>>,
) {
    if !mode.is_changed() {
        return;
    }

    if let Ok(mut camera) = cameras.single_mut() {
        camera.is_active = mode.should_render_scene;
    }
    for mut visibility in models.iter_mut() {
        *visibility = if mode.is_scene_visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
