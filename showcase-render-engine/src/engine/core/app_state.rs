use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    SceneReady,
    Running,
}

#[derive(Component)]
pub struct FpsText;

/// Transition to SceneReady once the narrative manifest is parsed and the
/// showcase scene has spawned.
pub fn transition_to_scene_ready(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.manifest_loaded && loading_progress.model_spawned {
        println!("→ Transitioning to SceneReady state");
        next_state.set(AppState::SceneReady);
    }
}

/// Final transition to the running state once materials are toned down.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.materials_adjusted {
        println!("→ Scene configured, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
