use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
#[cfg(not(target_arch = "wasm32"))]
use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::narrative_manifest::NarrativeManifest;
use crate::engine::camera::camera_tween::{
    CameraRig, advance_camera_tween, mark_rig_initialized, start_section_tween,
};
use crate::engine::camera::orbit_camera::{
    OrbitCamera, orbit_camera_controller, spawn_showcase_camera,
};
use crate::engine::core::app_state::{AppState, transition_to_running, transition_to_scene_ready};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::lighting::{apply_light_boost, spawn_light_rig};
use crate::engine::scene::model::{
    adjust_model_materials, spawn_model, spin_model, watch_model_ready,
};
use crate::engine::scene::render_gate::sync_scene_visibility;
use crate::engine::scroll::scroll_state::{
    PauseState, ScrollSample, ScrollState, apply_scroll_samples,
};
use crate::engine::scroll::section_resolver::{
    ActiveSection, SectionChanged, resolve_active_section,
};
use crate::engine::scroll::visibility::{NarrativeMode, update_visibility_gate};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::scroll::scroll_state::{keyboard_pause_toggle, keyboard_scroll_driver};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers NarrativeManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<NarrativeManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<ScrollState>()
        .init_resource::<PauseState>()
        .init_resource::<NarrativeMode>()
        .init_resource::<ActiveSection>()
        .init_resource::<CameraRig>()
        .init_resource::<OrbitCamera>()
        .add_event::<ScrollSample>()
        .add_event::<SectionChanged>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_manifest_system,
                watch_model_ready,
                transition_to_scene_ready,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            (adjust_model_materials, transition_to_running)
                .chain()
                .run_if(in_state(AppState::SceneReady)),
        );

    // Runtime pipeline. The scroll sample flows through the gate, the
    // section resolver, the camera, and the lights in one ordered chain so
    // every system sees the same frame's state.
    let runtime_systems = (
        mark_rig_initialized,
        apply_scroll_samples,
        update_visibility_gate,
        resolve_active_section,
        start_section_tween,
        advance_camera_tween,
        apply_light_boost,
        sync_scene_visibility,
        orbit_camera_controller,
        spin_model,
    );

    app.add_systems(
        Update,
        runtime_systems.chain().run_if(in_state(AppState::Running)),
    );

    // Native development aids: keyboard scroll, pause toggle, FPS overlay.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (
                keyboard_scroll_driver,
                keyboard_pause_toggle,
                crate::engine::camera::camera_tween::keyboard_policy_toggle,
            )
                .run_if(in_state(AppState::Running)),
        );
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    spawn_showcase_camera(commands.reborrow());
    spawn_light_rig(commands.reborrow());
    spawn_model(commands.reborrow(), asset_server);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

#[cfg(not(target_arch = "wasm32"))]
fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut texts: Query<&mut Text, With<FpsText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0);

    for mut text in texts.iter_mut() {
        **text = format!("FPS: {fps:.0}");
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
