use bevy::prelude::*;

use crate::engine::assets::narrative_manifest::NarrativeManifest;
use crate::engine::loading::progress::LoadingProgress;

const NARRATIVE_MANIFEST_PATH: &str = "narrative/sections.json";

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<NarrativeManifest>>,
}

/// Start loading the narrative manifest.
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(NARRATIVE_MANIFEST_PATH));
}

/// Promote the parsed manifest to a resource once the asset is ready.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<NarrativeManifest>>,
    mut commands: Commands,
) {
    if loading_progress.manifest_loaded {
        return;
    }

    if let Some(ref handle) = manifest_loader.handle {
        if let Some(manifest) = manifests.get(handle) {
            println!(
                "✓ Narrative manifest loaded ({} sections)",
                manifest.section_count()
            );
            if manifest.is_empty() {
                warn!("Narrative manifest is empty; scroll narrative will never activate");
            }
            commands.insert_resource(manifest.clone());
            loading_progress.manifest_loaded = true;
        }
    }
}
