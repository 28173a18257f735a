use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One stop in the scroll narrative. Identity is the array index; the `id`
/// string only names the section for the frontend overlays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeSection {
    pub id: String,
    pub title: String,
    pub body_text: String,
    pub camera_target: [f32; 3],
    /// Where the camera looks while parked on this section. Defaults to the
    /// model origin.
    #[serde(default)]
    pub look_target: Option<[f32; 3]>,
    pub stat_value: String,
    pub stat_label: String,
    #[serde(default = "default_light_boost")]
    pub light_boost: f32,
}

fn default_light_boost() -> f32 {
    1.0
}

impl NarrativeSection {
    pub fn camera_target(&self) -> Vec3 {
        Vec3::from_array(self.camera_target)
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target.map(Vec3::from_array).unwrap_or(Vec3::ZERO)
    }
}

/// Complete narrative manifest as a Bevy asset. Mirrors the JSON structure
/// exactly; the section order in the file is the narrative order.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
pub struct NarrativeManifest {
    pub sections: Vec<NarrativeSection>,
}

impl NarrativeManifest {
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// An empty manifest means the narrative never activates.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, index: usize) -> Option<&NarrativeSection> {
        self.sections.get(index)
    }

    pub fn camera_target(&self, index: usize) -> Option<Vec3> {
        self.section(index).map(NarrativeSection::camera_target)
    }

    pub fn look_target(&self, index: usize) -> Option<Vec3> {
        self.section(index).map(NarrativeSection::look_target)
    }

    /// Light boost for a section, falling back to the neutral 1.0 for
    /// out-of-range indices.
    pub fn light_boost(&self, index: usize) -> f32 {
        self.section(index).map(|s| s.light_boost).unwrap_or(1.0)
    }
}
