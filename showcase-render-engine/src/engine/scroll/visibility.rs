use bevy::prelude::*;
use constants::narrative::ScrollThresholds;

use crate::engine::assets::narrative_manifest::NarrativeManifest;
use crate::engine::scroll::scroll_state::ScrollState;

/// The three scene visibility flags, always derived together from a single
/// scroll sample so they cannot disagree about which sample they describe.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NarrativeMode {
    /// Scroll position drives sections and camera targets.
    pub is_in_scroll_mode: bool,
    /// The 3D canvas should be mounted and rendering. Wider window than
    /// visibility so the scene is warm before it appears.
    pub should_render_scene: bool,
    /// The canvas should actually be shown.
    pub is_scene_visible: bool,
}

/// Compute the visibility flags for one scroll sample. With no sections the
/// narrative never activates.
pub fn narrative_flags(scroll: ScrollState, section_count: usize) -> NarrativeMode {
    if section_count == 0 {
        return NarrativeMode::default();
    }

    let t = ScrollThresholds::for_viewport(scroll.viewport_height_px, section_count);
    let offset = scroll.offset_px;

    NarrativeMode {
        is_in_scroll_mode: offset > t.hero && offset < t.hero_end,
        should_render_scene: offset >= t.render_start && offset < t.render_end,
        is_scene_visible: offset >= t.hero && offset < t.hero_end,
    }
}

/// Recompute the visibility gate whenever the scroll state changes.
pub fn update_visibility_gate(
    scroll: Res<ScrollState>,
    manifest: Option<Res<NarrativeManifest>>,
    mut mode: ResMut<NarrativeMode>,
) {
    if !scroll.is_changed() {
        return;
    }

    let section_count = manifest.map(|m| m.section_count()).unwrap_or(0);
    let next = narrative_flags(*scroll, section_count);
    if next != *mode {
        *mode = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(offset: f32) -> ScrollState {
        ScrollState {
            offset_px: offset,
            viewport_height_px: 1000.0,
        }
    }

    #[test]
    fn hero_region_is_dormant() {
        let flags = narrative_flags(sample(0.0), 3);
        assert!(!flags.is_in_scroll_mode);
        assert!(!flags.should_render_scene);
        assert!(!flags.is_scene_visible);
    }

    #[test]
    fn scene_renders_before_it_is_visible() {
        // Render window opens at hero * 0.5.
        let flags = narrative_flags(sample(600.0), 3);
        assert!(flags.should_render_scene);
        assert!(!flags.is_scene_visible);
        assert!(!flags.is_in_scroll_mode);
    }

    #[test]
    fn narrative_window_sets_all_flags() {
        let flags = narrative_flags(sample(1500.0), 3);
        assert!(flags.is_in_scroll_mode);
        assert!(flags.should_render_scene);
        assert!(flags.is_scene_visible);
    }

    #[test]
    fn scene_outlives_the_narrative_by_one_viewport() {
        // hero_end = 3400 for 3 sections at vh 1000.
        let flags = narrative_flags(sample(3600.0), 3);
        assert!(!flags.is_scene_visible);
        assert!(flags.should_render_scene);

        let flags = narrative_flags(sample(4500.0), 3);
        assert!(!flags.should_render_scene);
    }

    #[test]
    fn visible_implies_render_eligible() {
        for offset in (0..6000).step_by(25) {
            let flags = narrative_flags(sample(offset as f32), 3);
            if flags.is_scene_visible {
                assert!(
                    flags.should_render_scene,
                    "visible without render eligibility at offset {offset}"
                );
            }
        }
    }

    #[test]
    fn empty_section_list_never_activates() {
        for offset in (0..6000).step_by(100) {
            let flags = narrative_flags(sample(offset as f32), 0);
            assert_eq!(flags, NarrativeMode::default());
        }
    }
}
