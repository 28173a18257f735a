use bevy::prelude::*;
use constants::narrative::ScrollThresholds;

use crate::engine::assets::narrative_manifest::NarrativeManifest;
use crate::engine::scroll::scroll_state::ScrollState;
use crate::engine::scroll::visibility::NarrativeMode;

/// Fired when the active section actually changes (edge-triggered), never on
/// every scroll tick. This is what keeps a pixel of scroll from restarting
/// the camera flight.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChanged {
    pub index: usize,
}

/// Active section tracking across scroll samples.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ActiveSection {
    index: Option<usize>,
    in_scroll_mode: bool,
}

impl ActiveSection {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Feed one resolved sample into the tracker. Returns the section index
    /// to announce downstream, or `None` when nothing changed.
    ///
    /// Re-entering scroll mode always announces section 0, even when the
    /// stored index was already 0; the camera target must re-apply on every
    /// entry.
    pub fn observe(&mut self, in_scroll_mode: bool, computed_index: usize) -> Option<usize> {
        if !in_scroll_mode {
            self.in_scroll_mode = false;
            return None;
        }

        if !self.in_scroll_mode {
            self.in_scroll_mode = true;
            self.index = Some(0);
            return Some(0);
        }

        if self.index != Some(computed_index) {
            self.index = Some(computed_index);
            return Some(computed_index);
        }

        None
    }
}

/// Map a scroll sample to a section index, clamped into bounds. Returns
/// `None` for an empty section list.
pub fn resolve_section_index(scroll: ScrollState, section_count: usize) -> Option<usize> {
    if section_count == 0 {
        return None;
    }

    let t = ScrollThresholds::for_viewport(scroll.viewport_height_px, section_count);
    let adjusted = scroll.offset_px - t.hero;
    let raw_index = (adjusted / t.section_height).floor();
    Some((raw_index.max(0.0) as usize).min(section_count - 1))
}

/// Recompute the active section whenever the scroll state changes, emitting
/// `SectionChanged` on edges only.
pub fn resolve_active_section(
    scroll: Res<ScrollState>,
    mode: Res<NarrativeMode>,
    manifest: Option<Res<NarrativeManifest>>,
    mut active: ResMut<ActiveSection>,
    mut changes: EventWriter<SectionChanged>,
) {
    if !scroll.is_changed() && !mode.is_changed() {
        return;
    }

    let Some(manifest) = manifest else {
        return;
    };
    let Some(computed) = resolve_section_index(*scroll, manifest.section_count()) else {
        return;
    };

    if let Some(index) = active.observe(mode.is_in_scroll_mode, computed) {
        changes.write(SectionChanged { index });
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
    fn index_is_always_in_bounds() {
        for offset in (0..10_000).step_by(37) {
            let index = resolve_section_index(sample(offset as f32), 3).unwrap();
            assert!(index <= 2, "index {index} out of bounds at offset {offset}");
        }
    }

    #[test]
    fn index_is_non_decreasing_within_the_narrative() {
        let mut previous = 0;
        for offset in (1001..3400).step_by(13) {
            let index = resolve_section_index(sample(offset as f32), 3).unwrap();
            assert!(index >= previous, "index regressed at offset {offset}");
            previous = index;
        }
    }

    #[test]
    fn boundary_crossings_advance_the_index() {
        // vh = 1000, section height = 800: boundaries at 1800 and 2600.
        assert_eq!(resolve_section_index(sample(1799.0), 3), Some(0));
        assert_eq!(resolve_section_index(sample(1800.0), 3), Some(1));
        assert_eq!(resolve_section_index(sample(1850.0), 3), Some(1));
        assert_eq!(resolve_section_index(sample(2599.0), 3), Some(1));
        assert_eq!(resolve_section_index(sample(2600.0), 3), Some(2));
    }

    #[test]
    fn index_clamps_at_the_last_section() {
        assert_eq!(resolve_section_index(sample(3400.0), 3), Some(2));
        assert_eq!(resolve_section_index(sample(9999.0), 3), Some(2));
    }

    #[test]
    fn empty_list_resolves_to_nothing() {
        assert_eq!(resolve_section_index(sample(2000.0), 0), None);
    }

    #[test]
    fn changes_are_edge_triggered() {
        let mut active = ActiveSection::default();
        assert_eq!(active.observe(true, 0), Some(0));
        // Same index on subsequent ticks stays quiet.
        assert_eq!(active.observe(true, 0), None);
        assert_eq!(active.observe(true, 0), None);
        assert_eq!(active.observe(true, 1), Some(1));
        assert_eq!(active.observe(true, 1), None);
    }

    #[test]
    fn re_entry_always_announces_section_zero() {
        let mut active = ActiveSection::default();
        active.observe(true, 0);
        active.observe(true, 2);
        assert_eq!(active.index(), Some(2));

        // Scroll back above the hero threshold, then re-enter.
        assert_eq!(active.observe(false, 0), None);
        assert_eq!(active.observe(true, 2), Some(0));
        assert_eq!(active.index(), Some(0));
    }

    #[test]
    fn re_entry_fires_even_when_index_was_already_zero() {
        let mut active = ActiveSection::default();
        active.observe(true, 0);
        active.observe(false, 0);
        assert_eq!(active.observe(true, 0), Some(0));
    }
}
