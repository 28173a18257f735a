/// Scroll distance of the hero section, in viewport heights.
pub const HERO_HEIGHT_RATIO: f32 = 1.0;

/// Scroll distance of one narrative section, in viewport heights.
pub const SECTION_HEIGHT_RATIO: f32 = 0.8;

/// The scene starts rendering this many hero-heights before the narrative
/// begins, so the model is already mounted when it fades in.
pub const RENDER_LEAD_RATIO: f32 = 0.5;

/// The scene stays mounted this many viewport heights past the narrative
/// end to hide pop-out while the page settles.
pub const RENDER_TAIL_RATIO: f32 = 1.0;

/// All scroll thresholds the narrative pipeline derives from one viewport
/// sample. Computed in one place so the section resolver and the visibility
/// gate always agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollThresholds {
    /// Scroll offset where the narrative begins.
    pub hero: f32,
    /// Scroll distance covered by one section.
    pub section_height: f32,
    /// Scroll offset where the narrative ends.
    pub hero_end: f32,
    /// Scroll offset from which the scene should be rendered.
    pub render_start: f32,
    /// Scroll offset past which the scene may be unmounted.
    pub render_end: f32,
}

impl ScrollThresholds {
    pub fn for_viewport(viewport_height_px: f32, section_count: usize) -> Self {
        let hero = viewport_height_px * HERO_HEIGHT_RATIO;
        let hero_end = viewport_height_px
            * (HERO_HEIGHT_RATIO + section_count as f32 * SECTION_HEIGHT_RATIO);
        Self {
            hero,
            section_height: viewport_height_px * SECTION_HEIGHT_RATIO,
            hero_end,
            render_start: hero * RENDER_LEAD_RATIO,
            render_end: hero_end + viewport_height_px * RENDER_TAIL_RATIO,
        }
    }
}
