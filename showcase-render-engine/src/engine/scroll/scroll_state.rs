use bevy::prelude::*;

/// Latest scroll sample from the hosting page. Derived, ephemeral state;
/// recomputed wholesale on every sample, never persisted.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset_px: f32,
    pub viewport_height_px: f32,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset_px: 0.0,
            viewport_height_px: 1.0,
        }
    }
}

/// One scroll/resize notification from the host environment.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScrollSample {
    pub offset_px: f32,
    pub viewport_height_px: f32,
}

/// Pause signal from the hosting page (narrative hidden, page navigating
/// away). Checked at the top of every camera frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PauseState {
    pub paused: bool,
}

/// Fold queued samples into the scroll state. Rapid samples coalesce here;
/// downstream systems react to the resulting resource change, not to the
/// individual events.
pub fn apply_scroll_samples(
    mut samples: EventReader<ScrollSample>,
    mut scroll: ResMut<ScrollState>,
) {
    for sample in samples.read() {
        let next = ScrollState {
            offset_px: sample.offset_px.max(0.0),
            viewport_height_px: sample.viewport_height_px.max(1.0),
        };
        if next != *scroll {
            *scroll = next;
        }
    }
}

/// Keyboard scroll driver for native development, where there is no hosting
/// page to deliver samples.
#[cfg(not(target_arch = "wasm32"))]
pub fn keyboard_scroll_driver(
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<bevy::window::PrimaryWindow>>,
    scroll: Res<ScrollState>,
    mut samples: EventWriter<ScrollSample>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let viewport_height = window.height();

    let mut offset = scroll.offset_px;
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        offset += 120.0;
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        offset -= 120.0;
    }
    if keyboard.just_pressed(KeyCode::PageDown) {
        offset += viewport_height * constants::narrative::SECTION_HEIGHT_RATIO;
    }
    if keyboard.just_pressed(KeyCode::PageUp) {
        offset -= viewport_height * constants::narrative::SECTION_HEIGHT_RATIO;
    }
    if keyboard.just_pressed(KeyCode::Home) {
        offset = 0.0;
    }
    if keyboard.just_pressed(KeyCode::End) {
        offset = viewport_height * 8.0;
    }

    let offset = offset.max(0.0);
    if offset != scroll.offset_px || viewport_height != scroll.viewport_height_px {
        samples.write(ScrollSample {
            offset_px: offset,
            viewport_height_px: viewport_height,
        });
    }
}

/// Native pause toggle; the RPC bridge owns this signal on WASM.
#[cfg(not(target_arch = "wasm32"))]
pub fn keyboard_pause_toggle(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut pause: ResMut<PauseState>,
) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        pause.paused = !pause.paused;
        println!("Showcase paused: {}", pause.paused);
    }
}
