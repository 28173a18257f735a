//! JSON-RPC 2.0 communication layer for the hosting React page.
//!
//! The engine runs inside an iframe on the landing page; the page owns the
//! scroll position and the narrative overlays, the engine owns the scene.
//! Standard JSON-RPC 2.0 over `postMessage` in both directions:
//!
//! ```text
//! React (Parent Window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        ├─ Notification (no ID) ───────────────> │
//!        │ <─────────────── Notification (no ID) ─┤
//! ```
//!
//! ## Incoming methods
//!
//! - `scroll_update`: latest scroll offset and viewport height, usually sent
//!   as a notification on every scroll tick
//! - `set_paused`: freeze or resume camera flights and the idle spin
//! - `set_tween_policy`: `"drop"` or `"latest"` mid-flight behaviour
//! - `get_narrative_state`: snapshot of the gate flags and active section
//! - `get_fps`: current smoothed frame rate
//!
//! ## Outgoing notifications
//!
//! - `section_changed`: the active section index changed
//! - `narrative_state_changed`: any of the three gate flags flipped

/// JSON-RPC 2.0 bidirectional messaging over iframe `postMessage`.
pub mod web_rpc;
