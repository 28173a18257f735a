//! Scroll-synchronized narrative state.
//!
//! Maps the hosting page's continuous scroll offset to a discrete active
//! section and a set of scene visibility flags. Samples arrive over the RPC
//! bridge on WASM and from a keyboard driver during native development.

/// Scroll offset sampling and the pause signal.
pub mod scroll_state;

/// Edge-triggered mapping from scroll progress to the active section index.
pub mod section_resolver;

/// Render/show/narrative flags derived from scroll thresholds.
pub mod visibility;
