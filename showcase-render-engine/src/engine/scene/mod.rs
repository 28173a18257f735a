//! Scene content: the showcase model, its light rig, and the gate that
//! decides when any of it renders at all.

/// Four-light rig and the per-section boost response.
pub mod lighting;

/// GLTF model loading, material adjustment, and the idle turntable spin.
pub mod model;

/// Camera activation and model visibility driven by the scroll gate.
pub mod render_gate;
