//! Asset loading and initialisation systems for the showcase scene.
//!
//! Manages the loading pipeline from narrative manifest parsing through
//! model spawning to material configuration, with progress tracking.

/// Narrative manifest loading.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
