//! Static configuration assets for the scroll narrative.
//!
//! The ordered section list is plain JSON authored alongside the landing
//! page copy; nothing in it is created or mutated at runtime.

/// Narrative manifest containing the ordered section list with camera
/// targets, stats, and per-section light boosts.
pub mod narrative_manifest;
