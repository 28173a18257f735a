/// Shared configuration for the showcase render engine.
///
/// Every numeric threshold consumed by the scroll narrative pipeline lives
/// here so the section resolver, visibility gate and camera rig can never
/// drift apart on their derived values.
pub mod narrative;

/// Base light intensities, positions, and the spotlight boost threshold.
pub mod lighting;

/// Default camera pose, tween timing, and free-look orbit limits.
pub mod camera;

/// Showcase model transform, idle spin speeds, and material adjustments.
pub mod model;
