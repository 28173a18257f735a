//! Showcase camera control.
//!
//! Two regimes share one camera: scripted flights between section targets
//! while the scroll narrative is active, and a damped free-look orbit
//! outside it. The tween engine owns the flights; the orbit controller
//! stays idle while one is in progress.

/// Time-bounded camera interpolation between section targets.
pub mod camera_tween;

/// Free-look orbit controller for the non-narrative regime.
pub mod orbit_camera;
