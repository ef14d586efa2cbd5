//! Lane Runner - simulation core of a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic frame step (lanes, scrolling, spawning, collisions, progression)
//! - `session`: Playing/GameOver state machine that drives the collaborators
//! - `best_run`: Persisted best-run record
//! - `persistence`: Key/value storage backends (memory, file, LocalStorage)
//! - `platform`: Collaborator seams (scene, display, sound, clock, host report)
//! - `tuning`: Data-driven game balance
//! - `web`: Browser entry point (wasm32 only)

pub mod audio;
pub mod best_run;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_run::{BestRun, BestRunStore};
pub use session::GameSession;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// These are the defaults baked into [`Tuning::default`]; the simulation
/// itself always reads from a `Tuning` value.
pub mod consts {
    /// Lateral offsets of the three lanes (left, center, right)
    pub const LANE_X: [f32; 3] = [-3.0, 0.0, 3.0];
    /// Index of the center lane
    pub const CENTER_LANE: usize = 1;
    /// Lateral lane-change speed (units/s)
    pub const LANE_SPEED: f32 = 8.0;

    /// Forward speed at the start of a run (units/s)
    pub const BASE_SPEED: f32 = 12.0;
    /// Forward speed gain (units/s²), uncapped
    pub const ACCELERATION: f32 = 0.3;

    /// Minimum gap between obstacle spawns (seconds)
    pub const OBSTACLE_INTERVAL: f32 = 1.2;
    /// Minimum gap between collectible spawns (seconds)
    pub const COLLECTIBLE_INTERVAL: f32 = 0.8;
    /// Spawn distance ahead of the player
    pub const AHEAD_DISTANCE: f32 = 60.0;
    /// Gameplay entities behind this z are despawned
    pub const RECYCLE_Z: f32 = -15.0;

    /// Obstacle hit box half-extents (x, z)
    pub const OBSTACLE_HALF_WIDTH: f32 = 0.96;
    pub const OBSTACLE_HALF_DEPTH: f32 = 1.2;
    /// Collectible pickup half-extents (x, z)
    pub const COLLECTIBLE_HALF_WIDTH: f32 = 0.8;
    pub const COLLECTIBLE_HALF_DEPTH: f32 = 1.2;

    /// Render heights (y) of sprite centers
    pub const PLAYER_Y: f32 = 1.2;
    pub const OBSTACLE_Y: f32 = 1.2;
    pub const COLLECTIBLE_Y: f32 = 0.8;
    pub const TREE_Y: f32 = 3.0;

    /// Camera lerp factor per frame
    pub const CAMERA_FOLLOW: f32 = 0.1;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Replace a non-finite or negative frame delta with zero
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(0.0), 0.0);
        assert_eq!(sanitize_dt(-1.0), 0.0);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.1), 1.0);
        assert_eq!(lerp(3.0, 3.0, 0.5), 3.0);
    }
}
