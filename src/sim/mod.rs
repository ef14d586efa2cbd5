//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta supplied by the caller, never read from a clock
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod forest;
pub mod lane;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionResult, check_collisions, overlaps};
pub use forest::{Forest, Tree, distance_falloff};
pub use lane::{CameraFollow, LaneController, step_toward};
pub use spawner::{SpawnTimer, SpawnTimers, spawn_collectible, spawn_obstacle};
pub use state::{
    Entity, EntityId, EntityKind, GameEvent, GamePhase, GameState, ObstacleVariant, Player,
    SessionState,
};
pub use tick::tick;
