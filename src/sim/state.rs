//! Game state and core simulation types
//!
//! Coordinates are world-relative: the player sits at z = 0 and the world
//! scrolls toward negative z. `x` is the lateral lane offset, `y` is the
//! render height of the sprite center.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::forest::Forest;
use super::lane::{CameraFollow, LaneController};
use super::spawner::SpawnTimers;
use crate::consts::PLAYER_Y;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; frozen until an explicit restart
    GameOver,
}

/// Unique identifier for an entity (obstacles, collectibles and trees share one space)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Obstacle appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleVariant {
    Cone,
    Log,
    Rock,
    Stump,
}

impl ObstacleVariant {
    pub const ALL: [ObstacleVariant; 4] = [
        ObstacleVariant::Cone,
        ObstacleVariant::Log,
        ObstacleVariant::Rock,
        ObstacleVariant::Stump,
    ];

    /// Whether the renderer should billboard this sprite toward the camera.
    /// Logs lie flat across the road and keep a fixed orientation.
    pub fn faces_camera(self) -> bool {
        !matches!(self, ObstacleVariant::Log)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObstacleVariant::Cone => "cone",
            ObstacleVariant::Log => "log",
            ObstacleVariant::Rock => "rock",
            ObstacleVariant::Stump => "stump",
        }
    }
}

/// What a gameplay entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle(ObstacleVariant),
    Collectible,
}

impl EntityKind {
    pub fn variant(self) -> Option<ObstacleVariant> {
        match self {
            EntityKind::Obstacle(variant) => Some(variant),
            EntityKind::Collectible => None,
        }
    }

    pub fn faces_camera(self) -> bool {
        self.variant().is_none_or(ObstacleVariant::faces_camera)
    }
}

/// A moving gameplay object (obstacle or collectible)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec3,
    pub scale: f32,
}

/// The player: fixed at z = 0, moves only laterally
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
    pub lane: LaneController,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(0.0, PLAYER_Y, 0.0),
            lane: LaneController::new(tuning.lane_x.len(), tuning.center_lane()),
        }
    }
}

/// Per-run progression values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Forward speed (units/s)
    pub speed: f32,
    /// Distance travelled (units)
    pub distance: f32,
    /// Collectibles picked up
    pub score: u32,
    pub phase: GamePhase,
}

impl SessionState {
    pub fn new(base_speed: f32) -> Self {
        Self {
            speed: base_speed,
            distance: 0.0,
            score: 0,
            phase: GamePhase::Playing,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Distance rounded to whole meters for display and persistence
    pub fn distance_meters(&self) -> u32 {
        self.distance.max(0.0).round() as u32
    }
}

/// Things that happened during a tick, for the collaborators to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A gameplay entity appeared ahead of the player
    Spawned(Entity),
    /// An entity scrolled behind the player or was cleared by a reset
    Despawned(EntityId),
    /// The player picked up a collectible (already removed)
    Collected(EntityId),
    /// The player hit an obstacle; the run is over
    Crashed(EntityId),
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub session: SessionState,
    pub player: Player,
    pub camera: CameraFollow,
    /// Live obstacles (unordered)
    pub obstacles: Vec<Entity>,
    /// Live collectibles (unordered)
    pub collectibles: Vec<Entity>,
    pub timers: SpawnTimers,
    pub forest: Forest,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session, planting the forest from the seeded RNG
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut next_id = 1;
        let forest = Forest::plant(&tuning.forest, &mut rng, || {
            let id = EntityId(next_id);
            next_id += 1;
            id
        });

        Self {
            seed,
            rng,
            session: SessionState::new(tuning.base_speed),
            player: Player::new(tuning),
            camera: CameraFollow::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            timers: SpawnTimers::new(tuning),
            forest,
            events: Vec::new(),
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    /// Shift the target lane by `delta`. Ignored once the run is over.
    ///
    /// Safe to call between ticks: only the target index changes.
    pub fn request_lane_change(&mut self, delta: i32) {
        if self.is_game_over() {
            return;
        }
        self.player.lane.set_target_lane(delta);
    }

    /// Start a new run: clear gameplay entities and restore initial values.
    ///
    /// The forest and the RNG stream carry over.
    pub fn reset(&mut self, tuning: &Tuning) {
        for entity in self.obstacles.drain(..).chain(self.collectibles.drain(..)) {
            self.events.push(GameEvent::Despawned(entity.id));
        }
        self.session = SessionState::new(tuning.base_speed);
        self.player = Player::new(tuning);
        self.timers.reset();
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of live gameplay entities
    pub fn entity_count(&self) -> usize {
        self.obstacles.len() + self.collectibles.len()
    }
}
