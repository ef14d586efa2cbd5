//! Timed spawning of obstacles and collectibles ahead of the player

use glam::Vec3;
use rand::Rng;

use super::state::{Entity, EntityId, EntityKind, GameEvent, GameState};
use crate::consts::{COLLECTIBLE_Y, OBSTACLE_Y};
use crate::tuning::Tuning;

/// Accumulator that fires once its elapsed time exceeds the interval.
///
/// Firing resets the accumulator to zero rather than subtracting the
/// interval, so a long frame never produces a burst of spawns.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    pub elapsed: f32,
    pub interval: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval,
        }
    }

    /// Accumulate `dt`; returns true when the timer fires
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// The two independent spawn clocks
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimers {
    pub obstacle: SpawnTimer,
    pub collectible: SpawnTimer,
}

impl SpawnTimers {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacle: SpawnTimer::new(tuning.obstacle_interval),
            collectible: SpawnTimer::new(tuning.collectible_interval),
        }
    }

    pub fn reset(&mut self) {
        self.obstacle.elapsed = 0.0;
        self.collectible.elapsed = 0.0;
    }
}

/// Advance both timers and spawn whatever is due
pub fn update_spawns(state: &mut GameState, tuning: &Tuning, dt: f32) {
    if state.timers.obstacle.tick(dt) {
        spawn_obstacle(state, tuning);
    }
    if state.timers.collectible.tick(dt) {
        spawn_collectible(state, tuning);
    }
}

/// Place a random obstacle in a random lane. No-op when no variants are configured.
pub fn spawn_obstacle(state: &mut GameState, tuning: &Tuning) -> Option<EntityId> {
    if tuning.obstacle_variants.is_empty() || tuning.lane_x.is_empty() {
        log::debug!("No obstacle variants configured, skipping spawn");
        return None;
    }

    let lane = tuning.lane_x[state.rng.random_range(0..tuning.lane_x.len())];
    let variant =
        tuning.obstacle_variants[state.rng.random_range(0..tuning.obstacle_variants.len())];
    let (min, max) = tuning.obstacle_scale;
    let scale = if min < max {
        state.rng.random_range(min..max)
    } else {
        min
    };

    let z = state.player.pos.z + tuning.ahead_distance;
    let entity = Entity {
        id: state.next_entity_id(),
        kind: EntityKind::Obstacle(variant),
        pos: Vec3::new(lane, OBSTACLE_Y, z),
        scale,
    };
    log::debug!("Spawned {} at x={} z={}", variant.as_str(), lane, z);

    let id = entity.id;
    state.events.push(GameEvent::Spawned(entity.clone()));
    state.obstacles.push(entity);
    Some(id)
}

/// Place a collectible in a random lane
pub fn spawn_collectible(state: &mut GameState, tuning: &Tuning) -> Option<EntityId> {
    if tuning.lane_x.is_empty() {
        return None;
    }

    let lane = tuning.lane_x[state.rng.random_range(0..tuning.lane_x.len())];
    let entity = Entity {
        id: state.next_entity_id(),
        kind: EntityKind::Collectible,
        pos: Vec3::new(lane, COLLECTIBLE_Y, state.player.pos.z + tuning.ahead_distance),
        scale: 1.0,
    };

    let id = entity.id;
    state.events.push(GameEvent::Spawned(entity.clone()));
    state.collectibles.push(entity);
    Some(id)
}
