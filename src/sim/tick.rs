//! Per-frame simulation step
//!
//! Order is fixed: lane → scroll → spawn → collide → progress. Collision
//! assumes every position has already been advanced for this frame.

use super::collision::{CollisionResult, check_collisions};
use super::spawner::update_spawns;
use super::state::GameState;
use super::{progression, world};
use crate::sanitize_dt;
use crate::tuning::Tuning;

/// Advance the game state by one frame of `dt` seconds.
///
/// Does nothing once the run is over. Events are queued on `state.events`.
pub fn tick(state: &mut GameState, tuning: &Tuning, dt: f32) -> CollisionResult {
    if state.is_game_over() {
        return CollisionResult::default();
    }
    let dt = sanitize_dt(dt);

    // Lateral movement toward the target lane
    let player = &mut state.player;
    player.pos.x = player
        .lane
        .advance(player.pos.x, &tuning.lane_x, tuning.lane_speed, dt);
    state.camera.follow(state.player.pos.x, tuning.camera_follow);

    // Scroll the world
    let dz = state.session.speed * dt;
    world::advance_entities(&mut state.obstacles, dz, tuning.recycle_z, &mut state.events);
    world::advance_entities(
        &mut state.collectibles,
        dz,
        tuning.recycle_z,
        &mut state.events,
    );
    state.forest.advance(dz, &tuning.forest);

    update_spawns(state, tuning, dt);

    let result = check_collisions(state, tuning);

    if result.crashed.is_some() {
        progression::finish(&mut state.session, dz);
    } else {
        progression::advance(&mut state.session, dz, dt, tuning.acceleration);
    }

    result
}
