//! Player vs entity overlap tests
//!
//! Hit boxes are axis-aligned half-extents on the ground plane (x, z).
//! There is no rotation-aware geometry: a sprite is a box around its center.

use glam::Vec3;

use super::state::{EntityId, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// Obstacle that ended the run, if any
    pub crashed: Option<EntityId>,
    /// Collectibles picked up this frame
    pub collected: Vec<EntityId>,
}

/// Whether `other` lies within `half_extents` (x, z) of `player`
#[inline]
pub fn overlaps(player: Vec3, other: Vec3, half_extents: (f32, f32)) -> bool {
    let dx = other.x - player.x;
    let dz = other.z - player.z;
    dx.abs() < half_extents.0 && dz.abs() < half_extents.1
}

/// Test the player against every obstacle and collectible.
///
/// The first overlapping obstacle ends the run and nothing else is checked.
/// Otherwise every overlapping collectible is consumed.
pub fn check_collisions(state: &mut GameState, tuning: &Tuning) -> CollisionResult {
    let mut result = CollisionResult::default();
    if state.is_game_over() {
        return result;
    }

    let player = state.player.pos;

    if let Some(hit) = state
        .obstacles
        .iter()
        .find(|o| overlaps(player, o.pos, tuning.obstacle_half_extents))
    {
        log::info!("Hit {:?} at z={:.2}", hit.kind, hit.pos.z);
        state.session.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Crashed(hit.id));
        result.crashed = Some(hit.id);
        return result;
    }

    for i in (0..state.collectibles.len()).rev() {
        if overlaps(player, state.collectibles[i].pos, tuning.collectible_half_extents) {
            let collectible = state.collectibles.remove(i);
            state.session.score += 1;
            state.events.push(GameEvent::Collected(collectible.id));
            result.collected.push(collectible.id);
        }
    }

    result
}
