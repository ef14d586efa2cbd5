//! Scrolling world: gameplay entities move toward the player and are
//! despawned once they fall behind.

use super::state::{Entity, GameEvent};

/// Scroll every entity by `dz` and despawn those behind `recycle_z`.
///
/// Walks the collection in reverse index order so removals never skip an
/// element. Returns the number of entities removed.
pub fn advance_entities(
    entities: &mut Vec<Entity>,
    dz: f32,
    recycle_z: f32,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut removed = 0;
    for i in (0..entities.len()).rev() {
        entities[i].pos.z -= dz;
        if entities[i].pos.z < recycle_z {
            let entity = entities.remove(i);
            events.push(GameEvent::Despawned(entity.id));
            removed += 1;
        }
    }
    removed
}
