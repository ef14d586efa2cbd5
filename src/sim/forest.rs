//! Decorative forest along both road sides
//!
//! Unlike gameplay entities, trees are never destroyed: once a tree passes
//! behind the player it wraps forward by the ring length, so a fixed set of
//! trees reads as an endless backdrop. Apparent size shrinks with distance.

use glam::Vec3;
use rand::Rng;

use super::state::EntityId;
use crate::consts::TREE_Y;
use crate::lerp;
use crate::tuning::ForestTuning;

/// One tree placement inside a row pattern
#[derive(Debug, Clone, Copy)]
struct TreeSlot {
    /// Extra lateral offset past the verge
    dx: f32,
    scale: f32,
}

/// Hand-authored row layouts; one is picked at random per row
const ROW_PATTERNS: &[&[TreeSlot]] = &[
    &[
        TreeSlot { dx: 0.5, scale: 1.0 },
        TreeSlot { dx: 2.0, scale: 0.9 },
        TreeSlot { dx: 3.2, scale: 1.1 },
    ],
    &[TreeSlot { dx: 0.8, scale: 1.1 }, TreeSlot { dx: 2.8, scale: 0.95 }],
    &[
        TreeSlot { dx: 0.3, scale: 0.9 },
        TreeSlot { dx: 1.6, scale: 1.2 },
        TreeSlot { dx: 2.9, scale: 1.0 },
        TreeSlot { dx: 3.5, scale: 0.85 },
    ],
    &[TreeSlot { dx: 1.2, scale: 1.0 }, TreeSlot { dx: 2.4, scale: 1.05 }],
];

/// A background tree
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub id: EntityId,
    pub pos: Vec3,
    /// Per-tree size before distance falloff
    pub base_scale: f32,
    /// Current rendered scale
    pub scale: f32,
}

/// Every tree in the ring
#[derive(Debug, Clone, Default)]
pub struct Forest {
    pub trees: Vec<Tree>,
}

impl Forest {
    /// Lay out `rows` rows on each side of the road with jitter
    pub fn plant(
        tuning: &ForestTuning,
        rng: &mut impl Rng,
        mut next_id: impl FnMut() -> EntityId,
    ) -> Self {
        let base_offset = tuning.road_width / 2.0 + tuning.verge;
        let mut trees = Vec::new();

        for side in [-1.0f32, 1.0] {
            for row in 0..tuning.rows {
                let z_base = row as f32 * tuning.row_spacing + tuning.start_z;
                let pattern = ROW_PATTERNS[rng.random_range(0..ROW_PATTERNS.len())];

                for slot in pattern {
                    let jitter_x = rng.random_range(0.0..0.7);
                    let jitter_z = rng.random_range(0.0..3.0);
                    let base_scale = slot.scale * rng.random_range(0.85..1.25);
                    let z = z_base + jitter_z;

                    trees.push(Tree {
                        id: next_id(),
                        pos: Vec3::new(side * (base_offset + slot.dx + jitter_x), TREE_Y, z),
                        base_scale,
                        scale: base_scale * distance_falloff(z, tuning),
                    });
                }
            }
        }

        log::debug!("Planted {} trees", trees.len());
        Self { trees }
    }

    /// Scroll every tree by `dz`, wrapping the ones behind the player
    pub fn advance(&mut self, dz: f32, tuning: &ForestTuning) {
        let ring = tuning.ring_length();
        for tree in &mut self.trees {
            tree.pos.z -= dz;
            if tree.pos.z < tuning.wrap_z {
                tree.pos.z += ring;
            }
            tree.scale = tree.base_scale * distance_falloff(tree.pos.z, tuning);
        }
    }
}

/// Scale multiplier for a tree at `z`: `near_scale` up close, `far_scale`
/// in the distance, linear in between.
pub fn distance_falloff(z: f32, tuning: &ForestTuning) -> f32 {
    if z <= tuning.near_z {
        tuning.near_scale
    } else if z >= tuning.far_z {
        tuning.far_scale
    } else {
        let t = (tuning.far_z - z) / (tuning.far_z - tuning.near_z);
        lerp(tuning.far_scale, tuning.near_scale, t)
    }
}
