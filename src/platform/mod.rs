//! Platform abstraction layer
//!
//! The simulation never talks to a renderer, DOM or host app directly. A
//! platform provides:
//! - Scene: create/dispose/move renderable entities, camera follow
//! - Display: score, distance and best-run text, game-over panel
//! - Sound: named effects (may be unavailable)
//! - Run report: optional notification to an embedding host
//!
//! Time comes from a separate [`Clock`].

mod clock;
mod headless;
#[cfg(target_arch = "wasm32")]
mod web;

pub use clock::{Clock, FixedClock, TimestampClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
pub use headless::HeadlessPlatform;
#[cfg(target_arch = "wasm32")]
pub use web::{GameHost, WebPlatform};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::audio::SoundSink;
use crate::sim::{Entity, EntityKind, ObstacleVariant, Tree};

/// Opaque handle to a renderable owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(pub u64);

/// Appearance of a renderable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Obstacle(ObstacleVariant),
    Collectible,
    Tree,
}

impl RenderKind {
    /// Name handed to a host scene
    pub fn as_str(self) -> &'static str {
        match self {
            RenderKind::Obstacle(variant) => variant.as_str(),
            RenderKind::Collectible => "collectible",
            RenderKind::Tree => "tree",
        }
    }
}

/// Everything the scene needs to create a renderable
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDesc {
    pub kind: RenderKind,
    pub position: Vec3,
    pub scale: f32,
    /// Billboard toward the camera (false for flat sprites)
    pub faces_camera: bool,
}

impl From<&Entity> for EntityDesc {
    fn from(entity: &Entity) -> Self {
        Self {
            kind: match entity.kind {
                EntityKind::Obstacle(variant) => RenderKind::Obstacle(variant),
                EntityKind::Collectible => RenderKind::Collectible,
            },
            position: entity.pos,
            scale: entity.scale,
            faces_camera: entity.kind.faces_camera(),
        }
    }
}

impl From<&Tree> for EntityDesc {
    fn from(tree: &Tree) -> Self {
        Self {
            kind: RenderKind::Tree,
            position: tree.pos,
            scale: tree.scale,
            faces_camera: true,
        }
    }
}

/// 3D scene collaborator
pub trait Scene {
    fn create_entity(&mut self, desc: &EntityDesc) -> RenderHandle;
    fn dispose_entity(&mut self, handle: RenderHandle);
    /// Move/rescale a live renderable (called every frame)
    fn update_entity(&mut self, _handle: RenderHandle, _position: Vec3, _scale: f32) {}
    fn set_camera_follow(&mut self, x: f32);
}

/// HUD collaborator
pub trait Display {
    fn set_score_text(&mut self, score: u32);
    fn set_distance_text(&mut self, meters: u32);
    fn set_best_run_text(&mut self, score: u32, distance: u32);
    fn show_game_over_panel(&mut self, summary: &str);
    fn hide_game_over_panel(&mut self);
}

/// Final result sent to an embedding host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub score: u32,
    pub distance: u32,
}

/// Host delivery failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("run report not delivered: {0}")]
pub struct ReportError(pub String);

/// Optional outbound notification at game over
pub trait RunReporter {
    fn report_run(&mut self, _report: &RunReport) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Everything a session needs from its host
pub trait Platform: Scene + Display + SoundSink + RunReporter {}

impl<T: Scene + Display + SoundSink + RunReporter> Platform for T {}

/// Install the logger for the current target
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::try_init();
    }
}

/// Run seed derived from the wall clock
pub fn clock_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityId;

    #[test]
    fn test_desc_from_entity() {
        let entity = Entity {
            id: EntityId(3),
            kind: EntityKind::Obstacle(ObstacleVariant::Log),
            pos: Vec3::new(-3.0, 1.2, 60.0),
            scale: 1.1,
        };
        let desc = EntityDesc::from(&entity);
        assert_eq!(desc.kind, RenderKind::Obstacle(ObstacleVariant::Log));
        assert!(!desc.faces_camera);
        assert_eq!(desc.position, entity.pos);
        assert_eq!(desc.scale, 1.1);
        assert_eq!(desc.kind.as_str(), "log");
    }

    #[test]
    fn test_kind_names_are_distinct() {
        let mut names: Vec<_> = ObstacleVariant::ALL
            .iter()
            .map(|v| RenderKind::Obstacle(*v).as_str())
            .chain([RenderKind::Collectible.as_str(), RenderKind::Tree.as_str()])
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ObstacleVariant::ALL.len() + 2);
    }
}
