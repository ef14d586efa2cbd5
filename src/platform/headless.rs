//! Platform with no window: keeps the scene and HUD as plain data

use std::collections::BTreeMap;

use glam::Vec3;

use super::{
    Display, EntityDesc, RenderHandle, ReportError, RunReport, RunReporter, Scene,
};
use crate::audio::{AudioError, AudioManager, SoundEffect, SoundSink};

/// Headless platform used by the native binary and tests.
///
/// Mirrors what a real scene/HUD would show so callers can inspect it.
#[derive(Default)]
pub struct HeadlessPlatform {
    next_handle: u64,
    /// Renderables currently alive
    pub live: BTreeMap<RenderHandle, EntityDesc>,
    /// Dispose calls for handles that were not alive
    pub stale_disposals: usize,
    pub camera_x: f32,
    pub score: u32,
    pub distance: u32,
    pub best_run: Option<(u32, u32)>,
    /// Game-over summary while the panel is shown
    pub game_over_panel: Option<String>,
    /// Every effect the session asked for, played or not
    pub requested_sounds: Vec<SoundEffect>,
    pub reports: Vec<RunReport>,
    /// Make run reports fail (host unreachable)
    pub reject_reports: bool,
    audio: AudioManager,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audio(audio: AudioManager) -> Self {
        Self {
            audio,
            ..Self::default()
        }
    }

    /// Count of live renderables of gameplay kinds (not trees)
    pub fn live_gameplay_count(&self) -> usize {
        self.live
            .values()
            .filter(|d| d.kind != super::RenderKind::Tree)
            .count()
    }
}

impl Scene for HeadlessPlatform {
    fn create_entity(&mut self, desc: &EntityDesc) -> RenderHandle {
        self.next_handle += 1;
        let handle = RenderHandle(self.next_handle);
        self.live.insert(handle, desc.clone());
        handle
    }

    fn dispose_entity(&mut self, handle: RenderHandle) {
        if self.live.remove(&handle).is_none() {
            log::warn!("Dispose of unknown handle {:?}", handle);
            self.stale_disposals += 1;
        }
    }

    fn update_entity(&mut self, handle: RenderHandle, position: Vec3, scale: f32) {
        if let Some(desc) = self.live.get_mut(&handle) {
            desc.position = position;
            desc.scale = scale;
        }
    }

    fn set_camera_follow(&mut self, x: f32) {
        self.camera_x = x;
    }
}

impl Display for HeadlessPlatform {
    fn set_score_text(&mut self, score: u32) {
        self.score = score;
    }

    fn set_distance_text(&mut self, meters: u32) {
        self.distance = meters;
    }

    fn set_best_run_text(&mut self, score: u32, distance: u32) {
        self.best_run = Some((score, distance));
    }

    fn show_game_over_panel(&mut self, summary: &str) {
        log::info!("{}", summary.replace('\n', " - "));
        self.game_over_panel = Some(summary.to_string());
    }

    fn hide_game_over_panel(&mut self) {
        self.game_over_panel = None;
    }
}

impl SoundSink for HeadlessPlatform {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        self.requested_sounds.push(effect);
        self.audio.play(effect)
    }
}

impl RunReporter for HeadlessPlatform {
    fn report_run(&mut self, report: &RunReport) -> Result<(), ReportError> {
        if self.reject_reports {
            return Err(ReportError("host unreachable".into()));
        }
        self.reports.push(*report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RenderKind;

    #[test]
    fn test_create_and_dispose() {
        let mut platform = HeadlessPlatform::new();
        let desc = EntityDesc {
            kind: RenderKind::Collectible,
            position: Vec3::new(0.0, 0.8, 60.0),
            scale: 1.0,
            faces_camera: true,
        };
        let a = platform.create_entity(&desc);
        let b = platform.create_entity(&desc);
        assert_ne!(a, b);
        assert_eq!(platform.live_gameplay_count(), 2);

        platform.update_entity(a, Vec3::new(0.0, 0.8, 10.0), 1.0);
        assert_eq!(platform.live[&a].position.z, 10.0);

        platform.dispose_entity(a);
        platform.dispose_entity(a);
        assert_eq!(platform.live.len(), 1);
        assert_eq!(platform.stale_disposals, 1);
    }
}
