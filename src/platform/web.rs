//! Browser platform: scene and HUD live in the page, sound in Web Audio

use glam::Vec3;
use wasm_bindgen::prelude::*;

use super::{
    Display, EntityDesc, RenderHandle, ReportError, RunReport, RunReporter, Scene,
};
use crate::audio::{AudioError, AudioManager, SoundEffect, SoundSink};
use crate::best_run::BestRun;

#[wasm_bindgen]
extern "C" {
    /// Page-side object that owns the 3D scene and the HUD elements.
    ///
    /// Handles are allocated here and passed in; the page maps them to
    /// its own meshes.
    pub type GameHost;

    #[wasm_bindgen(method, js_name = createEntity)]
    fn create_entity(
        this: &GameHost,
        handle: f64,
        kind: &str,
        x: f32,
        y: f32,
        z: f32,
        scale: f32,
        faces_camera: bool,
    );

    #[wasm_bindgen(method, js_name = disposeEntity)]
    fn dispose_entity(this: &GameHost, handle: f64);

    #[wasm_bindgen(method, js_name = updateEntity)]
    fn update_entity(this: &GameHost, handle: f64, x: f32, y: f32, z: f32, scale: f32);

    #[wasm_bindgen(method, js_name = setCameraFollow)]
    fn set_camera_follow(this: &GameHost, x: f32);

    #[wasm_bindgen(method, js_name = setScoreText)]
    fn set_score_text(this: &GameHost, score: u32);

    #[wasm_bindgen(method, js_name = setDistanceText)]
    fn set_distance_text(this: &GameHost, meters: u32);

    #[wasm_bindgen(method, js_name = setBestRunText)]
    fn set_best_run_text(this: &GameHost, label: &str);

    #[wasm_bindgen(method, js_name = showGameOverPanel)]
    fn show_game_over_panel(this: &GameHost, summary: &str);

    #[wasm_bindgen(method, js_name = hideGameOverPanel)]
    fn hide_game_over_panel(this: &GameHost);

    /// Optional; a missing method or a throw counts as a failed delivery
    #[wasm_bindgen(method, catch, js_name = reportRun)]
    fn report_run(this: &GameHost, score: u32, distance: u32) -> Result<(), JsValue>;
}

/// Platform backed by a page [`GameHost`]
pub struct WebPlatform {
    host: GameHost,
    next_handle: u64,
    audio: AudioManager,
}

impl WebPlatform {
    pub fn new(host: GameHost, audio: AudioManager) -> Self {
        Self {
            host,
            next_handle: 0,
            audio,
        }
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }
}

impl Scene for WebPlatform {
    fn create_entity(&mut self, desc: &EntityDesc) -> RenderHandle {
        self.next_handle += 1;
        let handle = RenderHandle(self.next_handle);
        let p = desc.position;
        self.host.create_entity(
            handle.0 as f64,
            desc.kind.as_str(),
            p.x,
            p.y,
            p.z,
            desc.scale,
            desc.faces_camera,
        );
        handle
    }

    fn dispose_entity(&mut self, handle: RenderHandle) {
        self.host.dispose_entity(handle.0 as f64);
    }

    fn update_entity(&mut self, handle: RenderHandle, position: Vec3, scale: f32) {
        self.host
            .update_entity(handle.0 as f64, position.x, position.y, position.z, scale);
    }

    fn set_camera_follow(&mut self, x: f32) {
        self.host.set_camera_follow(x);
    }
}

impl Display for WebPlatform {
    fn set_score_text(&mut self, score: u32) {
        self.host.set_score_text(score);
    }

    fn set_distance_text(&mut self, meters: u32) {
        self.host.set_distance_text(meters);
    }

    fn set_best_run_text(&mut self, score: u32, distance: u32) {
        self.host
            .set_best_run_text(&BestRun { score, distance }.label());
    }

    fn show_game_over_panel(&mut self, summary: &str) {
        self.host.show_game_over_panel(summary);
    }

    fn hide_game_over_panel(&mut self) {
        self.host.hide_game_over_panel();
    }
}

impl SoundSink for WebPlatform {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        self.audio.play(effect)
    }
}

impl RunReporter for WebPlatform {
    fn report_run(&mut self, report: &RunReport) -> Result<(), ReportError> {
        self.host
            .report_run(report.score, report.distance)
            .map_err(|e| ReportError(format!("{e:?}")))
    }
}
