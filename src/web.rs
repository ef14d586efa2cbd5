//! Browser entry point
//!
//! The page creates a [`WebGame`] with its [`GameHost`], forwards key and
//! pointer events, and calls `frame` from `requestAnimationFrame`. Best run
//! and settings persist in LocalStorage.

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::input::{InputEvent, SwipeTracker};
use crate::persistence::LocalStorage;
use crate::platform::{self, GameHost, TimestampClock, WebPlatform};
use crate::{GameSession, Settings, Tuning};

#[wasm_bindgen(start)]
pub fn start() {
    platform::init_logging();
    log::info!("Lane Runner (web) loaded");
}

/// One game bound to a page host
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession<WebPlatform, LocalStorage>,
    settings: Settings,
    swipe: SwipeTracker,
    clock: TimestampClock,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a run. `tuning_json` overrides the default balance.
    #[wasm_bindgen(constructor)]
    pub fn new(host: GameHost, tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => {
                Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => Tuning::default(),
        };

        let storage = LocalStorage;
        let settings = Settings::load(&storage);
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let seed = platform::clock_seed();
        let session = GameSession::new(tuning, seed, WebPlatform::new(host, audio), storage);

        Ok(Self {
            session,
            swipe: SwipeTracker::from_settings(&settings),
            settings,
            clock: TimestampClock::new(),
        })
    }

    /// Advance one frame; `timestamp_ms` is the `requestAnimationFrame` time
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.clock.stamp(timestamp_ms);
        self.session.frame(&mut self.clock);
    }

    /// Returns whether the key was handled (so the page can `preventDefault`)
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        match InputEvent::from_key(key) {
            Some(event) => {
                self.session.handle_input(event);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32) {
        self.swipe.pointer_down(x);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32) {
        if let Some(event) = self.swipe.pointer_move(x) {
            self.session.handle_input(event);
        }
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.swipe.pointer_up();
    }

    /// Restart button; ignored while a run is live
    pub fn restart(&mut self) -> bool {
        self.session.restart()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.session.state().session.score
    }

    #[wasm_bindgen(getter)]
    pub fn distance(&self) -> u32 {
        self.session.state().session.distance_meters()
    }

    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.apply_settings();
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, master: f32, sfx: f32) {
        self.settings.master_volume = master.clamp(0.0, 1.0);
        self.settings.sfx_volume = sfx.clamp(0.0, 1.0);
        self.apply_settings();
    }

    #[wasm_bindgen(js_name = setSwipeThreshold)]
    pub fn set_swipe_threshold(&mut self, pixels: f32) {
        self.settings.swipe_threshold = pixels.max(0.0);
        self.swipe = SwipeTracker::from_settings(&self.settings);
        self.apply_settings();
    }
}

impl WebGame {
    fn apply_settings(&mut self) {
        self.session
            .platform_mut()
            .audio_mut()
            .apply_settings(&self.settings);
        self.settings.save(&mut LocalStorage);
    }
}
