//! Game session state machine
//!
//! `Playing` → `GameOver` on an obstacle hit, `GameOver` → `Playing` on an
//! explicit restart. The session owns the simulation state and is the only
//! place that talks to the platform: it turns simulation events into scene
//! and HUD calls, records the best run, and keeps every collaborator fault
//! (storage, audio, host report) out of the frame loop.

use std::collections::HashMap;

use crate::audio::SoundEffect;
use crate::best_run::BestRunStore;
use crate::input::InputEvent;
use crate::persistence::Storage;
use crate::platform::{Clock, EntityDesc, Platform, RenderHandle, RunReport};
use crate::sim::{self, EntityId, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// End-of-run panel text
pub fn game_over_summary(score: u32, distance: u32, is_new_record: bool) -> String {
    let mut text = format!("Collected: {} | Distance: {} m", score, distance);
    if is_new_record {
        text.push_str("\nNew record!");
    }
    text
}

/// One player's session: consecutive runs sharing a platform and a best-run store
pub struct GameSession<P: Platform, S: Storage> {
    tuning: Tuning,
    state: GameState,
    platform: P,
    best_run: BestRunStore<S>,
    /// Scene handle for every live entity and tree
    handles: HashMap<EntityId, RenderHandle>,
}

impl<P: Platform, S: Storage> GameSession<P, S> {
    /// Set up the scene and HUD and start the first run
    pub fn new(tuning: Tuning, seed: u64, platform: P, storage: S) -> Self {
        let state = GameState::new(seed, &tuning);
        let mut session = Self {
            tuning,
            state,
            platform,
            best_run: BestRunStore::new(storage),
            handles: HashMap::new(),
        };

        for tree in &session.state.forest.trees {
            let handle = session.platform.create_entity(&EntityDesc::from(tree));
            session.handles.insert(tree.id, handle);
        }
        session.show_fresh_hud();

        log::info!("Run started (seed {})", seed);
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn best_run(&self) -> &BestRunStore<S> {
        &self.best_run
    }

    pub fn phase(&self) -> GamePhase {
        self.state.session.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// React to a discrete input. Lane events only retarget the player.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event.lane_delta() {
            Some(delta) => self.state.request_lane_change(delta),
            None => {
                self.restart();
            }
        }
    }

    /// Run one frame using the clock's delta
    pub fn frame(&mut self, clock: &mut impl Clock) {
        let dt = clock.delta_seconds();
        self.tick(dt);
    }

    /// Run one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.state.is_game_over() {
            return;
        }

        let score_before = self.state.session.score;
        let result = sim::tick(&mut self.state, &self.tuning, dt);

        self.apply_events();
        self.sync_scene();

        if self.state.session.score != score_before {
            self.platform.set_score_text(self.state.session.score);
        }
        self.platform
            .set_distance_text(self.state.session.distance_meters());

        if result.crashed.is_some() {
            self.enter_game_over();
        }
    }

    /// Start a new run. Only allowed from `GameOver`; returns whether it happened.
    pub fn restart(&mut self) -> bool {
        if !self.state.is_game_over() {
            log::debug!("Restart ignored while playing");
            return false;
        }

        self.state.reset(&self.tuning);
        self.apply_events();
        self.sync_scene();
        self.show_fresh_hud();

        log::info!("Run restarted");
        true
    }

    /// Mirror simulation events into the scene and sound
    fn apply_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Spawned(entity) => {
                    let handle = self.platform.create_entity(&EntityDesc::from(&entity));
                    self.handles.insert(entity.id, handle);
                }
                GameEvent::Despawned(id) => self.dispose(id),
                GameEvent::Collected(id) => {
                    self.dispose(id);
                    self.play(SoundEffect::Pickup);
                }
                GameEvent::Crashed(_) => {}
            }
        }
    }

    fn dispose(&mut self, id: EntityId) {
        match self.handles.remove(&id) {
            Some(handle) => self.platform.dispose_entity(handle),
            None => log::warn!("No render handle for {:?}", id),
        }
    }

    /// Push current positions and the camera to the scene
    fn sync_scene(&mut self) {
        let entities = self.state.obstacles.iter().chain(&self.state.collectibles);
        for entity in entities {
            if let Some(&handle) = self.handles.get(&entity.id) {
                self.platform.update_entity(handle, entity.pos, entity.scale);
            }
        }
        for tree in &self.state.forest.trees {
            if let Some(&handle) = self.handles.get(&tree.id) {
                self.platform.update_entity(handle, tree.pos, tree.scale);
            }
        }
        self.platform.set_camera_follow(self.state.camera.x);
    }

    fn play(&mut self, effect: SoundEffect) {
        if let Err(e) = self.platform.play(effect) {
            log::debug!("Sound {} skipped: {}", effect.as_str(), e);
        }
    }

    fn show_fresh_hud(&mut self) {
        self.platform.set_score_text(self.state.session.score);
        self.platform
            .set_distance_text(self.state.session.distance_meters());
        self.platform.hide_game_over_panel();
        if let Some(best) = self.best_run.load() {
            self.platform.set_best_run_text(best.score, best.distance);
        }
    }

    fn enter_game_over(&mut self) {
        let score = self.state.session.score;
        let distance = self.state.session.distance_meters();
        log::info!("Game over: {} collected, {} m", score, distance);

        let is_new_record = self.best_run.save(score, self.state.session.distance);
        if let Some(best) = self.best_run.load() {
            self.platform.set_best_run_text(best.score, best.distance);
        }

        self.play(SoundEffect::GameOver);
        if is_new_record {
            self.play(SoundEffect::NewRecord);
        }

        self.platform
            .show_game_over_panel(&game_over_summary(score, distance, is_new_record));

        if let Err(e) = self.platform.report_run(&RunReport { score, distance }) {
            log::warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_text() {
        assert_eq!(
            game_over_summary(4, 120, false),
            "Collected: 4 | Distance: 120 m"
        );
        assert_eq!(
            game_over_summary(9, 300, true),
            "Collected: 9 | Distance: 300 m\nNew record!"
        );
    }
}
