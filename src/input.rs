//! Keyboard and swipe input
//!
//! Raw key names and pointer positions become discrete lane events. Events
//! may arrive at any time between ticks; the session only lets them touch
//! the target lane.

use crate::settings::Settings;

/// Discrete input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    LaneLeft,
    LaneRight,
    Restart,
}

impl InputEvent {
    /// Map a DOM-style key name
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(InputEvent::LaneLeft),
            "ArrowRight" | "d" | "D" => Some(InputEvent::LaneRight),
            "Enter" => Some(InputEvent::Restart),
            _ => None,
        }
    }

    /// Lane offset for lane events
    pub fn lane_delta(self) -> Option<i32> {
        match self {
            InputEvent::LaneLeft => Some(-1),
            InputEvent::LaneRight => Some(1),
            InputEvent::Restart => None,
        }
    }
}

/// Turns horizontal drags into lane events.
///
/// Each time the drag travels past the dead zone one event fires and the
/// anchor moves to the current position, so a long drag can step several
/// lanes but never fires continuously.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    anchor: Option<f32>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.max(0.0),
            anchor: None,
        }
    }

    /// Tracker using the player's dead-zone preference
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.swipe_threshold)
    }

    pub fn pointer_down(&mut self, x: f32) {
        self.anchor = Some(x);
    }

    pub fn pointer_up(&mut self) {
        self.anchor = None;
    }

    pub fn pointer_move(&mut self, x: f32) -> Option<InputEvent> {
        let anchor = self.anchor?;
        let delta = x - anchor;
        if delta.abs() <= self.threshold {
            return None;
        }
        self.anchor = Some(x);
        Some(if delta < 0.0 {
            InputEvent::LaneLeft
        } else {
            InputEvent::LaneRight
        })
    }
}
