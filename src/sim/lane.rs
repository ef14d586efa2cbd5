//! Lane selection and lateral smoothing

use crate::lerp;

/// Tracks which lane the player is heading for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneController {
    target: usize,
    lane_count: usize,
}

impl LaneController {
    pub fn new(lane_count: usize, start: usize) -> Self {
        debug_assert!(lane_count > 0, "lane table must not be empty");
        let lane_count = lane_count.max(1);
        Self {
            target: start.min(lane_count - 1),
            lane_count,
        }
    }

    pub fn target_lane(&self) -> usize {
        self.target
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Move the target by `delta` lanes, clamped to the road
    pub fn set_target_lane(&mut self, delta: i32) {
        let max = self.lane_count as i64 - 1;
        let next = (self.target as i64 + delta as i64).clamp(0, max);
        self.target = next as usize;
    }

    /// Lateral offset of the target lane
    pub fn target_x(&self, lane_x: &[f32]) -> f32 {
        debug_assert!(self.target < lane_x.len(), "lane index out of range");
        lane_x
            .get(self.target)
            .or(lane_x.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// New lateral position after moving toward the target lane for `dt`
    pub fn advance(&self, x: f32, lane_x: &[f32], lane_speed: f32, dt: f32) -> f32 {
        step_toward(x, self.target_x(lane_x), lane_speed * dt)
    }
}

/// Move `current` toward `target` by at most `max_step`, landing exactly
/// on the target when it is within reach.
pub fn step_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let dx = target - current;
    if dx.abs() <= max_step {
        target
    } else {
        current + dx.signum() * max_step
    }
}

/// Camera x that trails the player with exponential smoothing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraFollow {
    pub x: f32,
}

impl CameraFollow {
    pub fn follow(&mut self, player_x: f32, factor: f32) -> f32 {
        self.x = lerp(self.x, player_x, factor);
        self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LANE_X;
    use proptest::prelude::*;

    #[test]
    fn test_clamps_at_edges() {
        let mut lane = LaneController::new(3, 0);
        lane.set_target_lane(-1);
        assert_eq!(lane.target_lane(), 0);
        lane.set_target_lane(1);
        lane.set_target_lane(1);
        assert_eq!(lane.target_lane(), 2);
        lane.set_target_lane(1);
        assert_eq!(lane.target_lane(), 2);
    }

    #[test]
    fn test_step_is_clamped_not_overshooting() {
        // 60 fps: 8 * 0.016 = 0.128 per frame
        let x = step_toward(0.0, 3.0, 8.0 * 0.016);
        assert!((x - 0.128).abs() < 1e-6);

        // 2 fps: a full step would pass the lane; it snaps instead
        assert_eq!(step_toward(2.9, 3.0, 8.0 * 0.5), 3.0);
        assert_eq!(step_toward(-2.9, -3.0, 8.0 * 0.5), -3.0);
    }

    #[test]
    fn test_reaches_lane_in_finite_frames() {
        let mut lane = LaneController::new(3, 1);
        lane.set_target_lane(-1);
        let mut x = 0.0;
        for _ in 0..30 {
            x = lane.advance(x, &LANE_X, 8.0, 1.0 / 60.0);
        }
        assert_eq!(x, -3.0);
    }

    #[test]
    fn test_camera_follow() {
        let mut camera = CameraFollow::default();
        assert!((camera.follow(3.0, 0.1) - 0.3).abs() < 1e-5);
        assert!((camera.follow(3.0, 0.1) - 0.57).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_target_never_exceeds_range(start in 0usize..3, deltas in prop::collection::vec(-3i32..=3, 0..20)) {
            let mut lane = LaneController::new(3, start);
            for d in deltas {
                lane.set_target_lane(d);
                prop_assert!(lane.target_lane() < 3);
            }
        }

        #[test]
        fn prop_right_from_zero_reaches_last(count in 2usize..8) {
            let mut lane = LaneController::new(count, 0);
            for _ in 0..count - 1 {
                lane.set_target_lane(1);
            }
            prop_assert_eq!(lane.target_lane(), count - 1);
            lane.set_target_lane(1);
            prop_assert_eq!(lane.target_lane(), count - 1);
        }

        #[test]
        fn prop_snaps_when_within_reach(x in -3.0f32..3.0, target in -3.0f32..3.0, dt in 0.0f32..2.0) {
            let step = 8.0 * dt;
            let next = step_toward(x, target, step);
            if (target - x).abs() <= step {
                prop_assert_eq!(next, target);
            } else {
                // Never passes the target
                prop_assert!((target - next).abs() <= (target - x).abs());
                prop_assert!((target - next) * (target - x) >= -1e-6);
            }
        }
    }
}
