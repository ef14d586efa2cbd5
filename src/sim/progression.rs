//! Distance and speed ramp

use super::state::SessionState;

/// Accumulate the distance covered this frame and ramp the speed.
///
/// `dz` is the scroll applied this frame (`speed * dt` at frame start).
/// Speed grows without a cap. Nothing changes once the run is over.
pub fn advance(session: &mut SessionState, dz: f32, dt: f32, acceleration: f32) {
    if session.is_game_over() {
        return;
    }
    session.distance += dz;
    session.speed += acceleration * dt;

    debug_assert!(session.speed >= 0.0, "speed went negative: {}", session.speed);
    session.speed = session.speed.max(0.0);
}

/// Count the scroll of the frame that ended the run. Speed stays frozen.
pub fn finish(session: &mut SessionState, dz: f32) {
    debug_assert!(session.is_game_over());
    session.distance += dz;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use proptest::prelude::*;

    #[test]
    fn test_one_second() {
        let mut session = SessionState::new(12.0);
        advance(&mut session, 12.0, 1.0, 0.3);
        assert_eq!(session.distance, 12.0);
        assert!((session.speed - 12.3).abs() < 1e-6);
    }

    #[test]
    fn test_frozen_after_game_over() {
        let mut session = SessionState::new(12.0);
        session.phase = GamePhase::GameOver;
        advance(&mut session, 5.0, 1.0, 0.3);
        assert_eq!(session.speed, 12.0);
        assert_eq!(session.distance, 0.0);
    }

    #[test]
    fn test_crash_frame_distance_counts_once() {
        let mut session = SessionState::new(12.0);
        advance(&mut session, 2.0, 0.1, 0.3);
        session.phase = GamePhase::GameOver;
        finish(&mut session, 1.5);
        assert_eq!(session.distance, 3.5);
        assert!((session.speed - 12.03).abs() < 1e-6);

        advance(&mut session, 5.0, 1.0, 0.3);
        assert_eq!(session.distance, 3.5);
    }

    proptest! {
        #[test]
        fn prop_distance_is_running_sum(dts in prop::collection::vec(0.0f32..0.1, 1..200)) {
            let mut session = SessionState::new(12.0);
            let mut expected = 0.0f64;
            let mut prev_distance = 0.0;
            let mut prev_speed = session.speed;
            for dt in dts {
                let dz = session.speed * dt;
                expected += dz as f64;
                advance(&mut session, dz, dt, 0.3);
                prop_assert!(session.distance >= prev_distance);
                prop_assert!(session.speed >= prev_speed);
                if dt > 1e-3 {
                    prop_assert!(session.speed > prev_speed);
                }
                prev_distance = session.distance;
                prev_speed = session.speed;
            }
            prop_assert!((session.distance as f64 - expected).abs() < 1e-2 * expected.max(1.0));
        }
    }
}
