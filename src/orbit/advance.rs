//! Per-frame orbit update
//!
//! Advances the angle by elapsed time and detects wraparound.

use serde::Serialize;
use std::f64::consts::TAU;

use super::state::OrbitState;
use crate::wrap_angle;

/// Result of one `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Advance {
    /// Current angle in [0, 2π)
    pub wrapped: f64,
    /// True when this call crossed the 0 angle
    pub lap_incremented: bool,
    pub lap_count: u64,
}

/// Advance the orbit by `elapsed_secs` at `speed` revolutions per second.
///
/// Negative or NaN elapsed time counts as zero. While paused the state is
/// left alone and the last wrapped angle is returned as-is.
///
/// Laps are detected by the wrapped angle dropping below its previous
/// value, so at most one lap registers per call. A step longer than a
/// revolution undercounts; keep frame deltas small.
pub fn advance(state: &mut OrbitState, elapsed_secs: f64, speed: f64) -> Advance {
    if !state.is_running() {
        return Advance {
            wrapped: state.wrapped,
            lap_incremented: false,
            lap_count: state.laps,
        };
    }

    // `max` also maps NaN to 0
    let elapsed = elapsed_secs.max(0.0);
    state.angle += elapsed * speed * TAU;

    let wrapped = wrap_angle(state.angle);
    let lap_incremented = wrapped < state.wrapped;
    if lap_incremented {
        state.laps += 1;
    }
    state.wrapped = wrapped;

    Advance {
        wrapped,
        lap_incremented,
        lap_count: state.laps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn test_quarter_then_rest_of_lap() {
        let mut state = OrbitState::new();

        let out = advance(&mut state, 0.25, 1.0);
        assert!((out.wrapped - PI / 2.0).abs() < 1e-9);
        assert!(!out.lap_incremented);
        assert_eq!(out.lap_count, 0);

        let out = advance(&mut state, 0.75, 1.0);
        assert!(out.wrapped < 1e-9);
        assert!(out.lap_incremented);
        assert_eq!(out.lap_count, 1);
    }

    #[test]
    fn test_double_speed_laps_in_half_the_time() {
        let mut state = OrbitState::new();
        state.set_speed(2.0);

        let first = advance(&mut state, 0.25, 2.0);
        assert!((first.wrapped - PI).abs() < 1e-9);
        assert!(!first.lap_incremented);

        let second = advance(&mut state, 0.25, 2.0);
        assert!(second.lap_incremented);
        assert_eq!(second.lap_count, 1);
    }

    #[test]
    fn test_small_steps_count_every_lap() {
        let mut state = OrbitState::new();
        let dt = 1.0 / 64.0;
        let laps = 7;

        // Half a revolution past the last boundary absorbs rounding drift
        for _ in 0..(laps * 64 + 32) {
            advance(&mut state, dt, 1.0);
        }
        assert_eq!(state.laps(), laps as u64);
    }

    #[test]
    fn test_reset_then_zero_advance() {
        let mut state = OrbitState::new();
        for _ in 0..100 {
            advance(&mut state, 0.05, 1.3);
        }
        assert!(state.laps() > 0);

        state.reset();
        let out = advance(&mut state, 0.0, 2.0);
        assert_eq!(out.wrapped, 0.0);
        assert_eq!(out.lap_count, 0);
        assert!(!out.lap_incremented);
    }

    #[test]
    fn test_paused_advance_is_noop() {
        let mut state = OrbitState::new();
        advance(&mut state, 0.3, 1.0);
        let before = (state.wrapped(), state.laps(), state.angle());

        state.set_running(false);
        for _ in 0..50 {
            let out = advance(&mut state, 0.4, 1.0);
            assert_eq!(out.wrapped, before.0);
            assert_eq!(out.lap_count, before.1);
            assert!(!out.lap_incremented);
        }
        assert_eq!(state.angle(), before.2);
    }

    #[test]
    fn test_nudge_reconciled_by_next_advance() {
        let mut state = OrbitState::new();
        state.nudge(0.03);
        let out = advance(&mut state, 0.0, 1.0);
        assert!((out.wrapped - 0.03 * TAU).abs() < 1e-9);
        assert!((out.wrapped - 0.1885).abs() < 1e-4);
        assert!(!out.lap_incremented);
    }

    #[test]
    fn test_nudge_across_boundary_laps_on_next_advance() {
        let mut state = OrbitState::new();
        advance(&mut state, 0.99, 1.0);
        state.nudge(0.03);
        assert_eq!(state.laps(), 0);

        let out = advance(&mut state, 0.0, 1.0);
        assert!(out.lap_incremented);
        assert_eq!(out.lap_count, 1);
    }

    #[test]
    fn test_negative_and_nan_elapsed_clamped() {
        let mut state = OrbitState::new();
        advance(&mut state, 0.1, 1.0);
        let angle = state.angle();

        advance(&mut state, -5.0, 1.0);
        assert_eq!(state.angle(), angle);
        advance(&mut state, f64::NAN, 1.0);
        assert_eq!(state.angle(), angle);
    }

    #[test]
    fn test_large_step_undercounts() {
        let mut state = OrbitState::new();
        advance(&mut state, 0.5, 1.0);
        // Four boundaries crossed in one frame, one lap registered
        let out = advance(&mut state, 3.75, 1.0);
        assert!(out.wrapped < PI);
        assert!(out.lap_incremented);
        assert_eq!(out.lap_count, 1);
    }

    #[test]
    fn test_full_turn_in_one_step_from_zero_is_not_a_lap() {
        let mut state = OrbitState::new();
        state.set_speed(2.0);
        // Lands exactly on 2π, wraps to 0, and 0 is not below the previous 0
        let out = advance(&mut state, 0.5, 2.0);
        assert_eq!(out.wrapped, 0.0);
        assert!(!out.lap_incremented);
        assert_eq!(out.lap_count, 0);
    }

    #[test]
    fn test_reverse_direction_stays_in_range() {
        let mut state = OrbitState::new();
        let out = advance(&mut state, 0.25, -1.0);
        assert!((out.wrapped - 1.5 * PI).abs() < 1e-9);
        // Moving from 0 up to 3π/2 is not a drop, so no lap
        assert!(!out.lap_incremented);
    }

    proptest! {
        #[test]
        fn prop_wrapped_stays_in_range(
            steps in prop::collection::vec((0.0f64..2.0, -4.0f64..4.0), 1..200)
        ) {
            let mut state = OrbitState::new();
            for (dt, speed) in steps {
                let out = advance(&mut state, dt, speed);
                prop_assert!(out.wrapped >= 0.0 && out.wrapped < TAU);
                prop_assert_eq!(out.wrapped, state.wrapped());
            }
        }

        #[test]
        fn prop_at_most_one_lap_per_call(
            steps in prop::collection::vec((0.0f64..10.0, 0.0f64..5.0), 1..100)
        ) {
            let mut state = OrbitState::new();
            for (dt, speed) in steps {
                let before = state.laps();
                let out = advance(&mut state, dt, speed);
                prop_assert!(out.lap_count - before <= 1);
                prop_assert_eq!(out.lap_incremented, out.lap_count == before + 1);
            }
        }

        #[test]
        fn prop_paused_frames_change_nothing(
            warmup in 0.0f64..3.0,
            steps in prop::collection::vec(0.0f64..5.0, 1..50)
        ) {
            let mut state = OrbitState::new();
            advance(&mut state, warmup, 1.0);
            state.set_running(false);
            let (wrapped, laps) = (state.wrapped(), state.laps());
            for dt in steps {
                advance(&mut state, dt, 1.0);
            }
            prop_assert_eq!(state.wrapped(), wrapped);
            prop_assert_eq!(state.laps(), laps);
        }
    }
}
