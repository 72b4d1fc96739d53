//! Orbit state and the discrete commands that mutate it
//!
//! Frame updates go through `advance`; everything else (pause, speed,
//! reset, nudge) is a synchronous method here.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::consts::SPEED_INITIAL;

/// Whether elapsed time is being accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub(crate) enum OrbitPhase {
    /// Angle advances on every frame
    #[default]
    Running,
    /// Frames leave the angle untouched
    Paused,
}

/// The fish's position around the bowl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitState {
    /// Unbounded accumulated angle (radians)
    pub(super) angle: f64,
    /// Wrapped angle reported by the last update, in [0, 2π).
    /// The next update compares against it to detect wraparound.
    pub(super) wrapped: f64,
    /// Completed revolutions since start or last reset
    pub(super) laps: u64,
    /// Revolutions per second
    pub(super) speed: f64,
    pub(super) phase: OrbitPhase,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitState {
    pub fn new() -> Self {
        Self::with_speed(SPEED_INITIAL)
    }

    pub fn with_speed(speed: f64) -> Self {
        Self {
            angle: 0.0,
            wrapped: 0.0,
            laps: 0,
            speed,
            phase: OrbitPhase::Running,
        }
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Last reported wrapped angle, always in [0, 2π)
    #[inline]
    pub fn wrapped(&self) -> f64 {
        self.wrapped
    }

    #[inline]
    pub fn laps(&self) -> u64 {
        self.laps
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == OrbitPhase::Running
    }

    pub fn set_running(&mut self, running: bool) {
        self.phase = if running {
            OrbitPhase::Running
        } else {
            OrbitPhase::Paused
        };
    }

    /// Replace the speed factor; picked up by the next `advance`.
    /// Sign sets direction. No clamping here, the slider bounds it.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Back to angle 0 with no laps. Phase and speed are kept.
    pub fn reset(&mut self) {
        self.angle = 0.0;
        self.wrapped = 0.0;
        self.laps = 0;
    }

    /// One-shot forward boost of `fraction` revolutions.
    ///
    /// Only `angle` moves; the wrapped angle and lap count catch up on
    /// the next `advance`.
    pub fn nudge(&mut self, fraction: f64) {
        self.angle += fraction * TAU;
    }
}
