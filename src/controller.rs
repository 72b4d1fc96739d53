//! Orbit controller
//!
//! Single owner of the orbit state. The view layer feeds it frame
//! timestamps and forwards button/slider/click events as method calls.

use serde::Serialize;

use crate::clock::FrameClock;
use crate::orbit::{Advance, OrbitState, Pose, advance};
use crate::settings::Settings;

/// Everything the view needs after one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub advance: Advance,
    pub pose: Pose,
}

/// Orbit state plus the frame clock that drives it
#[derive(Debug, Clone)]
pub struct OrbitController {
    state: OrbitState,
    clock: FrameClock,
    settings: Settings,
}

impl OrbitController {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: OrbitState::with_speed(settings.speed.initial),
            clock: FrameClock::new(),
            settings,
        }
    }

    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run one tick for a frame timestamp (ms).
    ///
    /// While paused the clock is not consulted and the pose stays put.
    pub fn frame(&mut self, timestamp_ms: f64) -> Frame {
        let elapsed = if self.state.is_running() {
            self.clock.elapsed_secs(timestamp_ms)
        } else {
            0.0
        };
        let speed = self.state.speed();
        let advance = advance(&mut self.state, elapsed, speed);

        Frame {
            advance,
            pose: Pose::on_path(&self.settings.geometry, advance.wrapped),
        }
    }

    /// Flip between running and paused. Returns the new running flag.
    pub fn toggle_running(&mut self) -> bool {
        let running = !self.state.is_running();
        self.set_running(running);
        running
    }

    pub fn set_running(&mut self, running: bool) {
        self.state.set_running(running);
        // Next frame measures from itself, not from before the pause
        self.clock.rebase();
        log::info!("Orbit {}", if running { "resumed" } else { "paused" });
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.state.set_speed(speed);
    }

    pub fn speed(&self) -> f64 {
        self.state.speed()
    }

    /// Slider readout for the current speed
    pub fn speed_label(&self) -> String {
        Settings::speed_label(self.state.speed())
    }

    /// Zero the angle and lap count. Returns the pose to draw immediately.
    pub fn reset(&mut self) -> Pose {
        self.state.reset();
        log::info!("Orbit reset");
        self.pose()
    }

    /// Click boost by the configured fraction of a revolution
    pub fn nudge(&mut self) {
        self.state.nudge(self.settings.nudge_fraction);
        log::debug!("Nudged to angle {:.3}", self.state.angle());
    }

    pub fn laps(&self) -> u64 {
        self.state.laps()
    }

    /// Pose for the last reported angle
    pub fn pose(&self) -> Pose {
        Pose::on_path(&self.settings.geometry, self.state.wrapped())
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
