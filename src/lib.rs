//! Fish Orbit - a fish circling a bowl
//!
//! Core modules:
//! - `orbit`: Angle accumulation, lap detection, pose mapping (pure)
//! - `clock`: Frame timestamp to elapsed-time conversion
//! - `controller`: Owns orbit state and exposes the view-layer commands
//! - `settings`: Bowl geometry, speed range, pulse tuning
//! - `session`: Headless simulated run for native builds
//! - `error`: Startup wiring failures

pub mod clock;
pub mod controller;
pub mod error;
pub mod orbit;
pub mod session;
pub mod settings;

pub use controller::{Frame, OrbitController};
pub use error::WiringError;
pub use settings::{BowlGeometry, Settings};

use glam::DVec2;
use std::f64::consts::TAU;

/// Widget configuration constants
pub mod consts {
    /// Default swim path circle (SVG units), used when the path lacks attributes
    pub const DEFAULT_CENTER_X: f64 = 300.0;
    pub const DEFAULT_CENTER_Y: f64 = 290.0;
    pub const DEFAULT_RADIUS: f64 = 135.0;

    /// Speed slider bounds (revolutions per second)
    pub const SPEED_MIN: f64 = 0.2;
    pub const SPEED_MAX: f64 = 3.0;
    pub const SPEED_STEP: f64 = 0.1;
    pub const SPEED_INITIAL: f64 = 1.0;

    /// Forward boost applied when the fish is clicked (revolutions)
    pub const NUDGE_FRACTION: f64 = 0.03;

    /// Header celebration on each lap
    pub const LAP_PULSE_SCALE: f64 = 1.02;
    pub const LAP_PULSE_MS: f64 = 250.0;

    /// Fish bounce when clicked
    pub const CLICK_PULSE_SCALE: f64 = 1.12;
    pub const CLICK_PULSE_MS: f64 = 160.0;
}

/// DOM element ids the view layer binds to
pub mod ids {
    pub const BOWL: &str = "bowl";
    pub const SWIM_PATH: &str = "swimPath";
    pub const FISH: &str = "fishGroup";
    pub const LAP_COUNT: &str = "lapCount";
    pub const PLAY_PAUSE: &str = "playPause";
    pub const SPEED: &str = "speed";
    pub const SPEED_VALUE: &str = "speedVal";
    pub const RESET: &str = "reset";
    /// Selector, not an id; the header is optional
    pub const HEADER_SELECTOR: &str = ".site-header";
}

/// Reduce an angle to [0, 2π)
///
/// The second `%` folds the `-tiny + TAU == TAU` rounding case back to 0.
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    ((angle % TAU) + TAU) % TAU
}

/// Convert polar (r, theta) to cartesian (x, y) around `center`
#[inline]
pub fn polar_to_cartesian(center: DVec2, r: f64, theta: f64) -> DVec2 {
    center + DVec2::new(r * theta.cos(), r * theta.sin())
}
