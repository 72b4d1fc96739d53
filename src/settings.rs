//! Widget settings
//!
//! Built from defaults plus whatever the page markup declares. Nothing is
//! persisted between sessions.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The circle the fish swims along (SVG units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BowlGeometry {
    pub center: DVec2,
    pub radius: f64,
}

impl Default for BowlGeometry {
    fn default() -> Self {
        Self {
            center: DVec2::new(DEFAULT_CENTER_X, DEFAULT_CENTER_Y),
            radius: DEFAULT_RADIUS,
        }
    }
}

impl BowlGeometry {
    /// Geometry from the swim path's `cx`, `cy` and `r` attributes.
    ///
    /// Each value falls back to its default when absent, unparseable or 0.
    pub fn from_attributes(cx: Option<&str>, cy: Option<&str>, r: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            center: DVec2::new(
                attr_or(cx, defaults.center.x),
                attr_or(cy, defaults.center.y),
            ),
            radius: attr_or(r, defaults.radius),
        }
    }
}

fn attr_or(raw: Option<&str>, default: f64) -> f64 {
    match raw.and_then(parse_leading_f64) {
        Some(v) if v != 0.0 => v,
        _ => default,
    }
}

/// Parse the longest numeric prefix of `s`, so `"135px"` reads as 135.
pub fn parse_leading_f64(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .last()
        .map(|(i, c)| i + c.len_utf8())?;

    (1..=end)
        .rev()
        .find_map(|len| s[..len].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Bounds of the speed slider (revolutions per second)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min: SPEED_MIN,
            max: SPEED_MAX,
            step: SPEED_STEP,
            initial: SPEED_INITIAL,
        }
    }
}

impl SpeedRange {
    /// Override bounds and step from the slider's `min`, `max` and `step`
    /// attributes. Absent or unparseable values keep the current ones; a
    /// reversed pair is swapped so `min <= max` always holds.
    pub fn with_attributes(self, min: Option<&str>, max: Option<&str>, step: Option<&str>) -> Self {
        let mut range = Self {
            min: min.and_then(parse_leading_f64).unwrap_or(self.min),
            max: max.and_then(parse_leading_f64).unwrap_or(self.max),
            step: step
                .and_then(parse_leading_f64)
                .filter(|s| *s > 0.0)
                .unwrap_or(self.step),
            initial: self.initial,
        };
        if range.min > range.max {
            log::warn!(
                "Speed slider min {} above max {}, swapping",
                range.min,
                range.max
            );
            std::mem::swap(&mut range.min, &mut range.max);
        }
        range
    }

    /// Clamp a slider value into range. Non-finite input is rejected.
    pub fn clamp(&self, value: f64) -> Option<f64> {
        // max/min rather than f64::clamp, which panics on a reversed range
        value.is_finite().then(|| value.max(self.min).min(self.max))
    }

    /// Clamp, then round to the nearest step above `min`
    pub fn snap(&self, value: f64) -> Option<f64> {
        let clamped = self.clamp(value)?;
        if self.step.is_nan() || self.step <= 0.0 {
            return Some(clamped);
        }
        let steps = ((clamped - self.min) / self.step).round();
        Some((self.min + steps * self.step).max(self.min).min(self.max))
    }
}

/// A short scale animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub peak_scale: f64,
    pub duration_ms: f64,
}

/// Widget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub geometry: BowlGeometry,
    pub speed: SpeedRange,
    /// Revolutions added when the fish is clicked
    pub nudge_fraction: f64,
    /// Header pulse played on each lap
    pub lap_pulse: Pulse,
    /// Fish pulse played when clicked
    pub click_pulse: Pulse,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geometry: BowlGeometry::default(),
            speed: SpeedRange::default(),
            nudge_fraction: NUDGE_FRACTION,
            lap_pulse: Pulse {
                peak_scale: LAP_PULSE_SCALE,
                duration_ms: LAP_PULSE_MS,
            },
            click_pulse: Pulse {
                peak_scale: CLICK_PULSE_SCALE,
                duration_ms: CLICK_PULSE_MS,
            },
        }
    }
}

impl Settings {
    /// Speed readout shown next to the slider, e.g. `1.5x`
    pub fn speed_label(speed: f64) -> String {
        format!("{:.1}x", speed)
    }
}
