//! Frame clock
//!
//! Converts absolute frame timestamps (ms, as handed to animation frame
//! callbacks) into elapsed seconds for `advance`.

/// Elapsed-time baseline for the frame loop
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous timestamp.
    ///
    /// The first timestamp after creation or `rebase` only sets the
    /// baseline and reports 0. Timestamps running backwards report 0.
    pub fn elapsed_secs(&mut self, now_ms: f64) -> f64 {
        let last = self.last_ms.unwrap_or(now_ms);
        self.last_ms = Some(now_ms);
        ((now_ms - last) / 1000.0).max(0.0)
    }

    /// Forget the baseline so a pause gap is not counted on resume
    pub fn rebase(&mut self) {
        self.last_ms = None;
    }
}
