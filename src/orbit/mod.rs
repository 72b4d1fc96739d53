//! Orbit simulation module
//!
//! The only real logic in the widget lives here. Pure and deterministic:
//! - No clocks; callers hand in elapsed seconds
//! - No DOM or platform dependencies
//! - All state in `OrbitState`, owned by the caller

pub mod advance;
pub mod pose;
pub mod state;

pub use advance::{Advance, advance};
pub use pose::Pose;
pub use state::OrbitState;
