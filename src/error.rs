//! Startup wiring errors
//!
//! The page must provide every required element before the first frame.
//! Anything missing is fatal; nothing is tolerated mid-animation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WiringError>;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("missing required element #{0}")]
    MissingElement(&'static str),

    #[error("element #{id} is not a {expected}")]
    WrongElementType {
        id: &'static str,
        expected: &'static str,
    },
}
