//! Reasons an individual overlay element is dropped from a frame.
//!
//! None of these are fatal. Derivation code returns them so the caller can log
//! the reason and omit the one affected element; the rest of the frame is drawn
//! normally.

use thiserror::Error;

/// Why a single derived element was degraded.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DegradeReason {
    #[error("unknown status code {0}")]
    UnknownStatus(i32),

    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),

    #[error("point {0:.1} m ahead is behind the camera plane")]
    BehindCamera(f32),

    #[error("projection lands outside the surface")]
    OffSurface,

    #[error("lead {0} is not a valid track")]
    InvalidLead(u8),

    #[error("marker capacity reached")]
    Capacity,
}
