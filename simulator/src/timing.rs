//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they live here rather than in the core crate.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Synthetic time advanced per frame, in signal units.
pub const SIGNAL_STEP: f32 = 0.05;

/// Every Nth frame publishes a snapshot, mimicking a 20 Hz state bus.
pub const SNAPSHOT_DIVIDER: u32 = 2;
