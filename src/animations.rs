//! Time-driven animation state for the onroad view.
//!
//! Nothing here depends on snapshots. Values evolve with the wall-clock time
//! passed to each paint:
//! - **Frame-rate estimate**: a first-order low-pass over observed paint
//!   intervals. Used for the scanner trail and the slow-frame warning only.
//! - **Scanner**: a band sweeping across the bottom of the view and back.
//!
//! # Scanner Phase
//!
//! The phase is a pure function of elapsed time since the renderer started:
//! ```text
//! phase    = fract(elapsed / SCANNER_PERIOD_S)
//! position = phase < 0.5 ? 2 * phase : 2 - 2 * phase
//! ```
//! A delayed paint therefore lands exactly where the sweep should be, rather
//! than where a frame counter would have left it.

use core::time::Duration;

use heapless::Vec;
use log::warn;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::{
    FPS_FILTER_RC, SCANNER_MAX_TRAIL, SCANNER_PERIOD_S, SLOW_FPS_THRESHOLD, SLOW_FPS_WARN_INTERVAL_S, UI_FREQ,
};

// =============================================================================
// First-Order Filter
// =============================================================================

/// Exponential low-pass filter with a fixed time constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FirstOrderFilter {
    x: f32,
    k: f32,
}

impl FirstOrderFilter {
    /// Filter starting at `x0` with time constant `rc` sampled every `dt` seconds.
    pub fn new(
        x0: f32,
        rc: f32,
        dt: f32,
    ) -> Self {
        Self {
            x: x0,
            k: dt / (rc + dt),
        }
    }

    /// Feed one sample. Non-finite samples are ignored.
    pub fn update(
        &mut self,
        sample: f32,
    ) -> f32 {
        if sample.is_finite() {
            self.x = (1.0 - self.k).mul_add(self.x, self.k * sample);
        }
        self.x
    }

    #[inline]
    pub const fn x(&self) -> f32 {
        self.x
    }

    pub const fn reset(
        &mut self,
        x0: f32,
    ) {
        self.x = x0;
    }
}

// =============================================================================
// Scanner
// =============================================================================

/// Scanner positions for one frame, as fractions of the sweep width (0..1).
#[derive(Clone, Debug, PartialEq)]
pub struct ScannerFrame {
    pub head: f32,
    /// Previous head positions, newest first.
    pub trail: Vec<f32, SCANNER_MAX_TRAIL>,
}

/// Cyclic scanner phase (0..1) for the elapsed time.
pub fn scanner_phase(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / SCANNER_PERIOD_S).fract()
}

/// Ping-pong position across the sweep for a phase.
pub fn sweep_position(phase: f32) -> f32 {
    if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 }
}

/// Number of trail segments for a frame rate.
///
/// Faster frames move the head less per paint, so more segments are needed to
/// cover the same stretch of the sweep.
pub fn trail_length(fps: f32) -> usize {
    if !fps.is_finite() {
        return 1;
    }
    let len = (fps / UI_FREQ * SCANNER_MAX_TRAIL as f32).round();
    (len.max(1.0) as usize).min(SCANNER_MAX_TRAIL)
}

// =============================================================================
// Animation State
// =============================================================================

/// Wall-clock driven values owned by the renderer.
#[derive(Clone, Debug)]
pub struct AnimationState {
    start: Option<Duration>,
    last_paint: Option<Duration>,
    fps: FirstOrderFilter,
    last_slow_warning: Option<Duration>,
    slow_warnings: u32,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            start: None,
            last_paint: None,
            fps: FirstOrderFilter::new(UI_FREQ, FPS_FILTER_RC, 1.0 / UI_FREQ),
            last_slow_warning: None,
            slow_warnings: 0,
        }
    }

    /// Record a paint at `now` and return the time elapsed since the first one.
    ///
    /// The first call after construction or [`reset`](Self::reset) defines
    /// time zero.
    pub fn tick(
        &mut self,
        now: Duration,
    ) -> Duration {
        let start = *self.start.get_or_insert(now);

        if let Some(dt) = self.last_paint.and_then(|last| now.checked_sub(last)) {
            let dt_s = dt.as_secs_f32();
            if dt_s > 0.0 {
                self.fps.update(1.0 / dt_s);
            }
        }
        self.last_paint = Some(now);
        self.check_slow_frames(now);

        now.saturating_sub(start)
    }

    fn check_slow_frames(
        &mut self,
        now: Duration,
    ) {
        let fps = self.fps.x();
        if fps >= SLOW_FPS_THRESHOLD {
            return;
        }
        let due = self
            .last_slow_warning
            .is_none_or(|last| now.saturating_sub(last).as_secs_f32() >= SLOW_FPS_WARN_INTERVAL_S);
        if due {
            warn!("slow onroad paint rate: {fps:.1} fps");
            self.last_slow_warning = Some(now);
            self.slow_warnings += 1;
        }
    }

    /// Filtered paint rate (Hz).
    #[inline]
    pub const fn fps(&self) -> f32 {
        self.fps.x()
    }

    /// Number of slow-frame warnings logged since the last reset.
    #[inline]
    pub const fn slow_warning_count(&self) -> u32 {
        self.slow_warnings
    }

    /// Scanner head and trail positions at `elapsed`.
    pub fn scanner(
        &self,
        elapsed: Duration,
    ) -> ScannerFrame {
        let head = sweep_position(scanner_phase(elapsed));
        let step = 1.0 / self.fps.x().max(1.0);

        let mut trail = Vec::new();
        for k in 1..=trail_length(self.fps.x()) {
            let back = Duration::from_secs_f32(step * k as f32);
            let Some(then) = elapsed.checked_sub(back) else {
                break;
            };
            trail.push(sweep_position(scanner_phase(then))).ok();
        }

        ScannerFrame { head, trail }
    }

    /// Forget all timing. The next paint starts a new session.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
