//! Inbound state snapshots.
//!
//! A [`UiSnapshot`] is one immutable bundle delivered by the state bus: the
//! vehicle/perception part ([`VehicleDisplayState`]) and the active [`Alert`].
//! Every optional quantity is an `Option` or carries an explicit validity flag;
//! nothing downstream may assume a field is populated.
//!
//! # Coordinate Frame
//!
//! Model geometry ([`RoadPoint`]) uses the calibrated camera frame: `x` forward,
//! `y` to the right, `z` down, in meters. Lead observations use the radar
//! convention instead (`y_rel` positive to the left), matching the bus.
//!
//! All containers are fixed-capacity `heapless` types so a snapshot can be
//! copied around without an allocator.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{String, Vec};

use crate::colors::WHITE;
use crate::config::{LANE_LINE_COUNT, LEAD_MIN_PROB, MAX_LEAD_OBSERVATIONS, ROAD_EDGE_COUNT, TRAJECTORY_SIZE};

/// Maximum characters per alert text line.
pub const ALERT_TEXT_LEN: usize = 64;

/// Maximum characters of the advisory speed text.
pub const ADVISORY_TEXT_LEN: usize = 8;

/// Copy `text` into a fixed-capacity string, truncating at capacity.
pub fn fit_str<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

// =============================================================================
// Vehicle State
// =============================================================================

/// Which side of the dashboard the driver sits on.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DashboardHand {
    #[default]
    Left,
    Right,
}

/// Posted speed limit from navigation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SpeedLimit {
    /// Limit in m/s.
    pub value_ms: f32,
    /// Vienna convention (round red-ringed sign).
    pub eu_sign: bool,
    /// MUTCD convention (rectangular "SPEED LIMIT" sign).
    pub us_sign: bool,
}

/// One tracked vehicle ahead.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LeadObservation {
    /// Track identifier shown in the lock-on label.
    pub index: u8,
    /// Distance ahead of the camera (m).
    pub x_rel: f32,
    /// Lateral offset, positive to the left (m).
    pub y_rel: f32,
    /// Relative speed, negative when closing (m/s).
    pub v_rel: f32,
    /// Model confidence (0..1).
    pub prob: f32,
    /// Producer-side validity flag.
    pub valid: bool,
}

impl LeadObservation {
    /// A confident, valid track.
    pub const fn new(
        index: u8,
        x_rel: f32,
        y_rel: f32,
        v_rel: f32,
    ) -> Self {
        Self {
            index,
            x_rel,
            y_rel,
            v_rel,
            prob: 1.0,
            valid: true,
        }
    }

    /// Whether this observation should be drawn at all.
    #[inline]
    pub fn is_track(&self) -> bool {
        self.valid && self.prob > LEAD_MIN_PROB
    }
}

/// A point of model geometry in the calibrated frame (m).
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct RoadPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RoadPoint {
    pub const fn new(
        x: f32,
        y: f32,
        z: f32,
    ) -> Self {
        Self { x, y, z }
    }
}

/// Sampled model trajectory, nearest point first.
pub type Trajectory = Vec<RoadPoint, TRAJECTORY_SIZE>;

/// Painted lane line with detection probability.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LaneLine {
    pub points: Trajectory,
    pub prob: f32,
}

/// Road edge with position uncertainty.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct RoadEdge {
    pub points: Trajectory,
    pub std: f32,
}

/// All lane/path geometry for one frame.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LaneGeometry {
    pub lane_lines: Vec<LaneLine, LANE_LINE_COUNT>,
    pub road_edges: Vec<RoadEdge, ROAD_EDGE_COUNT>,
    pub path: Trajectory,
}

impl LaneGeometry {
    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
            && self.lane_lines.iter().all(|l| l.points.is_empty())
            && self.road_edges.iter().all(|e| e.points.is_empty())
    }
}

/// Vision-derived advisory speed badge.
#[derive(Clone, PartialEq, Debug)]
pub struct AdvisoryOverlay {
    pub enabled: bool,
    /// Pre-formatted advisory speed.
    pub speed_text: String<ADVISORY_TEXT_LEN>,
    pub color: Rgb565,
}

impl Default for AdvisoryOverlay {
    fn default() -> Self {
        Self {
            enabled: false,
            speed_text: String::new(),
            color: WHITE,
        }
    }
}

/// Vehicle and perception state for one update.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct VehicleDisplayState {
    /// Ego speed (m/s); `None` when no valid reading.
    pub speed_ms: Option<f32>,
    /// Cruise set speed (km/h); `None`, non-positive or 255 when unset.
    pub cruise_kph: Option<f32>,
    pub speed_limit: Option<SpeedLimit>,
    pub is_metric: bool,
    pub engageable: bool,
    pub experimental_mode: bool,
    /// Raw status code from the bus (see [`crate::status::Status`]).
    pub status: i32,
    pub dm_active: bool,
    /// Suppress the driver-monitoring icon entirely.
    pub dm_hidden: bool,
    pub hand: DashboardHand,
    pub leads: Vec<LeadObservation, MAX_LEAD_OBSERVATIONS>,
    pub lanes: LaneGeometry,
    pub advisory: AdvisoryOverlay,
}

// =============================================================================
// Alerts
// =============================================================================

/// How much of the screen an alert claims.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AlertSize {
    /// No alert; the banner is transparent.
    #[default]
    None,
    Small,
    Mid,
    Full,
}

/// Alert urgency, selects the banner palette.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AlertStatus {
    #[default]
    Normal,
    UserPrompt,
    Critical,
}

/// An alert as published by the controls process.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Alert {
    pub size: AlertSize,
    pub status: AlertStatus,
    pub text1: String<ALERT_TEXT_LEN>,
    pub text2: String<ALERT_TEXT_LEN>,
}

impl Alert {
    /// The "no active alert" sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    /// Build an alert, truncating text that exceeds [`ALERT_TEXT_LEN`].
    pub fn new(
        size: AlertSize,
        status: AlertStatus,
        text1: &str,
        text2: &str,
    ) -> Self {
        Self {
            size,
            status,
            text1: fit_str(text1),
            text2: fit_str(text2),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.size == AlertSize::None
    }
}

/// One delivery from the state bus.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct UiSnapshot {
    pub vehicle: VehicleDisplayState,
    pub alert: Alert,
}

// =============================================================================
// Unit Tests
// =============================================================================
