//! Synthetic state bus for the simulator.
//!
//! Every value is a slow sinusoid of the simulation clock so the HUD moves
//! without any real vehicle. Keyboard toggles pick units, status, limit-sign
//! style and the active alert.

use heapless::Vec;
use onroad_hud::config::{CAMERA_HEIGHT_M, MAX_LEAD_OBSERVATIONS, MS_TO_KPH, TRAJECTORY_SIZE};
use onroad_hud::state::{ADVISORY_TEXT_LEN, fit_str};
use onroad_hud::{
    AdvisoryOverlay, Alert, AlertSize, AlertStatus, LaneGeometry, LaneLine, LeadObservation, RoadEdge, RoadPoint,
    SpeedLimit, Status, Trajectory, UiSnapshot, VehicleDisplayState,
};

/// Status codes cycled by the `S` key; the last one is deliberately unknown.
const STATUS_CODES: [i32; 4] = [
    Status::Disengaged as i32,
    Status::Override as i32,
    Status::Engaged as i32,
    7,
];

const ALERTS: [(AlertSize, AlertStatus, &str, &str); 4] = [
    (AlertSize::None, AlertStatus::Normal, "", ""),
    (AlertSize::Small, AlertStatus::Normal, "Steering Temporarily Unavailable", ""),
    (AlertSize::Mid, AlertStatus::UserPrompt, "TAKE CONTROL", "Steering Override Required"),
    (
        AlertSize::Full,
        AlertStatus::Critical,
        "TAKE CONTROL IMMEDIATELY",
        "Lane departure detected while the steering limit was exceeded. Take over now.",
    ),
];

const LANE_WIDTH_M: f32 = 3.7;
const MAX_RANGE_M: f32 = 192.0;
const LIMIT_KPH: f32 = 100.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LimitStyle {
    #[default]
    None,
    Eu,
    Us,
    Both,
}

impl LimitStyle {
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Eu,
            Self::Eu => Self::Us,
            Self::Us => Self::Both,
            Self::Both => Self::None,
        }
    }
}

pub struct SimFeed {
    status_index: usize,
    alert_index: usize,
    pub is_metric: bool,
    pub limit: LimitStyle,
}

impl SimFeed {
    pub const fn new() -> Self {
        Self {
            status_index: 2,
            alert_index: 0,
            is_metric: true,
            limit: LimitStyle::None,
        }
    }

    /// Advance to the next status code and return it.
    pub fn cycle_status(&mut self) -> i32 {
        self.status_index = (self.status_index + 1) % STATUS_CODES.len();
        STATUS_CODES[self.status_index]
    }

    /// Advance to the next canned alert and return its title.
    pub fn cycle_alert(&mut self) -> &'static str {
        self.alert_index = (self.alert_index + 1) % ALERTS.len();
        let title = ALERTS[self.alert_index].2;
        if title.is_empty() { "<none>" } else { title }
    }

    pub fn snapshot(
        &self,
        t: f32,
    ) -> UiSnapshot {
        let status = STATUS_CODES[self.status_index];
        let cruising = Status::try_from_raw(status).is_ok_and(|s| s != Status::Disengaged);
        let curvature = fake_signal(t, -0.0015, 0.0015, 0.03);

        let (size, alert_status, text1, text2) = ALERTS[self.alert_index];

        let vehicle = VehicleDisplayState {
            speed_ms: Some(fake_signal(t, 15.0, 33.0, 0.08)),
            cruise_kph: cruising.then_some(110.0),
            speed_limit: self.speed_limit(),
            is_metric: self.is_metric,
            engageable: true,
            experimental_mode: (t * 0.02).sin() > 0.6,
            status,
            dm_active: (t * 0.05).sin() > 0.0,
            leads: leads(t, curvature),
            lanes: road(curvature),
            advisory: advisory(t),
            ..Default::default()
        };

        UiSnapshot {
            vehicle,
            alert: Alert::new(size, alert_status, text1, text2),
        }
    }

    fn speed_limit(&self) -> Option<SpeedLimit> {
        let (eu_sign, us_sign) = match self.limit {
            LimitStyle::None => return None,
            LimitStyle::Eu => (true, false),
            LimitStyle::Us => (false, true),
            LimitStyle::Both => (true, true),
        };
        Some(SpeedLimit {
            value_ms: LIMIT_KPH / MS_TO_KPH,
            eu_sign,
            us_sign,
        })
    }
}

impl Default for SimFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Sinusoid between `min` and `max`.
pub fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Lateral drift of the road at distance `x` for a curvature.
fn curve_y(
    curvature: f32,
    x: f32,
) -> f32 {
    curvature * x * x / 2.0
}

fn line(
    curvature: f32,
    offset: f32,
    z: f32,
) -> Trajectory {
    let mut points = Trajectory::new();
    for i in 0..TRAJECTORY_SIZE {
        let s = i as f32 / (TRAJECTORY_SIZE - 1) as f32;
        let x = MAX_RANGE_M * s * s;
        points.push(RoadPoint::new(x, offset + curve_y(curvature, x), z)).ok();
    }
    points
}

fn road(curvature: f32) -> LaneGeometry {
    let mut road = LaneGeometry::default();
    for (k, prob) in [(-1.5, 0.4), (-0.5, 0.9), (0.5, 0.9), (1.5, 0.4)] {
        road.lane_lines
            .push(LaneLine {
                points: line(curvature, k * LANE_WIDTH_M, CAMERA_HEIGHT_M),
                prob,
            })
            .ok();
    }
    for k in [-2.0, 2.0] {
        road.road_edges
            .push(RoadEdge {
                points: line(curvature, k * LANE_WIDTH_M, CAMERA_HEIGHT_M),
                std: 0.4,
            })
            .ok();
    }
    road.path = line(curvature, 0.0, 0.0);
    road
}

/// One car ahead in our lane, a second one in the left lane half the time.
fn leads(
    t: f32,
    curvature: f32,
) -> Vec<LeadObservation, MAX_LEAD_OBSERVATIONS> {
    let mut leads = Vec::new();

    let x0 = fake_signal(t, 15.0, 70.0, 0.1);
    let v0 = (t * 0.1).cos() * 3.0;
    // lead y is positive to the left, geometry y to the right
    leads.push(LeadObservation::new(0, x0, -curve_y(curvature, x0), v0)).ok();

    if (t * 0.07).sin() > 0.0 {
        let x1 = fake_signal(t, 30.0, 90.0, 0.06);
        leads
            .push(LeadObservation::new(1, x1, LANE_WIDTH_M - curve_y(curvature, x1), 1.0))
            .ok();
    }
    leads
}

fn advisory(t: f32) -> AdvisoryOverlay {
    if (t * 0.04).sin() < 0.7 {
        return AdvisoryOverlay::default();
    }
    AdvisoryOverlay {
        enabled: true,
        speed_text: fit_str::<ADVISORY_TEXT_LEN>("80"),
        ..Default::default()
    }
}
