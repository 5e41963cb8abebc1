//! Derived display properties.
//!
//! Raw snapshots are turned into a plain owned bundle of everything paint
//! needs: formatted strings, resolved colors, icon placement, projected
//! polygons and marker positions. The bundle is rebuilt wholesale on every
//! update and only read during paint, so a paint can never observe a
//! half-updated frame.
//!
//! Derivation is total. Missing fields suppress their element; malformed
//! values degrade only the element they feed.

pub mod hud;
pub mod lanes;
pub mod leads;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;

use crate::config::MAX_LEADS;
use crate::projection::Projection;
use crate::state::VehicleDisplayState;
use crate::status::Status;

pub use hud::{AdvisoryBadge, DmIcon, EngageIcon, HudProperties, SignStyle, SpeedLimitSign, SpeedMemory, SpeedText};
pub use lanes::{LaneOverlay, LaneStrip, PathStrip};
pub use leads::LeadMarker;

/// Everything paint reads for one frame.
#[derive(Clone, PartialEq, Debug)]
pub struct DerivedDisplayProperties {
    pub status: Status,
    pub hud: HudProperties,
    pub leads: Vec<LeadMarker, MAX_LEADS>,
    pub lanes: LaneOverlay,
}

impl DerivedDisplayProperties {
    /// Derive the full bundle for a surface of `area` pixels.
    ///
    /// `speed` carries the session's speed memory; it is the only state
    /// that survives between snapshots.
    pub fn derive(
        state: &VehicleDisplayState,
        speed: &mut SpeedMemory,
        area: Size,
    ) -> Self {
        let status = Status::from_raw(state.status);
        let projection = Projection::for_size(area);

        let hud = hud::derive_hud(state, speed, status, area);
        let leads = leads::derive_leads(&state.leads, &projection, area);
        let lanes = lanes::derive_lanes(
            &state.lanes,
            leads::first_lead_distance(&leads),
            state.experimental_mode,
            &projection,
        );

        Self {
            status,
            hud,
            leads,
            lanes,
        }
    }

    /// Status background color (border, engage disc, scanner).
    #[inline]
    pub const fn status_color(&self) -> Rgb565 {
        self.status.color()
    }

    /// Whether the lock-on connector joins two markers.
    #[inline]
    pub fn has_connector(&self) -> bool {
        self.leads.len() == MAX_LEADS
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KM_TO_MILE, MS_TO_MPH, SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::state::{LeadObservation, SpeedLimit};
    use crate::testing::straight_road;

    const AREA: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    fn highway_state() -> VehicleDisplayState {
        let mut state = VehicleDisplayState {
            speed_ms: Some(65.0 / MS_TO_MPH),
            cruise_kph: Some(70.0 / KM_TO_MILE),
            is_metric: false,
            engageable: true,
            status: Status::Engaged as i32,
            lanes: straight_road(),
            ..Default::default()
        };
        state.leads.push(LeadObservation::new(0, 35.0, 0.2, -1.0)).unwrap();
        state
    }

    #[test]
    fn test_highway_scenario() {
        let mut memory = SpeedMemory::default();
        let derived = DerivedDisplayProperties::derive(&highway_state(), &mut memory, AREA);

        assert_eq!(derived.hud.speed.as_deref(), Some("65"));
        assert_eq!(derived.hud.speed_unit, "mph");
        assert_eq!(derived.hud.set_speed.as_deref(), Some("70"));
        assert!(derived.hud.sign.is_none());
        assert_eq!(derived.status_color(), Status::Engaged.color());
        assert_eq!(derived.leads.len(), 1);
        assert!(!derived.has_connector());
        assert!(!derived.lanes.is_empty());
    }

    #[test]
    fn test_invalid_status_fails_closed_and_nothing_else_changes() {
        let mut memory = SpeedMemory::default();
        let good = DerivedDisplayProperties::derive(&highway_state(), &mut memory, AREA);

        let mut bad_state = highway_state();
        bad_state.status = 42;
        let mut memory = SpeedMemory::default();
        let bad = DerivedDisplayProperties::derive(&bad_state, &mut memory, AREA);

        assert_eq!(bad.status, Status::Disengaged);
        assert_eq!(bad.status_color(), Status::Disengaged.color());
        assert_eq!(bad.hud.engage.map(|e| e.disc), Some(Status::Disengaged.color()));

        assert_eq!(bad.hud.speed, good.hud.speed);
        assert_eq!(bad.hud.set_speed, good.hud.set_speed);
        assert_eq!(bad.hud.sign, good.hud.sign);
        assert_eq!(bad.leads, good.leads);
        assert_eq!(bad.lanes, good.lanes);
    }

    #[test]
    fn test_two_leads_connector() {
        let mut state = highway_state();
        state.leads.push(LeadObservation::new(1, 60.0, -3.0, 0.0)).unwrap();
        let derived = DerivedDisplayProperties::derive(&state, &mut SpeedMemory::default(), AREA);
        assert_eq!(derived.leads.len(), 2);
        assert!(derived.has_connector());
    }

    #[test]
    fn test_close_lead_still_drawn() {
        let mut state = highway_state();
        state.leads.clear();
        state.leads.push(LeadObservation::new(0, 1.5, 0.0, -2.0)).unwrap();
        let derived = DerivedDisplayProperties::derive(&state, &mut SpeedMemory::default(), AREA);
        assert_eq!(derived.leads.len(), 1, "a lead at 1.5 m is pinned, not dropped");
        assert_eq!(derived.leads[0].distance_m, 1.5);
    }

    #[test]
    fn test_undrawn_lead_does_not_cut_path() {
        let mut clear_road = highway_state();
        clear_road.leads.clear();
        let mut bad_lead = clear_road.clone();
        bad_lead.leads.push(LeadObservation::new(0, 8.0, f32::NAN, 0.0)).unwrap();

        let expected = DerivedDisplayProperties::derive(&clear_road, &mut SpeedMemory::default(), AREA);
        let derived = DerivedDisplayProperties::derive(&bad_lead, &mut SpeedMemory::default(), AREA);
        assert!(derived.leads.is_empty());
        assert_eq!(derived.lanes, expected.lanes, "path length ignores leads that are not drawn");
    }

    #[test]
    fn test_derive_is_idempotent() {
        let state = highway_state();
        let mut memory = SpeedMemory::default();
        let first = DerivedDisplayProperties::derive(&state, &mut memory, AREA);
        let second = DerivedDisplayProperties::derive(&state, &mut memory, AREA);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sparse_state_draws_little() {
        let derived =
            DerivedDisplayProperties::derive(&VehicleDisplayState::default(), &mut SpeedMemory::default(), AREA);
        assert!(derived.hud.speed.is_none(), "speed not seen yet");
        assert!(derived.hud.set_speed.is_none());
        assert!(derived.hud.sign.is_none());
        assert!(derived.hud.engage.is_none());
        assert!(derived.hud.advisory.is_none());
        assert!(derived.leads.is_empty());
        assert!(derived.lanes.is_empty());
    }

    #[test]
    fn test_us_sign_with_imperial_units() {
        let mut state = highway_state();
        state.speed_limit = Some(SpeedLimit {
            value_ms: 55.0 / MS_TO_MPH,
            eu_sign: false,
            us_sign: true,
        });
        let derived = DerivedDisplayProperties::derive(&state, &mut SpeedMemory::default(), AREA);
        let sign = derived.hud.sign.unwrap();
        assert_eq!(sign.style, SignStyle::Us);
        assert_eq!(sign.text.as_str(), "55");
    }
}
