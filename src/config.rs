//! Layout, timing and unit constants.
//!
//! # Pre-computed Layout Constants
//!
//! The reference design targets a 2160x1080 panel. This build renders at a
//! quarter of that resolution scaled by [`UI_SCALE`], and every reference
//! dimension is converted with [`scaled`] at compile time so the paint path
//! never recomputes fixed geometry.

// =============================================================================
// Display Configuration
// =============================================================================

/// Full surface width in pixels.
pub const SCREEN_WIDTH: u32 = 648;

/// Full surface height in pixels.
pub const SCREEN_HEIGHT: u32 = 324;

/// Scale factor from the 2160x1080 reference layout to this surface.
pub const UI_SCALE: f32 = 0.3;

/// Convert a reference-layout dimension to surface pixels.
pub const fn scaled(reference_px: u32) -> u32 {
    (reference_px * 3) / 10
}

/// Width of the status-colored frame around the onroad view.
pub const BORDER_SIZE: u32 = scaled(30);

/// Fraction of the content width reserved for the map panel when visible.
pub const MAP_PANEL_FRACTION_NUM: u32 = 1;
pub const MAP_PANEL_FRACTION_DEN: u32 = 2;

// =============================================================================
// HUD Geometry (reference px, scaled)
// =============================================================================

/// Diameter of round HUD icons (engage, driver monitoring).
pub const ICON_SIZE: u32 = scaled(192);

/// Icon glyph size inside the round backdrop.
pub const ICON_IMG_SIZE: u32 = ICON_SIZE * 3 / 4;

/// Distance of HUD elements from the surface edge.
pub const HUD_MARGIN: u32 = BORDER_SIZE;

/// Footer band height, used to place the driver-monitoring icon.
pub const FOOTER_HEIGHT: u32 = scaled(280);

/// Left margin of the set-speed box.
pub const SET_SPEED_BOX_X: u32 = scaled(60);

/// Top margin of the set-speed box.
pub const SET_SPEED_BOX_Y: u32 = scaled(45);

/// Set-speed box widths: default, metric/EU, US sign with three digits.
pub const SET_SPEED_BOX_WIDTH: u32 = scaled(172);
pub const SET_SPEED_BOX_WIDTH_WIDE: u32 = scaled(200);
pub const SET_SPEED_BOX_WIDTH_US_3DIGIT: u32 = scaled(223);

/// Set-speed box heights: no sign, EU sign, US sign.
pub const SET_SPEED_BOX_HEIGHT: u32 = scaled(204);
pub const SET_SPEED_BOX_HEIGHT_EU: u32 = scaled(392);
pub const SET_SPEED_BOX_HEIGHT_US: u32 = scaled(402);

/// Baseline of the current speed digits, from the surface top.
pub const SPEED_TEXT_Y: i32 = scaled(210) as i32;

/// Baseline of the speed unit label, from the surface top.
pub const SPEED_UNIT_Y: i32 = scaled(290) as i32;

/// Diameter of the vision advisory badge.
pub const ADVISORY_SIZE: u32 = scaled(184);

// =============================================================================
// Alert Banner Geometry
// =============================================================================

/// Small alert strip height.
pub const ALERT_SMALL_HEIGHT: u32 = scaled(271);

/// Mid alert strip height.
pub const ALERT_MID_HEIGHT: u32 = scaled(420);

/// Banner background opacity (0xf1 of 0xff).
pub const ALERT_OPACITY: f32 = 0xf1 as f32 / 255.0;

/// Horizontal text margin inside full-screen alerts.
pub const ALERT_TEXT_MARGIN: u32 = scaled(60);

// =============================================================================
// Perception Geometry
// =============================================================================

/// Maximum number of lead markers drawn.
pub const MAX_LEADS: usize = 2;

/// Maximum number of lead observations carried in one snapshot.
pub const MAX_LEAD_OBSERVATIONS: usize = 3;

/// Points per model trajectory (lane lines, edges, path).
pub const TRAJECTORY_SIZE: usize = 33;

/// Number of lane lines reported by the model.
pub const LANE_LINE_COUNT: usize = 4;

/// Number of road edges reported by the model.
pub const ROAD_EDGE_COUNT: usize = 2;

/// Camera mounting height above ground (m).
pub const CAMERA_HEIGHT_M: f32 = 1.22;

/// Path draw distance bounds (m).
pub const MIN_DRAW_DISTANCE_M: f32 = 10.0;
pub const MAX_DRAW_DISTANCE_M: f32 = 100.0;

/// Focal length as a fraction of the surface width.
pub const FOCAL_WIDTH_RATIO: f32 = 0.75;

/// Horizon position as a fraction of the surface height.
pub const HORIZON_HEIGHT_RATIO: f32 = 0.45;

/// Projected points further than this outside the surface are rejected.
pub const CLIP_MARGIN_PX: i32 = 150;

/// Minimum lead probability considered a valid track.
pub const LEAD_MIN_PROB: f32 = 0.5;

/// Distance under which lead chevrons start filling in (m).
pub const LEAD_FILL_DISTANCE_M: f32 = 40.0;

/// Closing speed that adds full chevron opacity (m/s).
pub const LEAD_FILL_SPEED_MS: f32 = 10.0;

// =============================================================================
// Units
// =============================================================================

pub const MS_TO_KPH: f32 = 3.6;
pub const MS_TO_MPH: f32 = 2.236_936;
pub const KM_TO_MILE: f32 = 0.621_371;

/// Cruise set speed reported when cruise is unavailable.
pub const SET_SPEED_NA: f32 = 255.0;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Nominal UI update rate (Hz).
pub const UI_FREQ: f32 = 20.0;

/// Time constant of the frame-rate filter (s).
pub const FPS_FILTER_RC: f32 = 3.0;

/// Filtered frame rate below which a slow-frame warning is logged.
pub const SLOW_FPS_THRESHOLD: f32 = 15.0;

/// Minimum spacing between slow-frame warnings (s).
pub const SLOW_FPS_WARN_INTERVAL_S: f32 = 1.0;

/// Time for the scanner to sweep across and back (s).
pub const SCANNER_PERIOD_S: f32 = 2.4;

/// Scanner band height.
pub const SCANNER_HEIGHT: u32 = scaled(24);

/// Maximum number of fading trail segments behind the scanner head.
pub const SCANNER_MAX_TRAIL: usize = 8;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_matches_ui_scale() {
        assert_eq!(scaled(1000) as f32, 1000.0 * UI_SCALE);
        assert_eq!(SCREEN_WIDTH, scaled(2160));
        assert_eq!(SCREEN_HEIGHT, scaled(1080));
    }

    #[test]
    fn test_alert_tiers_ordered() {
        assert!(ALERT_SMALL_HEIGHT < ALERT_MID_HEIGHT, "mid alerts reserve more space");
        assert!(ALERT_MID_HEIGHT < SCREEN_HEIGHT, "mid alerts do not fill the screen");
    }

    #[test]
    fn test_lead_cap_within_observations() {
        assert!(MAX_LEADS <= MAX_LEAD_OBSERVATIONS);
    }
}
