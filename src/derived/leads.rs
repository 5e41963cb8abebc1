//! Lead vehicle markers.
//!
//! Each valid track becomes a chevron above the projected road contact point.
//! Closeness drives both opacity and size:
//! ```text
//! fill  = 255 * (1 - d / 40)        when d < 40 m
//!       + 255 * (-v_rel / 10)       when closing
//! size  = clamp(750 / (d / 3 + 30), 15, 30) * 2.35
//! ```
//! A lead that fails any check is dropped on its own; the other slot and the
//! rest of the frame are unaffected.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use log::debug;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::colors::{SIGN_RED, over_camera};
use crate::config::{CAMERA_HEIGHT_M, LEAD_FILL_DISTANCE_M, LEAD_FILL_SPEED_MS, MAX_LEADS, UI_SCALE};
use crate::error::DegradeReason;
use crate::projection::Projection;
use crate::state::LeadObservation;

/// Padding between the glow outline and the lock-on brackets.
const BRACKET_PAD: i32 = 3;

/// One lead chevron, in surface coordinates.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LeadMarker {
    pub index: u8,
    /// Top of the chevron.
    pub apex: Point,
    pub size: u32,
    /// Pre-blended fill; `None` when fully transparent.
    pub fill: Option<Rgb565>,
    pub distance_m: f32,
}

impl LeadMarker {
    /// Chevron triangle: apex, right foot, left foot.
    pub fn chevron(&self) -> [Point; 3] {
        let sz = self.size as f32;
        let half = (sz * 1.25) as i32;
        let h = self.size as i32;
        [
            self.apex,
            self.apex + Point::new(half, h),
            self.apex + Point::new(-half, h),
        ]
    }

    /// Glow triangle drawn behind the chevron.
    pub fn glow(&self) -> [Point; 3] {
        let sz = self.size as f32;
        let x_off = (sz * 1.35 + sz / 5.0) as i32;
        let y_off = (sz / 10.0) as i32;
        let h = self.size as i32;
        [
            self.apex + Point::new(0, -y_off),
            self.apex + Point::new(x_off, h + y_off),
            self.apex + Point::new(-x_off, h + y_off),
        ]
    }

    /// Lock-on bracket box around the glow.
    pub fn bracket(&self) -> Rectangle {
        let glow = self.glow();
        let top_left = Point::new(glow[2].x - BRACKET_PAD, glow[0].y - BRACKET_PAD);
        let bottom_right = Point::new(glow[1].x + BRACKET_PAD, glow[1].y + BRACKET_PAD);
        Rectangle::with_corners(top_left, bottom_right)
    }
}

/// Chevron fill opacity (0..=255) from distance and relative speed.
pub fn fill_alpha(
    distance_m: f32,
    v_rel: f32,
) -> f32 {
    let mut alpha = 0.0;
    if distance_m < LEAD_FILL_DISTANCE_M {
        alpha = 255.0 * (1.0 - distance_m / LEAD_FILL_DISTANCE_M);
    }
    if v_rel < 0.0 {
        alpha += 255.0 * (-v_rel / LEAD_FILL_SPEED_MS);
    }
    alpha.clamp(0.0, 255.0)
}

/// Chevron height in pixels for a distance.
pub fn marker_size(distance_m: f32) -> u32 {
    let reference = (750.0 / (distance_m / 3.0 + 30.0)).clamp(15.0, 30.0) * 2.35;
    (reference * UI_SCALE).round() as u32
}

/// Derive one marker, or the reason it cannot be drawn.
pub fn derive_lead(
    lead: &LeadObservation,
    projection: &Projection,
    area: Size,
) -> Result<LeadMarker, DegradeReason> {
    if !lead.is_track() {
        return Err(DegradeReason::InvalidLead(lead.index));
    }
    if !(lead.x_rel.is_finite() && lead.y_rel.is_finite() && lead.v_rel.is_finite()) {
        return Err(DegradeReason::NonFinite("lead observation"));
    }

    // near leads land far outside the surface; they are pinned to the edge
    let (u, v) = projection.project_unclamped(lead.x_rel, -lead.y_rel, CAMERA_HEIGHT_M)?;

    let distance = lead.x_rel;
    let size = marker_size(distance);
    let sz = size as f32;

    let max_x = (area.width as f32 - sz / 2.0).max(0.0);
    let max_y = (area.height as f32 - sz * 0.6).max(0.0);
    let x = u.clamp(0.0, max_x);
    let y = v.clamp(0.0, max_y);

    let alpha = fill_alpha(distance, lead.v_rel);
    let fill = (alpha > 0.0).then(|| over_camera(SIGN_RED, alpha / 255.0));

    Ok(LeadMarker {
        index: lead.index,
        apex: Point::new(x as i32, y as i32),
        size,
        fill,
        distance_m: distance,
    })
}

/// Markers for every drawable observation, capped at [`MAX_LEADS`].
pub fn derive_leads(
    leads: &[LeadObservation],
    projection: &Projection,
    area: Size,
) -> Vec<LeadMarker, MAX_LEADS> {
    let mut markers = Vec::new();
    for lead in leads {
        let reason = match derive_lead(lead, projection, area) {
            Ok(marker) => match markers.push(marker) {
                Ok(()) => continue,
                Err(_) => DegradeReason::Capacity,
            },
            Err(reason) => reason,
        };
        debug!("lead {} dropped: {reason}", lead.index);
    }
    markers
}

/// Distance of the first drawn marker, if any.
pub fn first_lead_distance(markers: &[LeadMarker]) -> Option<f32> {
    markers.first().map(|m| m.distance_m)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

    const AREA: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    fn derive(leads: &[LeadObservation]) -> Vec<LeadMarker, MAX_LEADS> {
        derive_leads(leads, &Projection::for_size(AREA), AREA)
    }

    #[test]
    fn test_zero_one_two_leads() {
        assert!(derive(&[]).is_empty());
        assert_eq!(derive(&[LeadObservation::new(0, 30.0, 0.0, 0.0)]).len(), 1);
        let two = [LeadObservation::new(0, 30.0, 0.0, 0.0), LeadObservation::new(1, 50.0, 3.0, 0.0)];
        assert_eq!(derive(&two).len(), 2);
    }

    #[test]
    fn test_lead_cap() {
        let three = [
            LeadObservation::new(0, 20.0, 0.0, 0.0),
            LeadObservation::new(1, 40.0, 1.0, 0.0),
            LeadObservation::new(2, 60.0, -1.0, 0.0),
        ];
        let markers = derive(&three);
        assert_eq!(markers.len(), MAX_LEADS);
        assert_eq!(markers[1].index, 1, "first drawable leads win");
    }

    #[test]
    fn test_bad_lead_does_not_suppress_other() {
        let leads = [
            LeadObservation::new(0, f32::NAN, 0.0, 0.0),
            LeadObservation::new(1, 30.0, 0.0, 0.0),
        ];
        let markers = derive(&leads);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].index, 1);
    }

    #[test]
    fn test_invalid_and_low_probability_dropped() {
        let projection = Projection::for_size(AREA);
        let invalid = LeadObservation {
            valid: false,
            ..LeadObservation::new(4, 30.0, 0.0, 0.0)
        };
        assert_eq!(derive_lead(&invalid, &projection, AREA), Err(DegradeReason::InvalidLead(4)));
        let unsure = LeadObservation {
            prob: 0.1,
            ..LeadObservation::new(5, 30.0, 0.0, 0.0)
        };
        assert!(derive_lead(&unsure, &projection, AREA).is_err());
    }

    #[test]
    fn test_lead_behind_camera_dropped() {
        let behind = LeadObservation::new(0, -2.0, 0.0, 0.0);
        assert!(matches!(
            derive_lead(&behind, &Projection::for_size(AREA), AREA),
            Err(DegradeReason::BehindCamera(_))
        ));
    }

    #[test]
    fn test_fill_alpha_rules() {
        assert_eq!(fill_alpha(60.0, 0.0), 0.0, "far and steady is hollow");
        assert_eq!(fill_alpha(20.0, 0.0), 127.5);
        assert_eq!(fill_alpha(60.0, -5.0), 127.5, "closing speed adds opacity");
        assert_eq!(fill_alpha(0.0, -20.0), 255.0, "clamped to opaque");
        assert_eq!(fill_alpha(60.0, 5.0), 0.0, "pulling away adds nothing");
    }

    #[test]
    fn test_marker_size_shrinks_with_distance() {
        assert!(marker_size(5.0) >= marker_size(50.0));
        assert!(marker_size(50.0) >= marker_size(200.0));
        assert_eq!(marker_size(200.0), (15.0f32 * 2.35 * UI_SCALE).round() as u32, "size floor");
        assert_eq!(marker_size(0.0), (25.0f32 * 2.35 * UI_SCALE).round() as u32);
    }

    fn assert_on_surface(marker: &LeadMarker) {
        let max_y = AREA.height as f32 - marker.size as f32 * 0.6;
        assert!(
            (0..=AREA.width as i32).contains(&marker.apex.x),
            "apex x {} off the surface",
            marker.apex.x
        );
        assert!(
            marker.apex.y >= 0 && marker.apex.y as f32 <= max_y,
            "apex y {} outside 0..={max_y}",
            marker.apex.y
        );
    }

    #[test]
    fn test_marker_stays_on_surface() {
        let far_right = LeadObservation::new(0, 5.0, -3.5, 0.0);
        let marker = derive_lead(&far_right, &Projection::for_size(AREA), AREA).unwrap();
        assert_on_surface(&marker);
    }

    #[test]
    fn test_close_lead_is_clamped_not_dropped() {
        let projection = Projection::for_size(AREA);
        for d in [1.0, 1.5, 1.8, 2.0, 3.0] {
            let lead = LeadObservation::new(0, d, 0.0, -2.0);
            let marker = derive_lead(&lead, &projection, AREA);
            assert!(marker.is_ok(), "lead at {d} m must be drawn, got {marker:?}");
            let marker = marker.unwrap();
            assert_on_surface(&marker);
            assert_eq!(marker.apex.x, (AREA.width / 2) as i32, "straight ahead stays centered");
        }
    }

    #[test]
    fn test_close_side_leads_pinned_to_edges() {
        let projection = Projection::for_size(AREA);
        let left = derive_lead(&LeadObservation::new(0, 1.5, 6.0, 0.0), &projection, AREA).unwrap();
        assert_on_surface(&left);
        assert_eq!(left.apex.x, 0, "far left pins to the left edge");

        let right = derive_lead(&LeadObservation::new(1, 1.5, -6.0, 0.0), &projection, AREA).unwrap();
        assert_on_surface(&right);
        let max_x = (AREA.width as f32 - right.size as f32 / 2.0) as i32;
        assert_eq!(right.apex.x, max_x, "far right pins to the right edge");
    }

    #[test]
    fn test_hollow_marker_has_no_fill() {
        let marker = derive(&[LeadObservation::new(0, 80.0, 0.0, 2.0)])[0];
        assert_eq!(marker.fill, None);
        let close = derive(&[LeadObservation::new(0, 10.0, 0.0, -3.0)])[0];
        assert!(close.fill.is_some());
    }

    #[test]
    fn test_geometry_helpers_enclose_chevron() {
        let marker = derive(&[LeadObservation::new(0, 30.0, 0.0, 0.0)])[0];
        let bracket = marker.bracket();
        for p in marker.chevron().iter().chain(marker.glow().iter()) {
            assert!(bracket.contains(*p), "bracket must enclose {p:?}");
        }
    }

    #[test]
    fn test_first_lead_distance() {
        assert_eq!(first_lead_distance(&[]), None);
        let leads = [
            LeadObservation {
                valid: false,
                ..LeadObservation::new(0, 12.0, 0.0, 0.0)
            },
            LeadObservation::new(1, 25.0, 0.0, 0.0),
        ];
        assert_eq!(first_lead_distance(&derive(&leads)), Some(25.0));
    }

    #[test]
    fn test_first_lead_distance_skips_undrawn_leads() {
        let leads = [
            LeadObservation::new(0, 8.0, f32::NAN, 0.0),
            LeadObservation::new(1, 8.0, 0.0, f32::INFINITY),
            LeadObservation::new(2, 40.0, 0.0, 0.0),
        ];
        let markers = derive(&leads);
        assert_eq!(markers.len(), 1);
        assert_eq!(first_lead_distance(&markers), Some(40.0), "only a drawn lead cuts the path");
    }
}
