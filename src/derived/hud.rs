//! HUD text, colors and icon placement.
//!
//! # Units
//!
//! Speeds arrive in m/s, set speed in km/h. Everything shown is converted to
//! the active unit system and rounded to whole numbers before any comparison,
//! so the over-limit coloring agrees with the digits the driver reads.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::colors::{
    MAX_ENGAGED, MAX_INACTIVE, MAX_OVERRIDE, OVER_LIMIT_HIGH_DIGITS, OVER_LIMIT_HIGH_LABEL, OVER_LIMIT_MILD_DIGITS,
    OVER_LIMIT_MILD_LABEL, SET_SPEED_INACTIVE, WHITE, interp_color,
};
use crate::config::{
    ADVISORY_SIZE, FOOTER_HEIGHT, HUD_MARGIN, ICON_SIZE, KM_TO_MILE, MS_TO_KPH, MS_TO_MPH, SET_SPEED_BOX_HEIGHT,
    SET_SPEED_BOX_HEIGHT_EU, SET_SPEED_BOX_HEIGHT_US, SET_SPEED_BOX_WIDTH, SET_SPEED_BOX_WIDTH_US_3DIGIT,
    SET_SPEED_BOX_WIDTH_WIDE, SET_SPEED_BOX_X, SET_SPEED_BOX_Y, SET_SPEED_NA,
};
use crate::state::{ADVISORY_TEXT_LEN, DashboardHand, SpeedLimit, VehicleDisplayState};
use crate::status::Status;

/// Formatted whole-number speed. Holds any `u32`.
pub type SpeedText = String<10>;

/// Opacity of the driver-monitoring icon while monitoring is inactive.
pub const DM_INACTIVE_OPACITY: f32 = 0.2;

// =============================================================================
// Types
// =============================================================================

/// Speed-limit sign convention.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SignStyle {
    /// Round sign with red ring.
    Eu,
    /// Rectangular "SPEED LIMIT" sign.
    Us,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SpeedLimitSign {
    pub style: SignStyle,
    pub text: SpeedText,
}

/// Engage icon, drawn on a status-colored disc.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EngageIcon {
    pub center: Point,
    pub experimental: bool,
    pub disc: Rgb565,
}

/// Driver-monitoring icon.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DmIcon {
    pub center: Point,
    pub hand: DashboardHand,
    pub opacity: f32,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AdvisoryBadge {
    pub center: Point,
    pub text: String<ADVISORY_TEXT_LEN>,
    pub color: Rgb565,
}

/// Everything the HUD layer draws, in surface coordinates.
#[derive(Clone, PartialEq, Debug)]
pub struct HudProperties {
    /// Current speed; `None` until a valid speed has been seen.
    pub speed: Option<SpeedText>,
    pub speed_unit: &'static str,
    /// Set speed; `None` when cruise is inactive.
    pub set_speed: Option<SpeedText>,
    pub max_color: Rgb565,
    pub set_speed_color: Rgb565,
    pub box_origin: Point,
    pub box_size: Size,
    pub sign: Option<SpeedLimitSign>,
    pub engage: Option<EngageIcon>,
    pub dm: Option<DmIcon>,
    pub advisory: Option<AdvisoryBadge>,
}

// =============================================================================
// Speed Memory
// =============================================================================

/// Remembers the last valid ego speed for the session.
///
/// Until the first valid reading nothing is shown. After that a missing
/// reading keeps showing the last known value.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct SpeedMemory {
    seen: bool,
    last_ms: f32,
}

impl SpeedMemory {
    /// Fold in one reading and return the speed to display (m/s).
    pub fn observe(
        &mut self,
        speed_ms: Option<f32>,
    ) -> Option<f32> {
        if let Some(v) = speed_ms.filter(|v| v.is_finite()) {
            self.seen = true;
            self.last_ms = v;
        }
        self.seen.then_some(self.last_ms)
    }

    #[inline]
    pub const fn seen(&self) -> bool {
        self.seen
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Unit Conversion
// =============================================================================

/// Multiplier from m/s to the display unit.
#[inline]
pub const fn speed_conversion(is_metric: bool) -> f32 {
    if is_metric { MS_TO_KPH } else { MS_TO_MPH }
}

#[inline]
pub const fn speed_unit_label(is_metric: bool) -> &'static str {
    if is_metric { "km/h" } else { "mph" }
}

/// Display value for a speed in m/s: `round(max(0, v) * unit)`.
pub fn display_speed(
    speed_ms: f32,
    is_metric: bool,
) -> f32 {
    (speed_ms.max(0.0) * speed_conversion(is_metric)).round()
}

pub fn format_speed(value: f32) -> SpeedText {
    let mut text = SpeedText::new();
    write!(text, "{}", value.max(0.0).round() as u32).ok();
    text
}

/// Rounded set speed in display units, or `None` when cruise is inactive.
pub fn set_speed_display(
    cruise_kph: Option<f32>,
    is_metric: bool,
) -> Option<f32> {
    let kph = cruise_kph.filter(|c| c.is_finite() && *c > 0.0 && (*c as i32) != SET_SPEED_NA as i32)?;
    let value = if is_metric { kph } else { kph * KM_TO_MILE };
    Some(value.round())
}

/// Sign convention for the two navigation flags. EU takes precedence.
#[inline]
pub const fn sign_style(
    eu_sign: bool,
    us_sign: bool,
) -> Option<SignStyle> {
    if eu_sign {
        Some(SignStyle::Eu)
    } else if us_sign {
        Some(SignStyle::Us)
    } else {
        None
    }
}

/// Rounded limit in display units, `None` when unknown (rounds below 1).
pub fn speed_limit_display(
    limit: &SpeedLimit,
    is_metric: bool,
) -> Option<f32> {
    if !limit.value_ms.is_finite() {
        return None;
    }
    let value = display_speed(limit.value_ms, is_metric);
    (value >= 1.0).then_some(value)
}

// =============================================================================
// Colors and Geometry
// =============================================================================

/// MAX label and set-speed digit colors.
pub fn set_speed_colors(
    set_speed: Option<f32>,
    limit: Option<f32>,
    status: Status,
) -> (Rgb565, Rgb565) {
    let Some(set_speed) = set_speed else {
        return (MAX_INACTIVE, SET_SPEED_INACTIVE);
    };

    match status {
        Status::Disengaged => (WHITE, WHITE),
        Status::Override => (MAX_OVERRIDE, WHITE),
        Status::Engaged => match limit {
            Some(limit) => {
                let stops = [limit + 5.0, limit + 15.0, limit + 25.0];
                (
                    interp_color(set_speed, stops, [MAX_ENGAGED, OVER_LIMIT_MILD_LABEL, OVER_LIMIT_HIGH_LABEL]),
                    interp_color(set_speed, stops, [WHITE, OVER_LIMIT_MILD_DIGITS, OVER_LIMIT_HIGH_DIGITS]),
                )
            }
            None => (MAX_ENGAGED, WHITE),
        },
    }
}

/// Size of the set-speed box, which also hosts the limit sign.
pub fn set_speed_box_size(
    is_metric: bool,
    sign: Option<&SpeedLimitSign>,
) -> Size {
    let style = sign.map(|s| s.style);
    let mut width = if is_metric || style == Some(SignStyle::Eu) {
        SET_SPEED_BOX_WIDTH_WIDE
    } else {
        SET_SPEED_BOX_WIDTH
    };
    if sign.is_some_and(|s| s.style == SignStyle::Us && s.text.len() >= 3) {
        width = SET_SPEED_BOX_WIDTH_US_3DIGIT;
    }

    let height = match style {
        Some(SignStyle::Eu) => SET_SPEED_BOX_HEIGHT_EU,
        Some(SignStyle::Us) => SET_SPEED_BOX_HEIGHT_US,
        None => SET_SPEED_BOX_HEIGHT,
    };
    Size::new(width, height)
}

/// Center of the driver-monitoring icon for a dashboard side.
pub fn dm_icon_center(
    hand: DashboardHand,
    area: Size,
) -> Point {
    let offset = (HUD_MARGIN + ICON_SIZE / 2) as i32;
    let x = match hand {
        DashboardHand::Left => offset,
        DashboardHand::Right => area.width as i32 - offset,
    };
    Point::new(x, area.height as i32 - (FOOTER_HEIGHT / 2) as i32)
}

/// Center of the engage icon (top right).
pub fn engage_icon_center(area: Size) -> Point {
    let offset = (HUD_MARGIN + ICON_SIZE / 2) as i32;
    Point::new(area.width as i32 - offset, offset)
}

fn advisory_center(area: Size) -> Point {
    let engage = engage_icon_center(area);
    Point::new(engage.x, engage.y + (ICON_SIZE / 2 + HUD_MARGIN + ADVISORY_SIZE / 2) as i32)
}

// =============================================================================
// Derivation
// =============================================================================

/// Derive all HUD properties for one snapshot.
pub fn derive_hud(
    state: &VehicleDisplayState,
    speed: &mut SpeedMemory,
    status: Status,
    area: Size,
) -> HudProperties {
    let is_metric = state.is_metric;

    let shown_speed = speed
        .observe(state.speed_ms)
        .map(|v| format_speed(display_speed(v, is_metric)));

    let set_speed = set_speed_display(state.cruise_kph, is_metric);

    let limit = state.speed_limit.as_ref().and_then(|limit| {
        let style = sign_style(limit.eu_sign, limit.us_sign)?;
        let value = speed_limit_display(limit, is_metric)?;
        Some((style, value))
    });

    let (max_color, set_speed_color) = set_speed_colors(set_speed, limit.map(|(_, v)| v), status);

    let sign = limit.map(|(style, value)| SpeedLimitSign {
        style,
        text: format_speed(value),
    });
    let box_size = set_speed_box_size(is_metric, sign.as_ref());
    let box_origin = Point::new(
        SET_SPEED_BOX_X as i32 + (SET_SPEED_BOX_WIDTH as i32 - box_size.width as i32) / 2,
        SET_SPEED_BOX_Y as i32,
    );

    let engage = state.engageable.then(|| EngageIcon {
        center: engage_icon_center(area),
        experimental: state.experimental_mode,
        disc: status.color(),
    });

    let dm = (!state.dm_hidden).then(|| DmIcon {
        center: dm_icon_center(state.hand, area),
        hand: state.hand,
        opacity: if state.dm_active { 1.0 } else { DM_INACTIVE_OPACITY },
    });

    let advisory = state.advisory.enabled.then(|| AdvisoryBadge {
        center: advisory_center(area),
        text: state.advisory.speed_text.clone(),
        color: state.advisory.color,
    });

    HudProperties {
        speed: shown_speed,
        speed_unit: speed_unit_label(is_metric),
        set_speed: set_speed.map(format_speed),
        max_color,
        set_speed_color,
        box_origin,
        box_size,
        sign,
        engage,
        dm,
        advisory,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::rgb;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::state::AdvisoryOverlay;
    use crate::state::fit_str;

    const AREA: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    fn mph(v: f32) -> f32 {
        v / MS_TO_MPH
    }

    fn derive(state: &VehicleDisplayState) -> HudProperties {
        let mut memory = SpeedMemory::default();
        derive_hud(state, &mut memory, Status::from_raw(state.status), AREA)
    }

    // -------------------------------------------------------------------------
    // Speed
    // -------------------------------------------------------------------------

    #[test]
    fn test_speed_hidden_until_seen() {
        let mut memory = SpeedMemory::default();
        assert_eq!(memory.observe(None), None);
        assert!(!memory.seen());
        assert_eq!(memory.observe(Some(f32::NAN)), None, "NaN is not a valid reading");
    }

    #[test]
    fn test_speed_holds_last_known_value() {
        let mut memory = SpeedMemory::default();
        assert_eq!(memory.observe(Some(12.0)), Some(12.0));
        assert_eq!(memory.observe(None), Some(12.0), "cleared value keeps last known speed");
        memory.reset();
        assert_eq!(memory.observe(None), None, "reset forgets the session");
    }

    #[test]
    fn test_display_speed_conversion() {
        assert_eq!(display_speed(10.0, true), 36.0);
        assert_eq!(display_speed(mph(65.0), false), 65.0);
        assert_eq!(display_speed(-3.0, true), 0.0, "negative speeds clamp to zero");
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(65.0).as_str(), "65");
        assert_eq!(format_speed(0.0).as_str(), "0");
        assert_eq!(format_speed(-4.0).as_str(), "0");
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(speed_unit_label(true), "km/h");
        assert_eq!(speed_unit_label(false), "mph");
    }

    // -------------------------------------------------------------------------
    // Set Speed
    // -------------------------------------------------------------------------

    #[test]
    fn test_cruise_inactive_suppresses_set_speed() {
        for cruise in [None, Some(0.0), Some(-10.0), Some(SET_SPEED_NA), Some(f32::NAN)] {
            assert_eq!(set_speed_display(cruise, true), None, "cruise {cruise:?} is inactive");
        }
    }

    #[test]
    fn test_imperial_set_speed() {
        assert_eq!(set_speed_display(Some(70.0 / KM_TO_MILE), false), Some(70.0));
        assert_eq!(set_speed_display(Some(100.0), true), Some(100.0));
    }

    #[test]
    fn test_inactive_set_speed_colors() {
        assert_eq!(set_speed_colors(None, Some(50.0), Status::Engaged), (MAX_INACTIVE, SET_SPEED_INACTIVE));
    }

    #[test]
    fn test_set_speed_colors_by_status() {
        assert_eq!(set_speed_colors(Some(60.0), None, Status::Disengaged), (WHITE, WHITE));
        assert_eq!(set_speed_colors(Some(60.0), None, Status::Override).0, MAX_OVERRIDE);
        assert_eq!(set_speed_colors(Some(60.0), None, Status::Engaged), (MAX_ENGAGED, WHITE));
    }

    #[test]
    fn test_over_limit_colors() {
        let at_limit = set_speed_colors(Some(50.0), Some(50.0), Status::Engaged);
        assert_eq!(at_limit, (MAX_ENGAGED, WHITE), "within +5 keeps default colors");

        let mild = set_speed_colors(Some(65.0), Some(50.0), Status::Engaged);
        assert_eq!(mild, (OVER_LIMIT_MILD_LABEL, OVER_LIMIT_MILD_DIGITS));

        let high = set_speed_colors(Some(90.0), Some(50.0), Status::Engaged);
        assert_eq!(high, (OVER_LIMIT_HIGH_LABEL, OVER_LIMIT_HIGH_DIGITS));
    }

    // -------------------------------------------------------------------------
    // Speed Limit Sign
    // -------------------------------------------------------------------------

    #[test]
    fn test_sign_style_precedence() {
        assert_eq!(sign_style(false, false), None);
        assert_eq!(sign_style(true, false), Some(SignStyle::Eu));
        assert_eq!(sign_style(false, true), Some(SignStyle::Us));
        assert_eq!(sign_style(true, true), Some(SignStyle::Eu), "EU wins when both are set");
    }

    #[test]
    fn test_tiny_limit_is_unknown() {
        let limit = SpeedLimit {
            value_ms: 0.1,
            eu_sign: true,
            us_sign: false,
        };
        assert_eq!(speed_limit_display(&limit, true), None);
        let state = VehicleDisplayState {
            speed_limit: Some(limit),
            ..Default::default()
        };
        assert!(derive(&state).sign.is_none());
    }

    #[test]
    fn test_sign_derived_from_state() {
        let state = VehicleDisplayState {
            is_metric: true,
            speed_limit: Some(SpeedLimit {
                value_ms: 50.0 / MS_TO_KPH,
                eu_sign: true,
                us_sign: true,
            }),
            ..Default::default()
        };
        let hud = derive(&state);
        let sign = hud.sign.expect("limit with a style produces a sign");
        assert_eq!(sign.style, SignStyle::Eu);
        assert_eq!(sign.text.as_str(), "50");
        assert_eq!(hud.box_size, Size::new(SET_SPEED_BOX_WIDTH_WIDE, SET_SPEED_BOX_HEIGHT_EU));
    }

    #[test]
    fn test_box_size_rules() {
        assert_eq!(set_speed_box_size(false, None), Size::new(SET_SPEED_BOX_WIDTH, SET_SPEED_BOX_HEIGHT));
        assert_eq!(set_speed_box_size(true, None), Size::new(SET_SPEED_BOX_WIDTH_WIDE, SET_SPEED_BOX_HEIGHT));

        let us_sign = SpeedLimitSign {
            style: SignStyle::Us,
            text: fit_str("100"),
        };
        assert_eq!(
            set_speed_box_size(false, Some(&us_sign)),
            Size::new(SET_SPEED_BOX_WIDTH_US_3DIGIT, SET_SPEED_BOX_HEIGHT_US)
        );
    }

    #[test]
    fn test_no_flags_no_sign() {
        let state = VehicleDisplayState {
            speed_limit: Some(SpeedLimit {
                value_ms: 20.0,
                eu_sign: false,
                us_sign: false,
            }),
            ..Default::default()
        };
        assert!(derive(&state).sign.is_none());
    }

    // -------------------------------------------------------------------------
    // Icons
    // -------------------------------------------------------------------------

    #[test]
    fn test_dm_icon_visibility_and_side() {
        let hidden = VehicleDisplayState {
            dm_hidden: true,
            ..Default::default()
        };
        assert!(derive(&hidden).dm.is_none());

        let left = derive(&VehicleDisplayState::default()).dm.unwrap();
        assert!(left.center.x < (SCREEN_WIDTH / 2) as i32);
        assert_eq!(left.opacity, DM_INACTIVE_OPACITY, "inactive monitoring is dimmed");

        let right = derive(&VehicleDisplayState {
            hand: DashboardHand::Right,
            dm_active: true,
            ..Default::default()
        })
        .dm
        .unwrap();
        assert!(right.center.x > (SCREEN_WIDTH / 2) as i32);
        assert_eq!(right.opacity, 1.0);
    }

    #[test]
    fn test_engage_icon_follows_status() {
        let state = VehicleDisplayState {
            engageable: true,
            experimental_mode: true,
            status: 2,
            ..Default::default()
        };
        let icon = derive(&state).engage.unwrap();
        assert!(icon.experimental);
        assert_eq!(icon.disc, Status::Engaged.color());

        let not_engageable = VehicleDisplayState { engageable: false, ..state };
        assert!(derive(&not_engageable).engage.is_none());
    }

    #[test]
    fn test_advisory_verbatim() {
        let color = rgb(0x12, 0x80, 0xff);
        let state = VehicleDisplayState {
            advisory: AdvisoryOverlay {
                enabled: true,
                speed_text: fit_str("45"),
                color,
            },
            ..Default::default()
        };
        let badge = derive(&state).advisory.unwrap();
        assert_eq!(badge.text.as_str(), "45");
        assert_eq!(badge.color, color);

        let disabled = VehicleDisplayState {
            advisory: AdvisoryOverlay {
                enabled: false,
                ..state.advisory.clone()
            },
            ..Default::default()
        };
        assert!(derive(&disabled).advisory.is_none());
    }
}
