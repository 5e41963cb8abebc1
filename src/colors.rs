//! Color constants and blending for the onroad overlay.
//!
//! # Rgb565 and Opacity
//!
//! The display format is Rgb565 (5 bits red, 6 bits green, 5 bits blue), which
//! carries no alpha channel. Translucent HUD elements are therefore pre-blended
//! against a known backdrop with [`blend`] before drawing. For elements laid over
//! the camera feed the backdrop is [`CAMERA_BACKDROP`], the average tone of a
//! road scene, which keeps dimmed icons and faded lane lines readable.
//!
//! Palette values are taken from the 8-bit reference design and converted with
//! [`rgb`] at compile time.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Conversion
// =============================================================================

/// Build an Rgb565 color from 8-bit channels (truncating to 5/6/5 bits).
pub const fn rgb(
    r: u8,
    g: u8,
    b: u8,
) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Idle surface and text outlines.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. HUD text and sign faces.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Dark gray used for the offroad idle surface.
pub const IDLE_GRAY: Rgb565 = rgb(0x20, 0x20, 0x20);

/// Average road-scene tone that translucent overlays are blended against.
pub const CAMERA_BACKDROP: Rgb565 = rgb(0x40, 0x44, 0x48);

// =============================================================================
// HUD Palette
// =============================================================================

/// Sign red (EU ring, lead chevron fill).
pub const SIGN_RED: Rgb565 = rgb(201, 34, 49);

/// Default "MAX" label color while cruise is engaged.
pub const MAX_ENGAGED: Rgb565 = rgb(0x80, 0xd8, 0xa6);

/// "MAX" label color when cruise is not set.
pub const MAX_INACTIVE: Rgb565 = rgb(0xa6, 0xa6, 0xa6);

/// Set speed digits when cruise is not set.
pub const SET_SPEED_INACTIVE: Rgb565 = rgb(0x72, 0x72, 0x72);

/// "MAX" label color while the driver is overriding.
pub const MAX_OVERRIDE: Rgb565 = rgb(0x91, 0x9b, 0x95);

/// Set speed slightly above the limit: MAX label / digits.
pub const OVER_LIMIT_MILD_LABEL: Rgb565 = rgb(0xff, 0xe4, 0xbf);
pub const OVER_LIMIT_MILD_DIGITS: Rgb565 = rgb(0xff, 0x95, 0x00);

/// Set speed well above the limit: MAX label / digits.
pub const OVER_LIMIT_HIGH_LABEL: Rgb565 = rgb(0xff, 0xbf, 0xbf);
pub const OVER_LIMIT_HIGH_DIGITS: Rgb565 = rgb(0xff, 0x00, 0x00);

/// Glow outline around lead chevrons.
pub const LEAD_GLOW: Rgb565 = rgb(218, 202, 37);

/// Lock-on brackets and connector.
pub const LOCK_ON: Rgb565 = rgb(0x3d, 0xd6, 0xf5);

/// Driving path, normal mode (near / far end of the gradient).
pub const PATH_NEAR: Rgb565 = rgb(0x08, 0xf4, 0x6a);
pub const PATH_FAR: Rgb565 = rgb(0x5c, 0xff, 0x9e);

/// Driving path in experimental mode.
pub const PATH_EXPERIMENTAL: Rgb565 = rgb(0xff, 0x9a, 0x3c);

/// Road edges.
pub const ROAD_EDGE: Rgb565 = Rgb565::RED;

/// Alert backgrounds for prompts that need the driver's attention.
pub const ALERT_USER_PROMPT: Rgb565 = rgb(0xda, 0x6f, 0x25);
pub const ALERT_CRITICAL: Rgb565 = rgb(0xc9, 0x22, 0x31);

// =============================================================================
// Blending
// =============================================================================

/// Blend `over` onto `base` with opacity `alpha` (0.0 = base, 1.0 = over).
///
/// Interpolates each 5/6/5 channel with 8-bit fixed point. Non-finite or
/// out-of-range alpha values are clamped, so callers can pass derived opacities
/// without validating them first.
pub fn blend(
    base: Rgb565,
    over: Rgb565,
    alpha: f32,
) -> Rgb565 {
    let alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
    let t_fixed = (alpha * 256.0) as i32;

    let mix = |from: u8, to: u8| -> u8 {
        let from = i32::from(from);
        let to = i32::from(to);
        (from + (((to - from) * t_fixed) >> 8)) as u8
    };

    Rgb565::new(mix(base.r(), over.r()), mix(base.g(), over.g()), mix(base.b(), over.b()))
}

/// Blend a color over the camera backdrop.
#[inline]
pub fn over_camera(
    color: Rgb565,
    alpha: f32,
) -> Rgb565 {
    blend(CAMERA_BACKDROP, color, alpha)
}

/// Piecewise-linear color ramp: `c0` up to `stops[0]`, through `c1` at
/// `stops[1]`, reaching `c2` at `stops[2]` and beyond.
pub fn interp_color(
    value: f32,
    stops: [f32; 3],
    colors: [Rgb565; 3],
) -> Rgb565 {
    if !value.is_finite() || value <= stops[0] {
        colors[0]
    } else if value <= stops[1] {
        blend(colors[0], colors[1], (value - stops[0]) / (stops[1] - stops[0]))
    } else if value <= stops[2] {
        blend(colors[1], colors[2], (value - stops[1]) / (stops[2] - stops[1]))
    } else {
        colors[2]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
