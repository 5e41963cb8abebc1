//! Pre-computed static text styles to avoid per-frame object construction.
//!
//! Every style that has a fixed color is a `const`, so the paint path only
//! references read-only data. Elements whose color is derived per frame (MAX
//! label, set speed, advisory) build a `MonoTextStyle` from one of the exposed
//! font references instead.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_9X15_BOLD, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{BLACK, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered on the baseline. Speed digits, sign digits.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Centered both ways around the anchor point. Icon captions, alert lines.
pub const CENTERED_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Left-aligned, top baseline. Wrapped alert body text, lock-on labels.
pub const LEFT_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Current speed digits.
pub const SPEED_FONT: &MonoFont = &PROFONT_24_POINT;

/// Set speed and speed-limit digits.
pub const SET_SPEED_FONT: &MonoFont = &PROFONT_18_POINT;

/// "MAX" caption and sign captions.
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Unit label and advisory text.
pub const UNIT_FONT: &MonoFont = &FONT_9X15_BOLD;

/// Primary alert line on mid and full alerts.
pub const ALERT_TITLE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Secondary alert lines and small alerts.
pub const ALERT_BODY_FONT: &MonoFont = &FONT_10X20;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Speed unit label.
pub const UNIT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_9X15_BOLD, WHITE);

/// Black digits on white sign faces.
pub const SIGN_DIGITS_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, BLACK);

/// Small black caption on the US sign ("SPEED", "LIMIT").
pub const SIGN_CAPTION_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, BLACK);

/// Alert body text.
pub const ALERT_BODY_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Alert title text.
pub const ALERT_TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, WHITE);
