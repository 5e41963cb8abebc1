//! Alert banner overlay.
//!
//! Holds exactly one alert. [`AlertBanner::update_alert`] replaces it in a
//! single assignment and the next paint renders exactly that alert. The
//! `Alert::none()` sentinel paints nothing at all.
//!
//! # Tiers
//!
//! | Size  | Height               | Text                                   |
//! |-------|----------------------|----------------------------------------|
//! | Small | [`ALERT_SMALL_HEIGHT`] | `text1` centered                     |
//! | Mid   | [`ALERT_MID_HEIGHT`]   | `text1` over `text2`, both centered  |
//! | Full  | whole area           | `text1` large, `text2` wrapped below   |
//!
//! The strip is anchored to the bottom of the onroad area. Its background is
//! the banner color at fixed opacity, darkened toward the bottom.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use heapless::Vec;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::colors::{ALERT_CRITICAL, ALERT_USER_PROMPT, BLACK, blend, over_camera};
use crate::config::{ALERT_MID_HEIGHT, ALERT_OPACITY, ALERT_SMALL_HEIGHT, ALERT_TEXT_MARGIN};
use crate::state::{Alert, AlertSize, AlertStatus};
use crate::status::Status;
use crate::styles::{ALERT_BODY_FONT, ALERT_BODY_STYLE, ALERT_TITLE_FONT, ALERT_TITLE_STYLE, CENTERED_MIDDLE, LEFT_TOP};
use crate::widgets::primitives::draw_text;

/// Bands in the darkening gradient.
const GRADIENT_BANDS: u32 = 8;

/// Darkening at the top and bottom of the strip.
const GRADIENT_TOP: f32 = 0.05;
const GRADIENT_BOTTOM: f32 = 0.35;

/// Maximum wrapped lines of `text2` on a full-screen alert.
pub const MAX_WRAPPED_LINES: usize = 8;

/// Banner color for an alert: fixed palette for prompts and critical alerts,
/// the status background otherwise.
pub const fn banner_color(
    alert_status: AlertStatus,
    status: Status,
) -> Rgb565 {
    match alert_status {
        AlertStatus::UserPrompt => ALERT_USER_PROMPT,
        AlertStatus::Critical => ALERT_CRITICAL,
        AlertStatus::Normal => status.color(),
    }
}

/// Height of the strip for a tier inside an area of `area_height` pixels.
pub fn strip_height(
    size: AlertSize,
    area_height: u32,
) -> u32 {
    match size {
        AlertSize::None => 0,
        AlertSize::Small => ALERT_SMALL_HEIGHT.min(area_height),
        AlertSize::Mid => ALERT_MID_HEIGHT.min(area_height),
        AlertSize::Full => area_height,
    }
}

/// Greedy word wrap into lines of at most `max_chars` characters.
///
/// Words longer than a line are split.
pub fn wrap_lines(
    text: &str,
    max_chars: usize,
) -> Vec<&str, MAX_WRAPPED_LINES> {
    let mut lines = Vec::new();
    if max_chars == 0 {
        return lines;
    }
    let mut rest = text.trim();
    while !rest.is_empty() && !lines.is_full() {
        let line = if rest.chars().count() <= max_chars {
            rest
        } else {
            // byte index just past `max_chars` characters
            let limit = rest.char_indices().nth(max_chars).map_or(rest.len(), |(i, _)| i);
            match rest[..limit].rfind(' ') {
                Some(space) if space > 0 => &rest[..space],
                _ => &rest[..limit],
            }
        };
        lines.push(line.trim_end()).ok();
        rest = rest[line.len()..].trim_start();
    }
    lines
}

/// Single-alert overlay.
#[derive(Clone, Debug)]
pub struct AlertBanner {
    alert: Alert,
    color: Rgb565,
}

impl AlertBanner {
    pub fn new() -> Self {
        Self {
            alert: Alert::none(),
            color: Status::Disengaged.color(),
        }
    }

    /// Replace the current alert.
    pub fn update_alert(
        &mut self,
        alert: Alert,
        color: Rgb565,
    ) {
        *self = Self { alert, color };
    }

    /// Drop the current alert.
    pub fn clear(&mut self) {
        self.update_alert(Alert::none(), Status::Disengaged.color());
    }

    #[inline]
    pub const fn alert(&self) -> &Alert {
        &self.alert
    }

    #[inline]
    pub const fn color(&self) -> Rgb565 {
        self.color
    }

    /// Rectangle the banner covers inside `area`, if any.
    pub fn strip(
        &self,
        area: Rectangle,
    ) -> Option<Rectangle> {
        let height = strip_height(self.alert.size, area.size.height);
        if height == 0 {
            return None;
        }
        let top = area.top_left.y + (area.size.height - height) as i32;
        Some(Rectangle::new(
            Point::new(area.top_left.x, top),
            Size::new(area.size.width, height),
        ))
    }

    /// Paint the banner into `area` (absolute surface coordinates).
    pub fn paint<D>(
        &self,
        target: &mut D,
        area: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(strip) = self.strip(area) else {
            return;
        };

        self.draw_background(target, strip);

        let center = strip.center();
        match self.alert.size {
            AlertSize::None => {}
            AlertSize::Small => {
                draw_text(target, &self.alert.text1, center, ALERT_BODY_STYLE, CENTERED_MIDDLE);
            }
            AlertSize::Mid => {
                let title_h = ALERT_TITLE_FONT.character_size.height as i32;
                let body_h = ALERT_BODY_FONT.character_size.height as i32;
                let title_y = center.y - body_h / 2 - 2;
                let body_y = center.y + title_h / 2 + 2;
                draw_text(target, &self.alert.text1, Point::new(center.x, title_y), ALERT_TITLE_STYLE, CENTERED_MIDDLE);
                draw_text(target, &self.alert.text2, Point::new(center.x, body_y), ALERT_BODY_STYLE, CENTERED_MIDDLE);
            }
            AlertSize::Full => self.draw_full_text(target, strip),
        }
    }

    fn draw_background<D>(
        &self,
        target: &mut D,
        strip: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let base = over_camera(self.color, ALERT_OPACITY);
        let bands = GRADIENT_BANDS.min(strip.size.height).max(1);
        let band_h = strip.size.height / bands;

        for i in 0..bands {
            let t = if bands > 1 { i as f32 / (bands - 1) as f32 } else { 0.0 };
            let shade = blend(base, BLACK, (GRADIENT_BOTTOM - GRADIENT_TOP).mul_add(t, GRADIENT_TOP));
            let y = strip.top_left.y + (i * band_h) as i32;
            // last band absorbs the remainder
            let h = if i == bands - 1 { strip.size.height - i * band_h } else { band_h };
            Rectangle::new(Point::new(strip.top_left.x, y), Size::new(strip.size.width, h))
                .into_styled(PrimitiveStyle::with_fill(shade))
                .draw(target)
                .ok();
        }
    }

    fn draw_full_text<D>(
        &self,
        target: &mut D,
        strip: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let center_x = strip.center().x;
        let title_y = strip.top_left.y + (strip.size.height / 3) as i32;
        draw_text(target, &self.alert.text1, Point::new(center_x, title_y), ALERT_TITLE_STYLE, CENTERED_MIDDLE);

        let char_w = ALERT_BODY_FONT.character_size.width + ALERT_BODY_FONT.character_spacing;
        let usable = strip.size.width.saturating_sub(2 * ALERT_TEXT_MARGIN);
        let max_chars = (usable / char_w.max(1)) as usize;
        let line_h = ALERT_BODY_FONT.character_size.height as i32;

        let left = strip.top_left.x + ALERT_TEXT_MARGIN as i32;
        let mut y = title_y + ALERT_TITLE_FONT.character_size.height as i32;
        for line in wrap_lines(&self.alert.text2, max_chars) {
            draw_text(target, line, Point::new(left, y), ALERT_BODY_STYLE, LEFT_TOP);
            y += line_h;
        }
    }
}

impl Default for AlertBanner {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
