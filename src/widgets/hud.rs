//! HUD layer: speed, set-speed box with limit sign, and round icons.
//!
//! All positions come from [`HudProperties`]; nothing here decides whether an
//! element exists. A `None` field simply draws nothing.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{CornerRadii, PrimitiveStyleBuilder, Rectangle, RoundedRectangle};

use super::primitives::{draw_disc, draw_text, draw_value_with_outline};
use crate::colors::{BLACK, SIGN_RED, WHITE, blend, over_camera, rgb};
use crate::config::{
    ADVISORY_SIZE, ICON_IMG_SIZE, ICON_SIZE, SET_SPEED_BOX_HEIGHT, SPEED_TEXT_Y, SPEED_UNIT_Y, scaled,
};
use crate::derived::{AdvisoryBadge, DmIcon, EngageIcon, HudProperties, SignStyle, SpeedLimitSign};
use crate::icons::IconSet;
use crate::styles::{
    CENTERED, CENTERED_MIDDLE, LABEL_FONT, SET_SPEED_FONT, SIGN_CAPTION_STYLE, SIGN_DIGITS_STYLE, SPEED_FONT,
    UNIT_FONT,
};

/// Set-speed box background and border.
const BOX_FILL: Rgb565 = rgb(0x1c, 0x1e, 0x20);
const BOX_BORDER_WIDTH: u32 = 2;
const BOX_CORNER: u32 = scaled(32);

/// Baselines inside the set-speed box, from its top.
const MAX_LABEL_Y: i32 = scaled(77) as i32;
const SET_SPEED_Y: i32 = scaled(165) as i32;

/// Inset of the sign inside its part of the box.
const SIGN_INSET: u32 = scaled(12);

/// EU sign ring width.
const EU_RING_WIDTH: u32 = scaled(20);

/// Driver-monitoring disc opacity over video.
const DM_DISC_ALPHA: f32 = 70.0 / 255.0;

// =============================================================================
// Entry Point
// =============================================================================

/// Draw the whole HUD layer.
pub fn draw_hud<D>(
    display: &mut D,
    hud: &HudProperties,
    icons: Option<&IconSet>,
    area: Size,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_set_speed_box(display, hud);
    draw_current_speed(display, hud, area);

    if let Some(engage) = &hud.engage {
        draw_engage_icon(display, engage, icons);
    }
    if let Some(dm) = &hud.dm {
        draw_dm_icon(display, dm, icons);
    }
    if let Some(advisory) = &hud.advisory {
        draw_advisory(display, advisory);
    }
}

// =============================================================================
// Speed
// =============================================================================

fn draw_current_speed<D>(
    display: &mut D,
    hud: &HudProperties,
    area: Size,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let Some(speed) = &hud.speed else {
        return;
    };
    let center_x = (area.width / 2) as i32;
    draw_value_with_outline(display, speed, Point::new(center_x, SPEED_TEXT_Y), SPEED_FONT, WHITE, CENTERED);
    draw_value_with_outline(
        display,
        hud.speed_unit,
        Point::new(center_x, SPEED_UNIT_Y),
        UNIT_FONT,
        blend(BLACK, WHITE, 0.8),
        CENTERED,
    );
}

// =============================================================================
// Set Speed and Limit Sign
// =============================================================================

fn draw_set_speed_box<D>(
    display: &mut D,
    hud: &HudProperties,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let rect = Rectangle::new(hud.box_origin, hud.box_size);
    let style = PrimitiveStyleBuilder::new()
        .fill_color(BOX_FILL)
        .stroke_color(over_camera(WHITE, 0.3))
        .stroke_width(BOX_BORDER_WIDTH)
        .build();
    RoundedRectangle::new(rect, CornerRadii::new(Size::new(BOX_CORNER, BOX_CORNER)))
        .into_styled(style)
        .draw(display)
        .ok();

    let center_x = rect.top_left.x + (rect.size.width / 2) as i32;
    draw_text(
        display,
        "MAX",
        Point::new(center_x, rect.top_left.y + MAX_LABEL_Y),
        MonoTextStyle::new(LABEL_FONT, hud.max_color),
        CENTERED,
    );
    if let Some(set_speed) = &hud.set_speed {
        draw_text(
            display,
            set_speed,
            Point::new(center_x, rect.top_left.y + SET_SPEED_Y),
            MonoTextStyle::new(SET_SPEED_FONT, hud.set_speed_color),
            CENTERED,
        );
    }

    if let Some(sign) = &hud.sign {
        let sign_area = Rectangle::new(
            rect.top_left + Point::new(0, SET_SPEED_BOX_HEIGHT as i32),
            Size::new(rect.size.width, rect.size.height.saturating_sub(SET_SPEED_BOX_HEIGHT)),
        )
        .offset(-(SIGN_INSET as i32));
        draw_speed_limit_sign(display, sign, sign_area);
    }
}

/// Draw a limit sign filling `area`.
pub fn draw_speed_limit_sign<D>(
    display: &mut D,
    sign: &SpeedLimitSign,
    area: Rectangle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let center = area.center();
    match sign.style {
        SignStyle::Eu => {
            let diameter = area.size.width.min(area.size.height);
            draw_disc(display, center, diameter, WHITE, Some((SIGN_RED, EU_RING_WIDTH)));
            draw_text(display, &sign.text, center, SIGN_DIGITS_STYLE, CENTERED_MIDDLE);
        }
        SignStyle::Us => {
            let style = PrimitiveStyleBuilder::new()
                .fill_color(WHITE)
                .stroke_color(BLACK)
                .stroke_width(1)
                .build();
            RoundedRectangle::with_equal_corners(area, Size::new(4, 4))
                .into_styled(style)
                .draw(display)
                .ok();

            let line_h = LABEL_FONT.character_size.height as i32;
            let top = area.top_left.y + line_h;
            draw_text(display, "SPEED", Point::new(center.x, top), SIGN_CAPTION_STYLE, CENTERED_MIDDLE);
            draw_text(display, "LIMIT", Point::new(center.x, top + line_h), SIGN_CAPTION_STYLE, CENTERED_MIDDLE);
            let digits_y = (top + line_h + area.bottom_right().map_or(top + line_h, |p| p.y)) / 2;
            draw_text(display, &sign.text, Point::new(center.x, digits_y), SIGN_DIGITS_STYLE, CENTERED_MIDDLE);
        }
    }
}

// =============================================================================
// Icons
// =============================================================================

fn draw_engage_icon<D>(
    display: &mut D,
    engage: &EngageIcon,
    icons: Option<&IconSet>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_disc(display, engage.center, ICON_SIZE, engage.disc, None);
    if let Some(icons) = icons {
        let mask = if engage.experimental { &icons.experimental } else { &icons.engage };
        mask.draw(display, engage.center, ICON_IMG_SIZE, WHITE);
    }
}

fn draw_dm_icon<D>(
    display: &mut D,
    dm: &DmIcon,
    icons: Option<&IconSet>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let disc = over_camera(BLACK, DM_DISC_ALPHA);
    draw_disc(display, dm.center, ICON_SIZE, disc, None);
    if let Some(icons) = icons {
        icons
            .driver_face
            .draw(display, dm.center, ICON_IMG_SIZE, blend(disc, WHITE, dm.opacity));
    }
}

fn draw_advisory<D>(
    display: &mut D,
    advisory: &AdvisoryBadge,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_disc(display, advisory.center, ADVISORY_SIZE, over_camera(BLACK, 0.5), Some((advisory.color, 3)));
    draw_value_with_outline(display, &advisory.text, advisory.center, UNIT_FONT, advisory.color, CENTERED_MIDDLE);
}

// =============================================================================
// Unit Tests
// =============================================================================
