//! Lead chevrons with lock-on brackets.
//!
//! Each marker is a glow triangle with the chevron on top, framed by corner
//! brackets and labelled with its track index and distance. With two markers a
//! connector joins their apexes.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;

use super::primitives::{draw_line, draw_text, fill_triangle};
use crate::colors::{LEAD_GLOW, LOCK_ON};
use crate::derived::LeadMarker;
use crate::styles::{LABEL_FONT, LEFT_TOP};

/// Length of each bracket arm.
const BRACKET_ARM: i32 = 5;

const LOCK_ON_LABEL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(LABEL_FONT, LOCK_ON);

/// Draw all markers and, for exactly two, the connector.
pub fn draw_lead_markers<D>(
    display: &mut D,
    markers: &[LeadMarker],
) where
    D: DrawTarget<Color = Rgb565>,
{
    for marker in markers {
        draw_chevron(display, marker);
        draw_lock_on(display, marker);
    }
    if let [first, second] = markers {
        draw_connector(display, first, second);
    }
}

fn draw_chevron<D>(
    display: &mut D,
    marker: &LeadMarker,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_triangle(display, marker.glow(), LEAD_GLOW);
    if let Some(fill) = marker.fill {
        fill_triangle(display, marker.chevron(), fill);
    }
}

fn draw_lock_on<D>(
    display: &mut D,
    marker: &LeadMarker,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let bracket = marker.bracket();
    let Some(br) = bracket.bottom_right() else {
        return;
    };
    let tl = bracket.top_left;

    // Corner brackets: (corner, horizontal direction, vertical direction)
    let corners = [
        (tl, 1, 1),
        (Point::new(br.x, tl.y), -1, 1),
        (Point::new(tl.x, br.y), 1, -1),
        (br, -1, -1),
    ];
    for (corner, dx, dy) in corners {
        draw_line(display, corner, corner + Point::new(dx * BRACKET_ARM, 0), LOCK_ON, 1);
        draw_line(display, corner, corner + Point::new(0, dy * BRACKET_ARM), LOCK_ON, 1);
    }

    let mut label: String<16> = String::new();
    write!(label, "{} {}m", marker.index, marker.distance_m.max(0.0) as u32).ok();
    let label_top = tl.y - LABEL_FONT.character_size.height as i32 - 1;
    draw_text(display, &label, Point::new(tl.x, label_top), LOCK_ON_LABEL_STYLE, LEFT_TOP);
}

fn draw_connector<D>(
    display: &mut D,
    first: &LeadMarker,
    second: &LeadMarker,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_line(display, first.apex, second.apex, LOCK_ON, 1);
}
