//! Map panel stand-in and the tap handler that toggles it.

use std::cell::Cell;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use onroad_hud::{MapPanel, TapEvent, TapTarget};
use profont::PROFONT_18_POINT;

use crate::debug_log::DebugLog;

const MAP_BG: Rgb565 = Rgb565::new(3, 8, 6);
const MAP_LABEL: Rgb565 = Rgb565::new(18, 38, 20);

/// Visibility flag shared between the shell and the compositor.
pub struct MapStandIn {
    visible: Cell<bool>,
}

impl MapStandIn {
    pub const fn new() -> Self {
        Self {
            visible: Cell::new(false),
        }
    }

    pub fn set_visible(
        &self,
        visible: bool,
    ) {
        self.visible.set(visible);
    }

    pub fn draw<D>(
        &self,
        display: &mut D,
        area: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        area.into_styled(PrimitiveStyle::with_fill(MAP_BG)).draw(display).ok();
        let style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style("MAP", area.center(), MonoTextStyle::new(&PROFONT_18_POINT, MAP_LABEL), style)
            .draw(display)
            .ok();
    }
}

impl MapPanel for MapStandIn {
    fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

/// Shell command target: a tap flips map visibility.
pub struct Shell<'a> {
    pub map: &'a MapStandIn,
    pub log: &'a mut DebugLog,
}

impl TapTarget for Shell<'_> {
    fn tapped(
        &mut self,
        event: TapEvent,
    ) {
        self.map.set_visible(!event.map_visible);
        self.log.push(if event.map_visible { "Map: hidden" } else { "Map: shown" });
    }
}
