//! Stand-in camera: sky above the horizon, asphalt below, scrolling dashes.

use std::cell::Cell;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use onroad_hud::CameraView;
use onroad_hud::config::HORIZON_HEIGHT_RATIO;

const SKY: Rgb565 = Rgb565::new(9, 20, 16);
const ASPHALT: Rgb565 = Rgb565::new(6, 12, 6);
const SHOULDER: Rgb565 = Rgb565::new(8, 16, 7);

/// Number of shade rows used to fake ground perspective.
const GROUND_BANDS: u32 = 6;

/// Frames between band scroll steps.
const BAND_SCROLL_FRAMES: u32 = 10;

pub struct SyntheticRoad {
    /// Frame counter; bands scroll with it.
    frame: Cell<u32>,
}

impl SyntheticRoad {
    pub const fn new() -> Self {
        Self { frame: Cell::new(0) }
    }
}

impl CameraView for SyntheticRoad {
    fn draw_frame<D>(
        &self,
        target: &mut D,
        area: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let frame = self.frame.get();
        self.frame.set(frame.wrapping_add(1));

        let horizon = (area.size.height as f32 * HORIZON_HEIGHT_RATIO) as u32;
        Rectangle::new(area.top_left, Size::new(area.size.width, horizon))
            .into_styled(PrimitiveStyle::with_fill(SKY))
            .draw(target)
            .ok();

        let ground_h = area.size.height.saturating_sub(horizon);
        let band_h = (ground_h / GROUND_BANDS).max(1);
        let shift = (frame / BAND_SCROLL_FRAMES) % 2;
        for i in 0..GROUND_BANDS {
            let color = if (i + shift) % 2 == 0 { ASPHALT } else { SHOULDER };
            let y = area.top_left.y + (horizon + i * band_h) as i32;
            let h = if i == GROUND_BANDS - 1 { ground_h.saturating_sub(i * band_h) } else { band_h };
            Rectangle::new(Point::new(area.top_left.x, y), Size::new(area.size.width, h))
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target)
                .ok();
        }
    }
}
