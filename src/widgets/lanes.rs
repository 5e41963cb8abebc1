//! Lane overlay: lane lines, road edges and the driving path.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::primitives::fill_strip;
use crate::derived::LaneOverlay;

/// Draw the overlay. Path first so lines stay visible on top of it.
pub fn draw_lane_overlay<D>(
    display: &mut D,
    overlay: &LaneOverlay,
    area: Size,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if let Some(path) = &overlay.path {
        fill_strip(display, &path.edges, |y| path.color_at(y, area.height));
    }
    for line in &overlay.lines {
        fill_strip(display, &line.edges, |_| line.color);
    }
    for edge in &overlay.edges {
        fill_strip(display, &edge.edges, |_| edge.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{CAMERA_BACKDROP, WHITE, over_camera};
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::derived::lanes::derive_lanes;
    use crate::projection::Projection;
    use crate::state::LaneGeometry;
    use crate::testing::{Framebuffer, straight_road};

    const AREA: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    #[test]
    fn test_empty_overlay_leaves_camera_untouched() {
        let overlay = derive_lanes(&LaneGeometry::default(), None, false, &Projection::for_size(AREA));
        let mut fb = Framebuffer::new(AREA, CAMERA_BACKDROP);
        draw_lane_overlay(&mut fb, &overlay, AREA);
        assert_eq!(fb.count(CAMERA_BACKDROP), (AREA.width * AREA.height) as usize);
    }

    #[test]
    fn test_straight_road_draws_lines_and_path() {
        let overlay = derive_lanes(&straight_road(), None, false, &Projection::for_size(AREA));
        let mut fb = Framebuffer::new(AREA, CAMERA_BACKDROP);
        draw_lane_overlay(&mut fb, &overlay, AREA);

        assert!(fb.count(over_camera(WHITE, 0.7)) > 0, "confident lane lines drawn");
        let below_horizon = Point::new((AREA.width / 2) as i32, (AREA.height - 10) as i32);
        assert_ne!(fb.pixel(below_horizon), Some(CAMERA_BACKDROP), "path covers the road ahead");
    }
}
