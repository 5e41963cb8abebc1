//! Status scanner: a band sweeping along the bottom edge of the view.
//!
//! The head is drawn in the full status color; trail segments behind it fade
//! toward the camera backdrop.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::animations::ScannerFrame;
use crate::colors::over_camera;
use crate::config::SCANNER_HEIGHT;

/// Head width as a fraction of the surface width.
const HEAD_WIDTH_DIVISOR: u32 = 8;

/// Horizontal span of the head for a sweep position.
pub fn head_rect(
    position: f32,
    area: Size,
) -> Rectangle {
    let head_w = (area.width / HEAD_WIDTH_DIVISOR).max(1);
    let travel = area.width.saturating_sub(head_w) as f32;
    let x = (position.clamp(0.0, 1.0) * travel) as i32;
    let y = area.height.saturating_sub(SCANNER_HEIGHT) as i32;
    Rectangle::new(Point::new(x, y), Size::new(head_w, SCANNER_HEIGHT.min(area.height)))
}

pub fn draw_scanner<D>(
    display: &mut D,
    frame: &ScannerFrame,
    color: Rgb565,
    area: Size,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let steps = frame.trail.len() + 1;
    // oldest first so newer segments overdraw
    for (k, position) in frame.trail.iter().enumerate().rev() {
        let alpha = 1.0 - (k + 1) as f32 / steps as f32;
        head_rect(*position, area)
            .into_styled(PrimitiveStyle::with_fill(over_camera(color, alpha)))
            .draw(display)
            .ok();
    }
    head_rect(frame.head, area)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::CAMERA_BACKDROP;
    use crate::status::Status;
    use crate::testing::Framebuffer;
    use heapless::Vec;

    const AREA: Size = Size::new(200, 100);

    #[test]
    fn test_head_spans_sweep() {
        assert_eq!(head_rect(0.0, AREA).top_left.x, 0);
        let right = head_rect(1.0, AREA);
        assert_eq!(right.top_left.x + right.size.width as i32, AREA.width as i32);
        assert_eq!(right.top_left.y, (AREA.height - SCANNER_HEIGHT) as i32);
    }

    #[test]
    fn test_head_in_status_color() {
        let color = Status::Engaged.color();
        let frame = ScannerFrame {
            head: 0.5,
            trail: Vec::new(),
        };
        let mut fb = Framebuffer::new(AREA, CAMERA_BACKDROP);
        draw_scanner(&mut fb, &frame, color, AREA);
        let head = head_rect(0.5, AREA);
        assert_eq!(fb.count_in(head, color), (head.size.width * head.size.height) as usize);
    }

    #[test]
    fn test_trail_fades() {
        let color = Status::Engaged.color();
        let mut trail = Vec::new();
        trail.push(0.2).unwrap();
        let frame = ScannerFrame { head: 0.9, trail };
        let mut fb = Framebuffer::new(AREA, CAMERA_BACKDROP);
        draw_scanner(&mut fb, &frame, color, AREA);
        let trail_px = fb.pixel(head_rect(0.2, AREA).center()).unwrap();
        assert_ne!(trail_px, color, "trail is dimmer than the head");
        assert_ne!(trail_px, CAMERA_BACKDROP);
    }
}
