//! Low-level drawing primitives shared across widgets.
//!
//! # Feature Flags
//!
//! - **`simple-outline`**: Uses 2-pass shadow instead of 8-pass outline for `draw_value_with_outline()`. Reduces draw
//!   calls from 9 to 3 per text, which matters on embedded targets.
//!
//! # Strips
//!
//! Lane lines, edges and the path arrive as `(left, right)` pairs. Each
//! consecutive pair of pairs is a quad, filled as two triangles. The color
//! callback receives the quad's middle row so gradients can vary with height.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Triangle};
use embedded_graphics::text::{Text, TextStyle};

use crate::colors::{BLACK, WHITE};

// =============================================================================
// Text Outline Drawing
// =============================================================================

/// Determine the outline color for a given text color.
///
/// Returns BLACK for light text and WHITE for dark text.
#[inline]
pub fn outline_color_for_text(text_color: Rgb565) -> Rgb565 {
    let raw = text_color.into_storage();
    let r5 = u32::from((raw >> 11) & 0x1F);
    let g6 = u32::from((raw >> 5) & 0x3F);
    let b5 = u32::from(raw & 0x1F);
    let r8 = (r5 << 3) | (r5 >> 2);
    let g8 = (g6 << 2) | (g6 >> 4);
    let b8 = (b5 << 3) | (b5 >> 2);
    let luma = (r8 * 77 + g8 * 150 + b8 * 29) >> 8;

    if luma >= 128 { BLACK } else { WHITE }
}

/// Draw text with a contrasting outline so it stays readable over video.
///
/// # Performance Modes
///
/// - **Default**: Full 8-direction outline (9 draw calls per text)
/// - **`simple-outline` feature**: 2-direction shadow (3 draw calls per text)
pub fn draw_value_with_outline<D>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    text_color: Rgb565,
    text_style: TextStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let outline_color = outline_color_for_text(text_color);
    let outline_char_style = MonoTextStyle::new(font, outline_color);
    let main_char_style = MonoTextStyle::new(font, text_color);

    #[cfg(feature = "simple-outline")]
    const OFFSETS: [(i32, i32); 2] = [(1, 1), (1, 0)];

    #[cfg(not(feature = "simple-outline"))]
    const OFFSETS: [(i32, i32); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1), // top row
        (-1, 0),
        (1, 0), // middle row (skip center)
        (-1, 1),
        (0, 1),
        (1, 1), // bottom row
    ];

    for (dx, dy) in OFFSETS {
        let offset_pos = Point::new(position.x + dx, position.y + dy);
        Text::with_text_style(text, offset_pos, outline_char_style, text_style)
            .draw(display)
            .ok();
    }

    Text::with_text_style(text, position, main_char_style, text_style)
        .draw(display)
        .ok();
}

/// Draw plain text without an outline (text on opaque backgrounds).
#[inline]
pub fn draw_text<D>(
    display: &mut D,
    text: &str,
    position: Point,
    style: MonoTextStyle<'_, Rgb565>,
    text_style: TextStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(text, position, style, text_style).draw(display).ok();
}

// =============================================================================
// Shapes
// =============================================================================

/// Fill a triangle given as three points.
#[inline]
pub fn fill_triangle<D>(
    display: &mut D,
    points: [Point; 3],
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Triangle::new(points[0], points[1], points[2])
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Fill a strip of `(left, right)` pairs as consecutive quads.
pub fn fill_strip<D, F>(
    display: &mut D,
    edges: &[(Point, Point)],
    color_fn: F,
) where
    D: DrawTarget<Color = Rgb565>,
    F: Fn(i32) -> Rgb565,
{
    for pair in edges.windows(2) {
        let (l0, r0) = pair[0];
        let (l1, r1) = pair[1];
        let color = color_fn((l0.y + l1.y) / 2);
        fill_triangle(display, [l0, r0, r1], color);
        fill_triangle(display, [l0, r1, l1], color);
    }
}

/// Filled disc with an optional outline ring.
pub fn draw_disc<D>(
    display: &mut D,
    center: Point,
    diameter: u32,
    fill: Rgb565,
    ring: Option<(Rgb565, u32)>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = match ring {
        Some((color, width)) => PrimitiveStyleBuilder::new()
            .fill_color(fill)
            .stroke_color(color)
            .stroke_width(width)
            .build(),
        None => PrimitiveStyle::with_fill(fill),
    };
    Circle::with_center(center, diameter).into_styled(style).draw(display).ok();
}

/// Straight line segment.
#[inline]
pub fn draw_line<D>(
    display: &mut D,
    from: Point,
    to: Point,
    color: Rgb565,
    width: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(from, to)
        .into_styled(PrimitiveStyle::with_stroke(color, width))
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::SIGN_RED;
    use crate::styles::{CENTERED, UNIT_FONT};
    use crate::testing::Framebuffer;
    use embedded_graphics::primitives::Rectangle;

    #[test]
    fn test_outline_color_contrast() {
        assert_eq!(outline_color_for_text(WHITE), BLACK);
        assert_eq!(outline_color_for_text(BLACK), WHITE);
    }

    #[test]
    fn test_outlined_text_draws_both_colors() {
        let mut fb = Framebuffer::new(Size::new(80, 40), SIGN_RED);
        draw_value_with_outline(&mut fb, "65", Point::new(40, 25), UNIT_FONT, WHITE, CENTERED);
        assert!(fb.count(WHITE) > 0);
        assert!(fb.count(BLACK) > 0, "outline pass must leave contrasting pixels");
    }

    #[test]
    fn test_fill_strip_covers_interior() {
        let mut fb = Framebuffer::new(Size::new(40, 40), BLACK);
        let edges = [
            (Point::new(5, 30), Point::new(35, 30)),
            (Point::new(10, 10), Point::new(30, 10)),
        ];
        fill_strip(&mut fb, &edges, |_| WHITE);
        assert_eq!(fb.pixel(Point::new(20, 20)), Some(WHITE));
        assert_eq!(fb.pixel(Point::new(2, 20)), Some(BLACK), "outside the quad untouched");
    }

    #[test]
    fn test_fill_strip_single_pair_draws_nothing() {
        let mut fb = Framebuffer::new(Size::new(20, 20), BLACK);
        fill_strip(&mut fb, &[(Point::new(2, 2), Point::new(18, 2))], |_| WHITE);
        assert_eq!(fb.count_in(Rectangle::new(Point::zero(), Size::new(20, 20)), WHITE), 0);
    }
}
