//! Fixed HUD icon set.
//!
//! Icons are 16x16 one-bit masks stored as rows of `u16` (bit 15 is the
//! leftmost pixel). They are scaled by whole pixels and tinted at draw time,
//! so one mask serves every status color and opacity.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

/// Mask edge length in pixels.
pub const ICON_MASK_SIZE: u32 = 16;

/// One-bit icon mask.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IconMask {
    rows: [u16; ICON_MASK_SIZE as usize],
}

impl IconMask {
    pub const fn new(rows: [u16; ICON_MASK_SIZE as usize]) -> Self {
        Self { rows }
    }

    #[inline]
    pub const fn is_set(
        &self,
        col: u32,
        row: u32,
    ) -> bool {
        if col >= ICON_MASK_SIZE || row >= ICON_MASK_SIZE {
            return false;
        }
        self.rows[row as usize] & (1 << (15 - col)) != 0
    }

    /// Draw the mask centered at `center`, scaled to fit within `size` pixels.
    pub fn draw<D>(
        &self,
        target: &mut D,
        center: Point,
        size: u32,
        color: Rgb565,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let scale = (size / ICON_MASK_SIZE).max(1);
        let extent = (ICON_MASK_SIZE * scale) as i32;
        let origin = center - Point::new(extent / 2, extent / 2);
        let style = PrimitiveStyle::with_fill(color);

        for row in 0..ICON_MASK_SIZE {
            for col in 0..ICON_MASK_SIZE {
                if !self.is_set(col, row) {
                    continue;
                }
                let top_left = origin + Point::new((col * scale) as i32, (row * scale) as i32);
                Rectangle::new(top_left, Size::new(scale, scale))
                    .into_styled(style)
                    .draw(target)
                    .ok();
            }
        }
    }
}

// =============================================================================
// Masks
// =============================================================================

/// Steering wheel (engaged / engageable).
pub const WHEEL: IconMask = IconMask::new([
    0b0000_0111_1110_0000,
    0b0001_1000_0001_1000,
    0b0010_0000_0000_0100,
    0b0100_0000_0000_0010,
    0b0100_0000_0000_0010,
    0b1000_0000_0000_0001,
    0b1111_1100_0011_1111,
    0b1000_0011_1100_0001,
    0b1000_0011_1100_0001,
    0b1000_0001_1000_0001,
    0b0100_0001_1000_0010,
    0b0100_0001_1000_0010,
    0b0010_0001_1000_0100,
    0b0001_1001_1001_1000,
    0b0000_0111_1110_0000,
    0b0000_0000_0000_0000,
]);

/// Lightning bolt (experimental mode).
pub const EXPERIMENTAL: IconMask = IconMask::new([
    0b0000_0000_1110_0000,
    0b0000_0001_1100_0000,
    0b0000_0011_1000_0000,
    0b0000_0111_0000_0000,
    0b0000_1110_0000_0000,
    0b0001_1111_1111_0000,
    0b0011_1111_1110_0000,
    0b0000_0001_1100_0000,
    0b0000_0011_1000_0000,
    0b0000_0111_0000_0000,
    0b0000_1110_0000_0000,
    0b0001_1100_0000_0000,
    0b0011_1000_0000_0000,
    0b0011_0000_0000_0000,
    0b0000_0000_0000_0000,
    0b0000_0000_0000_0000,
]);

/// Driver face (driver monitoring).
pub const DRIVER_FACE: IconMask = IconMask::new([
    0b0000_0111_1110_0000,
    0b0001_1000_0001_1000,
    0b0010_0000_0000_0100,
    0b0100_0000_0000_0010,
    0b0100_0110_0110_0010,
    0b1000_0110_0110_0001,
    0b1000_0000_0000_0001,
    0b1000_0001_1000_0001,
    0b1000_0000_0000_0001,
    0b1000_1000_0001_0001,
    0b0100_0111_1110_0010,
    0b0100_0000_0000_0010,
    0b0010_0000_0000_0100,
    0b0001_1000_0001_1000,
    0b0000_0111_1110_0000,
    0b0000_0000_0000_0000,
]);

/// The icons the renderer loads on initialization.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IconSet {
    pub engage: IconMask,
    pub experimental: IconMask,
    pub driver_face: IconMask,
}

impl IconSet {
    pub const fn load() -> Self {
        Self {
            engage: WHEEL,
            experimental: EXPERIMENTAL,
            driver_face: DRIVER_FACE,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
