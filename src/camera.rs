//! Camera frame source.
//!
//! Frame acquisition and decoding live outside this crate. The renderer only
//! needs something that can fill its surface with the current frame, which is
//! what [`CameraView`] describes.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::colors::CAMERA_BACKDROP;

/// Draws the latest camera frame into a region of the surface.
pub trait CameraView {
    fn draw_frame<D>(
        &self,
        target: &mut D,
        area: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>;
}

/// Flat fill used when no video is available.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SolidBackdrop(pub Rgb565);

impl Default for SolidBackdrop {
    fn default() -> Self {
        Self(CAMERA_BACKDROP)
    }
}

impl CameraView for SolidBackdrop {
    fn draw_frame<D>(
        &self,
        target: &mut D,
        area: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        area.into_styled(PrimitiveStyle::with_fill(self.0)).draw(target).ok();
    }
}
