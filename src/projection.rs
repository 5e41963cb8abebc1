//! Calibrated-frame to screen projection.
//!
//! A pinhole model over the onroad surface: `x` is depth, `y` maps to screen
//! columns and `z` to screen rows. The focal length and horizon are fixed
//! fractions of the surface size, so geometry follows the surface when the
//! layout changes (map shown or hidden).

use embedded_graphics::prelude::*;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::{CLIP_MARGIN_PX, FOCAL_WIDTH_RATIO, HORIZON_HEIGHT_RATIO};
use crate::error::DegradeReason;
use crate::state::RoadPoint;

/// Points closer than this to the camera plane are not projected (m).
const MIN_DEPTH_M: f32 = 1e-3;

/// Projection for one surface size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    focal: f32,
    cx: f32,
    cy: f32,
    width: f32,
    height: f32,
}

impl Projection {
    pub fn for_size(size: Size) -> Self {
        let width = size.width as f32;
        let height = size.height as f32;
        Self {
            focal: width * FOCAL_WIDTH_RATIO,
            cx: width / 2.0,
            cy: height * HORIZON_HEIGHT_RATIO,
            width,
            height,
        }
    }

    /// Sub-pixel surface position of a calibrated-frame coordinate, without
    /// any bounds check.
    ///
    /// Fails only for non-finite input and points at or behind the camera
    /// plane. Callers that clamp to the surface themselves use this directly.
    pub fn project_unclamped(
        &self,
        x: f32,
        y: f32,
        z: f32,
    ) -> Result<(f32, f32), DegradeReason> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(DegradeReason::NonFinite("projection input"));
        }
        if x <= MIN_DEPTH_M {
            return Err(DegradeReason::BehindCamera(x));
        }

        let u = self.focal.mul_add(y / x, self.cx);
        let v = self.focal.mul_add(z / x, self.cy);
        Ok((u, v))
    }

    /// Project a calibrated-frame coordinate to a surface pixel.
    ///
    /// Fails for non-finite input, points at or behind the camera plane, and
    /// points landing more than [`CLIP_MARGIN_PX`] outside the surface.
    pub fn project_xyz(
        &self,
        x: f32,
        y: f32,
        z: f32,
    ) -> Result<Point, DegradeReason> {
        let (u, v) = self.project_unclamped(x, y, z)?;

        let margin = CLIP_MARGIN_PX as f32;
        if u < -margin || u > self.width + margin || v < -margin || v > self.height + margin {
            return Err(DegradeReason::OffSurface);
        }

        Ok(Point::new(u.round() as i32, v.round() as i32))
    }

    #[inline]
    pub fn project(
        &self,
        point: RoadPoint,
    ) -> Result<Point, DegradeReason> {
        self.project_xyz(point.x, point.y, point.z)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
