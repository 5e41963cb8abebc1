//! Test support: an in-memory draw target and canned geometry.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{CAMERA_HEIGHT_M, TRAJECTORY_SIZE};
use crate::state::{LaneGeometry, LaneLine, RoadEdge, RoadPoint, Trajectory};

/// Plain Rgb565 framebuffer. Out-of-bounds pixels are discarded.
pub struct Framebuffer {
    size: Size,
    pixels: std::vec::Vec<Rgb565>,
}

impl Framebuffer {
    pub fn new(
        size: Size,
        fill: Rgb565,
    ) -> Self {
        Self {
            size,
            pixels: std::vec![fill; (size.width * size.height) as usize],
        }
    }

    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb565> {
        self.index(point).map(|i| self.pixels[i])
    }

    /// Number of pixels of `color` inside `area`.
    pub fn count_in(
        &self,
        area: Rectangle,
        color: Rgb565,
    ) -> usize {
        area.points().filter(|p| self.pixel(*p) == Some(color)).count()
    }

    /// Number of pixels of `color` anywhere.
    pub fn count(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels.iter().filter(|c| **c == color).count()
    }

    fn index(
        &self,
        point: Point,
    ) -> Option<usize> {
        let in_bounds = point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.size.width
            && (point.y as u32) < self.size.height;
        in_bounds.then(|| point.y as usize * self.size.width as usize + point.x as usize)
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}

/// Model-style longitudinal sample positions (m), denser near the car.
fn sample_x(i: usize) -> f32 {
    let t = i as f32 / (TRAJECTORY_SIZE - 1) as f32;
    192.0 * t * t
}

fn line_at(
    y: f32,
    z: f32,
) -> Trajectory {
    let mut points = Trajectory::new();
    for i in 0..TRAJECTORY_SIZE {
        points.push(RoadPoint::new(sample_x(i), y, z)).ok();
    }
    points
}

/// Straight three-lane road: four lane lines, two edges, centered path.
pub fn straight_road() -> LaneGeometry {
    let mut road = LaneGeometry::default();
    for (y, prob) in [(-5.55, 0.5), (-1.85, 0.9), (1.85, 0.9), (5.55, 0.5)] {
        road.lane_lines
            .push(LaneLine {
                points: line_at(y, CAMERA_HEIGHT_M),
                prob,
            })
            .ok();
    }
    for y in [-7.4, 7.4] {
        road.road_edges
            .push(RoadEdge {
                points: line_at(y, CAMERA_HEIGHT_M),
                std: 0.3,
            })
            .ok();
    }
    road.path = line_at(0.0, 0.0);
    road
}
