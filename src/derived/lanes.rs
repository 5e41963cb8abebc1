//! Lane line, road edge and driving path polygons.
//!
//! Every model line is widened sideways in the calibrated frame and both
//! sides are projected point by point. A point is kept only if both sides
//! project; the result is a strip of `(left, right)` pairs that the widget
//! fills as consecutive quads.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;

use crate::colors::{
    PATH_EXPERIMENTAL, PATH_FAR, PATH_NEAR, ROAD_EDGE, WHITE, blend, over_camera,
};
use crate::config::{
    CAMERA_HEIGHT_M, LANE_LINE_COUNT, MAX_DRAW_DISTANCE_M, MIN_DRAW_DISTANCE_M, ROAD_EDGE_COUNT, TRAJECTORY_SIZE,
};
use crate::projection::Projection;
use crate::state::{LaneGeometry, Trajectory};

/// Lane line half-width per unit of detection probability (m).
const LANE_LINE_HALF_WIDTH_M: f32 = 0.025;

/// Road edge half-width (m).
const ROAD_EDGE_HALF_WIDTH_M: f32 = 0.025;

/// Driving path half-width (m).
const PATH_HALF_WIDTH_M: f32 = 0.9;

/// Maximum lane line opacity.
const LANE_LINE_MAX_ALPHA: f32 = 0.7;

/// Path opacity at the bottom of the surface; fades to zero at the top.
const PATH_BASE_ALPHA: f32 = 0.4;

/// Strips fainter than this are not drawn.
const MIN_VISIBLE_ALPHA: f32 = 0.01;

/// Projected strip, nearest pair first.
pub type StripEdges = Vec<(Point, Point), TRAJECTORY_SIZE>;

/// Uniformly colored strip (lane line or road edge).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LaneStrip {
    pub edges: StripEdges,
    pub color: Rgb565,
}

/// Driving path with a vertical gradient.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PathStrip {
    pub edges: StripEdges,
    pub near: Rgb565,
    pub far: Rgb565,
}

impl PathStrip {
    /// Pre-blended path color at surface row `y`.
    pub fn color_at(
        &self,
        y: i32,
        height: u32,
    ) -> Rgb565 {
        let t = if height == 0 { 0.0 } else { (y as f32 / height as f32).clamp(0.0, 1.0) };
        over_camera(blend(self.far, self.near, t), PATH_BASE_ALPHA * t)
    }
}

/// Everything the lane overlay draws.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LaneOverlay {
    pub lines: Vec<LaneStrip, LANE_LINE_COUNT>,
    pub edges: Vec<LaneStrip, ROAD_EDGE_COUNT>,
    pub path: Option<PathStrip>,
}

impl LaneOverlay {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.edges.is_empty() && self.path.is_none()
    }
}

/// How far ahead the overlay is drawn (m).
///
/// Lines use the path length clamped to the draw window. The path itself is
/// additionally cut short in front of a lead at `d`: `2d - min(0.7d, 10)`.
pub fn draw_distances(
    path: &Trajectory,
    lead_distance: Option<f32>,
) -> (f32, f32) {
    let line_max = path
        .last()
        .map(|p| p.x)
        .filter(|x| x.is_finite())
        .unwrap_or(MAX_DRAW_DISTANCE_M)
        .clamp(MIN_DRAW_DISTANCE_M, MAX_DRAW_DISTANCE_M);

    let path_max = match lead_distance {
        Some(d) if d.is_finite() => {
            let lead_d = d * 2.0;
            (lead_d - (lead_d * 0.35).min(10.0)).clamp(0.0, line_max)
        }
        _ => line_max,
    };
    (line_max, path_max)
}

/// Project one model line into a strip.
pub fn map_line_to_strip(
    line: &Trajectory,
    half_width: f32,
    z_offset: f32,
    max_distance: f32,
    projection: &Projection,
) -> StripEdges {
    let mut edges = StripEdges::new();
    if !half_width.is_finite() {
        return edges;
    }
    for point in line.iter().filter(|p| p.x >= 0.0 && p.x <= max_distance) {
        let z = point.z + z_offset;
        let left = projection.project_xyz(point.x, point.y - half_width, z);
        let right = projection.project_xyz(point.x, point.y + half_width, z);
        if let (Ok(left), Ok(right)) = (left, right) {
            edges.push((left, right)).ok();
        }
    }
    edges
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Build the overlay from raw geometry.
pub fn derive_lanes(
    lanes: &LaneGeometry,
    lead_distance: Option<f32>,
    experimental: bool,
    projection: &Projection,
) -> LaneOverlay {
    let mut overlay = LaneOverlay::default();
    if lanes.is_empty() {
        return overlay;
    }
    let (line_max, path_max) = draw_distances(&lanes.path, lead_distance);

    for line in &lanes.lane_lines {
        let prob = sanitize(line.prob).clamp(0.0, 1.0);
        let alpha = prob.min(LANE_LINE_MAX_ALPHA);
        if alpha < MIN_VISIBLE_ALPHA {
            continue;
        }
        let edges = map_line_to_strip(&line.points, LANE_LINE_HALF_WIDTH_M * prob, 0.0, line_max, projection);
        if edges.len() >= 2 {
            overlay
                .lines
                .push(LaneStrip {
                    edges,
                    color: over_camera(WHITE, alpha),
                })
                .ok();
        }
    }

    for edge in &lanes.road_edges {
        let alpha = (1.0 - sanitize(edge.std)).clamp(0.0, 1.0);
        if alpha < MIN_VISIBLE_ALPHA {
            continue;
        }
        let edges = map_line_to_strip(&edge.points, ROAD_EDGE_HALF_WIDTH_M, 0.0, line_max, projection);
        if edges.len() >= 2 {
            overlay
                .edges
                .push(LaneStrip {
                    edges,
                    color: over_camera(ROAD_EDGE, alpha),
                })
                .ok();
        }
    }

    let path_edges = map_line_to_strip(&lanes.path, PATH_HALF_WIDTH_M, CAMERA_HEIGHT_M, path_max, projection);
    if path_edges.len() >= 2 {
        let (near, far) = if experimental {
            (PATH_EXPERIMENTAL, PATH_EXPERIMENTAL)
        } else {
            (PATH_NEAR, PATH_FAR)
        };
        overlay.path = Some(PathStrip {
            edges: path_edges,
            near,
            far,
        });
    }

    overlay
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::CAMERA_BACKDROP;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::state::RoadPoint;
    use crate::testing::straight_road;

    fn projection() -> Projection {
        Projection::for_size(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
    }

    fn path_to(length: f32) -> Trajectory {
        let mut t = Trajectory::new();
        for i in 0..TRAJECTORY_SIZE {
            let x = length * i as f32 / (TRAJECTORY_SIZE - 1) as f32;
            t.push(RoadPoint::new(x, 0.0, 0.0)).unwrap();
        }
        t
    }

    #[test]
    fn test_empty_geometry_draws_nothing() {
        let overlay = derive_lanes(&LaneGeometry::default(), None, false, &projection());
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_straight_road_produces_all_strips() {
        let overlay = derive_lanes(&straight_road(), None, false, &projection());
        assert_eq!(overlay.lines.len(), 4);
        assert_eq!(overlay.edges.len(), 2);
        assert!(overlay.path.is_some());
    }

    #[test]
    fn test_draw_distance_clamped() {
        assert_eq!(draw_distances(&path_to(5.0), None), (MIN_DRAW_DISTANCE_M, MIN_DRAW_DISTANCE_M));
        assert_eq!(draw_distances(&path_to(300.0), None), (MAX_DRAW_DISTANCE_M, MAX_DRAW_DISTANCE_M));
        assert_eq!(draw_distances(&Trajectory::new(), None).0, MAX_DRAW_DISTANCE_M);
    }

    #[test]
    fn test_lead_shortens_path_only() {
        let (line_max, path_max) = draw_distances(&path_to(100.0), Some(20.0));
        assert_eq!(line_max, 100.0);
        assert_eq!(path_max, 30.0, "2d - min(0.7d, 10) for d = 20");

        let (_, close) = draw_distances(&path_to(100.0), Some(5.0));
        assert_eq!(close, 6.5);
    }

    #[test]
    fn test_invisible_lines_skipped() {
        let mut road = straight_road();
        for line in road.lane_lines.iter_mut() {
            line.prob = 0.0;
        }
        for edge in road.road_edges.iter_mut() {
            edge.std = 1.5;
        }
        let overlay = derive_lanes(&road, None, false, &projection());
        assert!(overlay.lines.is_empty());
        assert!(overlay.edges.is_empty());
        assert!(overlay.path.is_some(), "path does not depend on line confidence");
    }

    #[test]
    fn test_non_finite_points_skipped() {
        let mut road = straight_road();
        road.lane_lines[1].points[10].y = f32::NAN;
        let clean = derive_lanes(&straight_road(), None, false, &projection());
        let dirty = derive_lanes(&road, None, false, &projection());
        assert_eq!(dirty.lines[1].edges.len() + 1, clean.lines[1].edges.len());
    }

    #[test]
    fn test_experimental_path_color() {
        let overlay = derive_lanes(&straight_road(), None, true, &projection());
        let path = overlay.path.unwrap();
        assert_eq!(path.near, PATH_EXPERIMENTAL);
    }

    #[test]
    fn test_path_fades_toward_horizon() {
        let strip = PathStrip {
            edges: StripEdges::new(),
            near: PATH_NEAR,
            far: PATH_FAR,
        };
        assert_eq!(strip.color_at(0, 100), CAMERA_BACKDROP, "fully transparent at the top");
        assert_ne!(strip.color_at(100, 100), CAMERA_BACKDROP);
    }

    #[test]
    fn test_strip_pairs_are_left_of_right() {
        let overlay = derive_lanes(&straight_road(), None, false, &projection());
        for (left, right) in overlay.path.unwrap().edges {
            assert!(left.x <= right.x);
        }
    }
}
