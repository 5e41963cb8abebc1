//! Onroad compositor: border, optional map split, renderer and alert banner.
//!
//! # Layout
//!
//! ```text
//! +--------------------------------------------+  <- frame (status border)
//! | +-----------------+----------------------+ |
//! | |                 |                      | |
//! | |   map panel     |   onroad renderer    | |
//! | |  (when visible) |                      | |
//! | |                 |======================| |  <- alert banner
//! | +-----------------+----------------------+ |
//! +--------------------------------------------+
//! ```
//!
//! Without a visible map the renderer takes the whole content area.
//!
//! # Modes
//!
//! `Offroad` ignores snapshots and paints [`IDLE_GRAY`]. Every transition
//! resets the renderer and clears the banner, so nothing from the previous
//! session can be painted afterwards.

use core::time::Duration;

use embedded_graphics::draw_target::DrawTargetExt;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use log::info;

use crate::alerts::{AlertBanner, banner_color};
use crate::camera::CameraView;
use crate::colors::IDLE_GRAY;
use crate::config::{BORDER_SIZE, MAP_PANEL_FRACTION_DEN, MAP_PANEL_FRACTION_NUM};
use crate::renderer::OnroadRenderer;
use crate::state::UiSnapshot;
use crate::status::Status;

/// Map widget owned by the application shell.
pub trait MapPanel {
    fn is_visible(&self) -> bool;
}

/// Tap forwarded to the shell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TapEvent {
    pub point: Point,
    pub map_visible: bool,
}

/// Receiver of forwarded taps.
pub trait TapTarget {
    fn tapped(
        &mut self,
        event: TapEvent,
    );
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OperatingMode {
    Onroad,
    #[default]
    Offroad,
}

/// Absolute rectangles of each region for the current frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    pub frame: Rectangle,
    pub content: Rectangle,
    pub map: Option<Rectangle>,
    pub onroad: Rectangle,
}

pub struct OnroadCompositor<'m, C> {
    area: Rectangle,
    map: Option<&'m dyn MapPanel>,
    renderer: OnroadRenderer<C>,
    banner: AlertBanner,
    mode: OperatingMode,
    status: Status,
}

impl<'m, C: CameraView> OnroadCompositor<'m, C> {
    pub fn new(
        camera: C,
        area: Rectangle,
        map: Option<&'m dyn MapPanel>,
    ) -> Self {
        let mut compositor = Self {
            area,
            map,
            renderer: OnroadRenderer::new(camera, Size::zero()),
            banner: AlertBanner::new(),
            mode: OperatingMode::Offroad,
            status: Status::Disengaged,
        };
        let onroad = compositor.layout().onroad;
        compositor.renderer.set_area(onroad.size);
        compositor
    }

    pub fn initialize(&mut self) {
        self.renderer.initialize();
    }

    /// Route a snapshot: alert to the banner, everything else to the renderer.
    pub fn update_state(
        &mut self,
        snapshot: &UiSnapshot,
    ) {
        if self.mode == OperatingMode::Offroad {
            return;
        }
        self.status = Status::from_raw(snapshot.vehicle.status);
        let alert = &snapshot.alert;
        self.banner
            .update_alert(alert.clone(), banner_color(alert.status, self.status));
        self.renderer.update_state(&snapshot.vehicle);
    }

    /// Enter (`true`) or leave (`false`) the offroad mode.
    pub fn offroad_transition(
        &mut self,
        offroad: bool,
    ) {
        let next = if offroad { OperatingMode::Offroad } else { OperatingMode::Onroad };
        self.renderer.reset();
        self.banner.clear();
        self.status = Status::Disengaged;
        if next != self.mode {
            info!("onroad view {:?} -> {:?}", self.mode, next);
        }
        self.mode = next;
    }

    pub fn is_map_visible(&self) -> bool {
        self.map.is_some_and(|map| map.is_visible())
    }

    pub fn layout(&self) -> Layout {
        let frame = self.area;
        let content = frame.offset(-(BORDER_SIZE as i32));

        if !self.is_map_visible() {
            return Layout {
                frame,
                content,
                map: None,
                onroad: content,
            };
        }

        let map_w = content.size.width * MAP_PANEL_FRACTION_NUM / MAP_PANEL_FRACTION_DEN;
        let map = Rectangle::new(content.top_left, Size::new(map_w, content.size.height));
        let onroad = Rectangle::new(
            content.top_left + Point::new(map_w as i32, 0),
            Size::new(content.size.width - map_w, content.size.height),
        );
        Layout {
            frame,
            content,
            map: Some(map),
            onroad,
        }
    }

    /// Draw the composited view. The map region is left to the map panel.
    pub fn paint<D>(
        &mut self,
        target: &mut D,
        now: Duration,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.mode == OperatingMode::Offroad {
            self.area
                .into_styled(PrimitiveStyle::with_fill(IDLE_GRAY))
                .draw(target)
                .ok();
            return;
        }

        let layout = self.layout();
        self.renderer.set_area(layout.onroad.size);

        let border = PrimitiveStyleBuilder::new()
            .stroke_color(self.status.color())
            .stroke_width(BORDER_SIZE)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        layout.frame.into_styled(border).draw(target).ok();

        {
            let mut clipped = target.clipped(&layout.onroad);
            let mut local = clipped.translated(layout.onroad.top_left);
            self.renderer.paint(&mut local, now);
        }

        self.banner.paint(target, layout.onroad);
    }

    /// Forward a tap inside the composited area. Returns whether it was taken.
    pub fn pointer_pressed<T>(
        &self,
        point: Point,
        target: &mut T,
    ) -> bool
    where
        T: TapTarget + ?Sized,
    {
        if self.mode != OperatingMode::Onroad || !self.area.contains(point) {
            return false;
        }
        target.tapped(TapEvent {
            point,
            map_visible: self.is_map_visible(),
        });
        true
    }

    pub fn set_area(
        &mut self,
        area: Rectangle,
    ) {
        self.area = area;
        let onroad = self.layout().onroad;
        self.renderer.set_area(onroad.size);
    }

    #[inline]
    pub const fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Status of the latest snapshot, fail-closed.
    #[inline]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub const fn renderer(&self) -> &OnroadRenderer<C> {
        &self.renderer
    }

    #[inline]
    pub const fn banner(&self) -> &AlertBanner {
        &self.banner
    }

    #[inline]
    pub const fn area(&self) -> Rectangle {
        self.area
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
