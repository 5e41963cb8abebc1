//! Onroad renderer: camera view plus everything drawn over it.
//!
//! # Update vs Paint
//!
//! [`OnroadRenderer::update_state`] runs on every snapshot and rebuilds the
//! [`DerivedDisplayProperties`] bundle in one go. [`OnroadRenderer::paint`]
//! runs on the surface's own cadence and only reads that bundle, plus the
//! wall-clock driven [`AnimationState`]. Neither waits on the other; the most
//! recent snapshot wins.
//!
//! Paint order: camera frame, lane overlay, lead markers, HUD, scanner.
//!
//! All drawing is in surface-local coordinates (`0,0` is the top-left of the
//! onroad area). The compositor translates and clips the target.

use core::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info, warn};

use crate::animations::AnimationState;
use crate::camera::CameraView;
use crate::derived::{DerivedDisplayProperties, SpeedMemory};
use crate::icons::IconSet;
use crate::state::VehicleDisplayState;
use crate::status::Status;
use crate::widgets::{draw_hud, draw_lane_overlay, draw_lead_markers, draw_scanner};

pub struct OnroadRenderer<C> {
    camera: C,
    icons: Option<IconSet>,
    size: Size,
    /// Last snapshot, kept so a layout change can re-project it.
    state: Option<VehicleDisplayState>,
    derived: Option<DerivedDisplayProperties>,
    speed: SpeedMemory,
    animation: AnimationState,
    /// Last unknown status code reported, to log each change once.
    unknown_status: Option<i32>,
    needs_redraw: bool,
}

impl<C: CameraView> OnroadRenderer<C> {
    pub fn new(
        camera: C,
        size: Size,
    ) -> Self {
        Self {
            camera,
            icons: None,
            size,
            state: None,
            derived: None,
            speed: SpeedMemory::default(),
            animation: AnimationState::new(),
            unknown_status: None,
            needs_redraw: true,
        }
    }

    /// Load the fixed icon set. Until called, icons are skipped.
    pub fn initialize(&mut self) {
        if self.icons.is_none() {
            self.icons = Some(IconSet::load());
            info!("onroad icons loaded");
        }
    }

    /// Resize the drawing surface. Geometry is re-projected for the new size.
    pub fn set_area(
        &mut self,
        size: Size,
    ) {
        if self.size == size {
            return;
        }
        debug!("onroad area {}x{}", size.width, size.height);
        self.size = size;
        if let Some(state) = self.state.take() {
            self.derived = Some(DerivedDisplayProperties::derive(&state, &mut self.speed, size));
            self.state = Some(state);
        }
        self.needs_redraw = true;
    }

    /// Recompute all derived properties from a new snapshot.
    pub fn update_state(
        &mut self,
        state: &VehicleDisplayState,
    ) {
        self.report_status(state.status);
        self.derived = Some(DerivedDisplayProperties::derive(state, &mut self.speed, self.size));
        self.state = Some(state.clone());
        self.needs_redraw = true;
    }

    fn report_status(
        &mut self,
        raw: i32,
    ) {
        match Status::try_from_raw(raw) {
            Ok(_) => self.unknown_status = None,
            Err(reason) => {
                if self.unknown_status != Some(raw) {
                    warn!("{reason}, drawing as disengaged");
                    self.unknown_status = Some(raw);
                }
            }
        }
    }

    /// Draw one frame at wall-clock time `now`.
    pub fn paint<D>(
        &mut self,
        target: &mut D,
        now: Duration,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let elapsed = self.animation.tick(now);
        self.needs_redraw = false;

        self.camera.draw_frame(target, Rectangle::new(Point::zero(), self.size));

        let Some(derived) = &self.derived else {
            return;
        };

        draw_lane_overlay(target, &derived.lanes, self.size);
        draw_lead_markers(target, &derived.leads);
        draw_hud(target, &derived.hud, self.icons.as_ref(), self.size);

        let scanner = self.animation.scanner(elapsed);
        draw_scanner(target, &scanner, derived.status_color(), self.size);
    }

    /// Drop all session state. Nothing from before the reset is drawable.
    pub fn reset(&mut self) {
        self.state = None;
        self.derived = None;
        self.speed.reset();
        self.animation.reset();
        self.unknown_status = None;
        self.needs_redraw = true;
        debug!("onroad renderer reset");
    }

    #[inline]
    pub const fn derived(&self) -> Option<&DerivedDisplayProperties> {
        self.derived.as_ref()
    }

    /// Set by updates and resets, cleared by paint.
    #[inline]
    pub const fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub const fn animation(&self) -> &AnimationState {
        &self.animation
    }

    #[inline]
    pub const fn camera(&self) -> &C {
        &self.camera
    }

    #[inline]
    pub const fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
