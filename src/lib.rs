// Crate-level lints: Allow common embedded/graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::struct_excessive_bools)] // VehicleDisplayState mirrors the feed's flags
#![allow(clippy::similar_names)] // l0/r0, l1/r1 strip corners are clear
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(not(test), no_std)]

//! Onroad driving HUD.
//!
//! Draws the in-car view: camera frame, lane lines and road edges, the
//! planned path, lead-vehicle markers, the speed/set-speed/limit HUD, status
//! icons, a status scanner and an alert banner, framed by a border in the
//! engagement status color.
//!
//! # Pipeline
//!
//! ```text
//! UiSnapshot ─► OnroadCompositor ─┬─► AlertBanner            (alert)
//!                                 └─► OnroadRenderer         (vehicle)
//!                                        │ update_state
//!                                        ▼
//!                              DerivedDisplayProperties
//!                                        │ paint(now)
//!                                        ▼
//!                       camera ► lanes ► leads ► HUD ► scanner
//! ```
//!
//! Everything is drawn through `embedded-graphics` into any
//! `DrawTarget<Color = Rgb565>`. Per-frame storage is fixed-capacity
//! (`heapless`), so the core builds for `no_std` targets.
//!
//! # Logging
//!
//! Through the `log` facade: `info!` on initialization and mode changes,
//! `debug!` when one element is degraded, `warn!` for unknown status codes
//! and slow paint rates. Installing a logger is up to the application.

pub mod alerts;
pub mod animations;
pub mod camera;
pub mod colors;
pub mod compositor;
pub mod config;
pub mod derived;
pub mod error;
pub mod icons;
pub mod projection;
pub mod renderer;
pub mod state;
pub mod status;
pub mod styles;
pub mod widgets;

#[cfg(test)]
mod testing;

pub use alerts::AlertBanner;
pub use camera::{CameraView, SolidBackdrop};
pub use compositor::{Layout, MapPanel, OnroadCompositor, OperatingMode, TapEvent, TapTarget};
pub use derived::DerivedDisplayProperties;
pub use error::DegradeReason;
pub use renderer::OnroadRenderer;
pub use state::{
    AdvisoryOverlay, Alert, AlertSize, AlertStatus, DashboardHand, LaneGeometry, LaneLine, LeadObservation, RoadEdge, RoadPoint,
    SpeedLimit, Trajectory, UiSnapshot, VehicleDisplayState,
};
pub use status::Status;
