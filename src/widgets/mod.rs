//! Widget components for the onroad view.
//!
//! - [`hud`]: speed, set-speed box, limit sign and round icons
//! - [`lanes`]: lane lines, road edges and the driving path
//! - [`leads`]: lead chevrons, lock-on brackets and connector
//! - [`scanner`]: status-colored sweep along the bottom edge
//! - [`primitives`]: shared low-level drawing utilities
//!
//! Widgets draw exactly what the derived properties describe. They are
//! generic over any `DrawTarget<Color = Rgb565>` and swallow draw errors per
//! primitive, so one failing element never aborts the frame.

pub mod hud;
pub mod lanes;
pub mod leads;
pub mod primitives;
pub mod scanner;

pub use hud::draw_hud;
pub use lanes::draw_lane_overlay;
pub use leads::draw_lead_markers;
pub use scanner::draw_scanner;
