//! Autonomy status and the status-driven styling tables.
//!
//! The state bus reports status as a raw integer. [`Status::from_raw`] is the
//! only way in: codes outside the known set fail closed to
//! [`Status::Disengaged`], so every status-dependent element (border, scanner,
//! engage icon, MAX label) falls back to the disengaged look instead of
//! guessing.
//!
//! Tables are fixed-size arrays indexed by the enum, sized by
//! [`Status::COUNT`]; adding a variant without extending a table is a compile
//! error.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::rgb;
use crate::error::DegradeReason;

/// Engagement status of the driving system.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum Status {
    /// System not controlling the vehicle.
    #[default]
    Disengaged = 0,
    /// Engaged, but the driver is currently overriding.
    Override = 1,
    /// Engaged and in control.
    Engaged = 2,
}

impl Status {
    /// Number of status variants (table length).
    pub const COUNT: usize = 3;

    /// Every variant, in table order.
    pub const ALL: [Self; Self::COUNT] = [Self::Disengaged, Self::Override, Self::Engaged];

    /// Decode a raw status code from the bus.
    pub const fn try_from_raw(raw: i32) -> Result<Self, DegradeReason> {
        match raw {
            0 => Ok(Self::Disengaged),
            1 => Ok(Self::Override),
            2 => Ok(Self::Engaged),
            _ => Err(DegradeReason::UnknownStatus(raw)),
        }
    }

    /// Decode a raw status code, failing closed to `Disengaged`.
    pub fn from_raw(raw: i32) -> Self {
        match Self::try_from_raw(raw) {
            Ok(status) => status,
            Err(_) => Self::Disengaged,
        }
    }

    /// Table index of this variant.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Background color for this status (border, engage icon disc, scanner).
    #[inline]
    pub const fn color(self) -> Rgb565 {
        STATUS_COLORS[self.index()]
    }
}

/// Status background colors, indexed by [`Status::index`].
pub const STATUS_COLORS: [Rgb565; Status::COUNT] = [
    rgb(0x17, 0x33, 0x49), // Disengaged
    rgb(0x91, 0x9b, 0x95), // Override
    rgb(0x17, 0x86, 0x44), // Engaged
];

/// Status color for a raw bus code, failing closed to the disengaged color.
#[inline]
pub fn status_color(raw: i32) -> Rgb565 {
    Status::from_raw(raw).color()
}

// =============================================================================
// Unit Tests
// =============================================================================
