//! Onroad HUD simulator for desktop.
//!
//! Hosts the HUD in an `embedded-graphics-simulator` window, fed by a
//! synthetic state bus.
//!
//! # Keys
//!
//! | Key   | Action                                   |
//! |-------|------------------------------------------|
//! | O     | Toggle onroad/offroad                    |
//! | A     | Cycle alerts (none, small, mid, full)    |
//! | S     | Cycle status (including an unknown code) |
//! | U     | Toggle metric/imperial                   |
//! | L     | Cycle limit sign (none, EU, US, both)    |
//! | M     | Tap the view (toggles the map)           |
//! | D     | Toggle the debug log overlay             |
//!
//! Clicking inside the view is forwarded as a tap as well. `RUST_LOG`
//! controls console logging.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]

mod camera;
mod debug_log;
mod feed;
mod map;
mod timing;

use core::fmt::Write;
use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use heapless::String;
use onroad_hud::colors::BLACK;
use onroad_hud::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use onroad_hud::{OnroadCompositor, OperatingMode};

use crate::camera::SyntheticRoad;
use crate::debug_log::{DebugLog, LOG_LINE_LENGTH};
use crate::feed::SimFeed;
use crate::map::{MapStandIn, Shell};
use crate::timing::{FRAME_TIME, SIGNAL_STEP, SNAPSHOT_DIVIDER};

fn main() {
    env_logger::init();

    let screen = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(screen.size);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Onroad HUD Sim", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    let map = MapStandIn::new();
    let mut feed = SimFeed::new();
    let mut debug_log = DebugLog::new();

    let mut compositor = OnroadCompositor::new(SyntheticRoad::new(), screen, Some(&map));
    compositor.initialize();
    compositor.offroad_transition(false);
    debug_log.push("System started");

    let start = Instant::now();
    let mut t = 0.0f32;
    let mut frame_count = 0u32;

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::O => {
                            let offroad = compositor.mode() == OperatingMode::Onroad;
                            compositor.offroad_transition(offroad);
                            debug_log.push(if offroad { "Mode: offroad" } else { "Mode: onroad" });
                        }
                        Keycode::A => {
                            let title = feed.cycle_alert();
                            push_fmt(&mut debug_log, format_args!("Alert: {title}"));
                        }
                        Keycode::S => {
                            let code = feed.cycle_status();
                            push_fmt(&mut debug_log, format_args!("Status code: {code}"));
                        }
                        Keycode::U => {
                            feed.is_metric = !feed.is_metric;
                            debug_log.push(if feed.is_metric { "Units: metric" } else { "Units: imperial" });
                        }
                        Keycode::L => {
                            feed.limit = feed.limit.next();
                            push_fmt(&mut debug_log, format_args!("Limit sign: {:?}", feed.limit));
                        }
                        Keycode::M => {
                            let center = screen.center();
                            let mut shell = Shell {
                                map: &map,
                                log: &mut debug_log,
                            };
                            compositor.pointer_pressed(center, &mut shell);
                        }
                        Keycode::D => {
                            debug_log.toggle();
                        }
                        _ => {}
                    }
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    let mut shell = Shell {
                        map: &map,
                        log: &mut debug_log,
                    };
                    compositor.pointer_pressed(point, &mut shell);
                }
                _ => {}
            }
        }

        if frame_count.is_multiple_of(SNAPSHOT_DIVIDER) {
            compositor.update_state(&feed.snapshot(t));
        }

        compositor.paint(&mut display, start.elapsed());
        if compositor.mode() == OperatingMode::Onroad
            && let Some(map_area) = compositor.layout().map
        {
            map.draw(&mut display, map_area);
        }
        debug_log.draw(&mut display);

        window.update(&display);

        t += SIGNAL_STEP;
        frame_count = frame_count.wrapping_add(1);

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

fn push_fmt(
    log: &mut DebugLog,
    args: core::fmt::Arguments<'_>,
) {
    let mut line: String<LOG_LINE_LENGTH> = String::new();
    line.write_fmt(args).ok();
    log.push(&line);
}
