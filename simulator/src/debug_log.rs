//! Recent-event console drawn over the simulator window.
//!
//! Keeps the last few events in a fixed ring buffer. Events also go through
//! `log`, so `RUST_LOG` output and the overlay tell the same story.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::{Deque, String};
use log::info;

/// Maximum number of log lines to keep in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 6;

/// Maximum characters per log line.
pub const LOG_LINE_LENGTH: usize = 48;

const LOG_LINE_HEIGHT: i32 = 12;
const LOG_PADDING: i32 = 4;
const LOG_WIDTH: u32 = 300;

const LOG_BG: Rgb565 = Rgb565::new(2, 4, 2);
const LOG_PROMPT_COLOR: Rgb565 = Rgb565::GREEN;
const LOG_TEXT_COLOR: Rgb565 = Rgb565::new(31, 41, 0);

/// Ring buffer of recent simulator events.
pub struct DebugLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
    visible: bool,
}

impl DebugLog {
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            visible: false,
        }
    }

    /// Record an event. If the buffer is full, the oldest line is dropped.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        info!("{msg}");

        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for c in msg.chars().take(LOG_LINE_LENGTH - 1) {
            line.push(c).ok();
        }
        self.buffer.push_back(line).ok();
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buffer.iter().map(|line| line.as_str())
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Draw the console in the top-left corner when visible.
    pub fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.visible {
            return;
        }

        let height = (self.buffer.len() as i32 * LOG_LINE_HEIGHT + LOG_PADDING * 2).max(LOG_LINE_HEIGHT) as u32;
        Rectangle::new(Point::zero(), Size::new(LOG_WIDTH, height))
            .into_styled(PrimitiveStyle::with_fill(LOG_BG))
            .draw(display)
            .ok();

        let prompt_style = MonoTextStyle::new(&FONT_6X10, LOG_PROMPT_COLOR);
        let text_style = MonoTextStyle::new(&FONT_6X10, LOG_TEXT_COLOR);

        let mut y = LOG_PADDING;
        for line in self.iter() {
            Text::with_baseline(">", Point::new(LOG_PADDING, y), prompt_style, Baseline::Top)
                .draw(display)
                .ok();
            Text::with_baseline(line, Point::new(LOG_PADDING + 10, y), text_style, Baseline::Top)
                .draw(display)
                .ok();
            y += LOG_LINE_HEIGHT;
        }
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new()
    }
}
