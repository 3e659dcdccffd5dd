//! Logs page for viewing the watch app's log buffer.
//!
//! Displays the newest entries that fit, oldest at the top. The watch screen
//! is too narrow for a one-line entry, so each entry takes a prefix row and a
//! wrapped message below it.
//!
//! # Layout
//!
//! ```text
//! LOGS                  (header)
//! [I] 12345             (prefix in level colour)
//!   Score north morning (message, wrapped to two rows)
//!   : 7
//! [E] 12350
//!   [AppMessage] Outbox
//!   begin failed: 8
//! L: watch  D: link on  (footer)
//! ```

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use visibility_common::colors::{BLACK, GREEN, WHITE};
use visibility_common::layout::rect;
use visibility_common::log_buffer::{LogBuffer, LogEntry};
use visibility_common::styles::{LOG_STYLE_WHITE, left_box, log_style};
use visibility_common::widgets::draw_text_box;

/// Height of one text row in the log font.
const ROW_HEIGHT: i32 = 10;

/// Left margin.
const MARGIN_X: i32 = 4;

/// Message indent below the prefix.
const MESSAGE_INDENT: i32 = 8;

/// Header and footer height.
const BAR_HEIGHT: i32 = 14;

/// One prefix row, two message rows and a gap.
const ENTRY_HEIGHT: i32 = ROW_HEIGHT * 3 + 2;

/// Number of entries that fit between the header and the footer.
pub fn visible_entries(screen_height: i32) -> usize { ((screen_height - BAR_HEIGHT * 2) / ENTRY_HEIGHT).max(0) as usize }

/// Draw the logs page.
pub fn draw_logs_page<D>(
    display: &mut D,
    logs: &LogBuffer,
    connected: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let size = display.bounding_box().size;
    let width = size.width as i32;
    let height = size.height as i32;

    display.clear(BLACK).ok();

    // Header
    Text::with_baseline("LOGS", Point::new(MARGIN_X, 2), log_style(GREEN), Baseline::Top)
        .draw(display)
        .ok();

    if logs.is_empty() {
        Text::with_baseline("No log entries", Point::new(MARGIN_X, height / 2), LOG_STYLE_WHITE, Baseline::Top)
            .draw(display)
            .ok();
    }

    let shown = visible_entries(height).min(logs.len());
    let mut y = BAR_HEIGHT;
    for entry in logs.iter().skip(logs.len() - shown) {
        draw_log_entry(display, entry, y, width);
        y += ENTRY_HEIGHT;
    }

    // Footer
    let footer = if connected { "L: watch  D: link on" } else { "L: watch  D: link off" };
    Text::with_baseline(footer, Point::new(MARGIN_X, height - BAR_HEIGHT + 2), log_style(GREEN), Baseline::Top)
        .draw(display)
        .ok();
}

/// Draw a single log entry.
fn draw_log_entry<D>(
    display: &mut D,
    entry: &LogEntry,
    y: i32,
    width: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    // Format: [L] TTTTT (timestamp mod 100000 for 5 digits)
    let mut prefix: String<16> = String::new();
    write!(prefix, "[{}] {:05}", entry.level.prefix(), entry.timestamp_ms % 100_000).ok();
    Text::with_baseline(&prefix, Point::new(MARGIN_X, y), log_style(entry.level.color()), Baseline::Top)
        .draw(display)
        .ok();

    let message_rect = rect(
        MARGIN_X + MESSAGE_INDENT,
        y + ROW_HEIGHT,
        width - MARGIN_X * 2 - MESSAGE_INDENT,
        ROW_HEIGHT * 2,
    );
    draw_text_box(display, entry.message.as_str(), message_rect, log_style(WHITE), left_box());
}
