//! Log buffer with levels and timestamps for on-device log viewing.
//!
//! Provides a circular buffer of log entries displayed on the Logs page.
//! Each entry has a log level, message, and timestamp.
//!
//! # Log Levels
//!
//! - `Trace`: Dark gray - verbose debugging
//! - `Debug`: White - debugging information
//! - `Info`: Green - normal operation
//! - `Warn`: Yellow - warnings
//! - `Error`: Red - errors
//!
//! # Ownership
//!
//! The buffer is owned by the application state rather than living in a
//! global. Everything runs on one event loop thread, so handlers log through
//! `&mut self` and no lock is needed.
//!
//! ```ignore
//! app.logs.push_fmt(LogLevel::Warn, now_ms, format_args!("Outbox send failed: {}", code));
//! ```

use core::fmt::{self, Write};

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::colors::{GRAY, GREEN, RED, WHITE, YELLOW};

/// Maximum number of log entries to keep.
pub const LOG_ENTRIES: usize = 14;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 40;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Verbose debugging (dark gray)
    Trace = 0,
    /// Debug information (white)
    Debug = 1,
    /// Normal operation (green)
    #[default]
    Info = 2,
    /// Warnings (yellow)
    Warn = 3,
    /// Errors (red)
    Error = 4,
}

impl LogLevel {
    /// Display colour for this level.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Trace => GRAY,
            Self::Debug => WHITE,
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// Single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// A single log entry with level, message, and timestamp.
#[derive(Clone, Debug)]
pub struct LogEntry {
    /// Log severity level.
    pub level: LogLevel,
    /// Log message (truncated to LOG_MSG_LEN).
    pub message: String<LOG_MSG_LEN>,
    /// Timestamp in milliseconds since start (mod 100000 for display).
    pub timestamp_ms: u32,
}

impl LogEntry {
    const EMPTY: Self = Self {
        level: LogLevel::Info,
        message: String::new(),
        timestamp_ms: 0,
    };

    /// Create a new log entry, truncating the message to fit.
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_ms: u32,
    ) -> Self {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        for c in message.chars() {
            if msg.push(c).is_err() {
                break;
            }
        }
        Self {
            level,
            message: msg,
            timestamp_ms,
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self { Self::EMPTY }
}

/// Fixed-capacity writer that silently drops overflow instead of failing,
/// so a long formatted message is truncated rather than lost.
struct TruncatingWriter(String<LOG_MSG_LEN>);

impl Write for TruncatingWriter {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Circular buffer of log entries.
pub struct LogBuffer {
    entries: [LogEntry; LOG_ENTRIES],
    head: usize, // Next write position
    count: usize,
}

impl LogBuffer {
    /// Create a new empty log buffer.
    pub const fn new() -> Self {
        Self {
            entries: [const { LogEntry::EMPTY }; LOG_ENTRIES],
            head: 0,
            count: 0,
        }
    }

    /// Push a new log entry. Oldest entry is dropped if buffer is full.
    pub fn push(
        &mut self,
        entry: LogEntry,
    ) {
        self.entries[self.head] = entry;
        self.head = (self.head + 1) % LOG_ENTRIES;
        if self.count < LOG_ENTRIES {
            self.count += 1;
        }
    }

    /// Push a message at the given level.
    pub fn push_str(
        &mut self,
        level: LogLevel,
        timestamp_ms: u32,
        message: &str,
    ) {
        self.push(LogEntry::new(level, message, timestamp_ms));
    }

    /// Push a formatted message at the given level. Output beyond
    /// [`LOG_MSG_LEN`] characters is cut off.
    pub fn push_fmt(
        &mut self,
        level: LogLevel,
        timestamp_ms: u32,
        args: fmt::Arguments<'_>,
    ) {
        let mut writer = TruncatingWriter(String::new());
        writer.write_fmt(args).ok();
        self.push(LogEntry {
            level,
            message: writer.0,
            timestamp_ms,
        });
    }

    /// Number of entries in the buffer.
    #[inline]
    pub const fn len(&self) -> usize { self.count }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.count == 0 }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        if self.count == 0 {
            return None;
        }
        Some(&self.entries[(self.head + LOG_ENTRIES - 1) % LOG_ENTRIES])
    }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> LogBufferIter<'_> {
        let start = if self.count < LOG_ENTRIES { 0 } else { self.head };
        LogBufferIter {
            buffer: self,
            pos: start,
            remaining: self.count,
        }
    }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

/// Iterator over log buffer entries (oldest to newest).
pub struct LogBufferIter<'a> {
    buffer: &'a LogBuffer,
    pos: usize,
    remaining: usize,
}

impl<'a> Iterator for LogBufferIter<'a> {
    type Item = &'a LogEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = &self.buffer.entries[self.pos];
        self.pos = (self.pos + 1) % LOG_ENTRIES;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl ExactSizeIterator for LogBufferIter<'_> {}
