//! Shared code for the Fuji visibility watch face.
//!
//! This crate contains everything that does not depend on the host platform,
//! so the same code drives the desktop simulator and any watch target:
//!
//! - [`model`]: Regions, time periods and the score type
//! - [`store`]: In-memory score cache with load progress
//! - [`thresholds`]: Score buckets (text, icon and colour selection)
//! - [`config`]: Layout constants and the runtime display configuration
//! - [`layout`]: Screen-shape dependent rectangles for every UI element
//! - [`icons`]: Procedural sun/cloud icon geometry
//! - [`colors`]: Colour palettes (colour and black-and-white displays)
//! - [`styles`]: Fonts and text box styles
//! - [`message`]: Companion message protocol (inbound parsing, outbound requests)
//! - [`controller`]: View lifecycle, input and message handling
//! - [`screens`]: Loading and main view drawing
//! - [`widgets`]: Low-level drawing primitives
//! - [`date`]: Date line formatting
//! - [`log_buffer`]: Leveled ring buffer for on-device log viewing
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` and allocation free. Tests run with `std` enabled
//! (via `cfg_attr`) so the standard test harness is available on the host.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod controller;
pub mod date;
pub mod icons;
pub mod layout;
pub mod log_buffer;
pub mod message;
pub mod model;
pub mod screens;
pub mod store;
pub mod styles;
pub mod thresholds;
pub mod widgets;

#[cfg(test)]
mod test_display;

// Re-export commonly used items
pub use config::{ColorMode, DisplayConfig, ScreenShape};
pub use controller::{App, Button, Redraw, View};
pub use model::{Region, SCORE_UNLOADED, Score, TimePeriod};
pub use store::ScoreStore;
