//! Fonts and text styles.
//!
//! # Static Style Constants
//!
//! Character styles that never change colour are `const` so they live in
//! read-only data instead of being rebuilt on every draw. Styles whose colour
//! depends on the palette are built through the small helpers below, which
//! only copy a font reference and a colour.
//!
//! # Text Boxes
//!
//! Every watch-face label is drawn into a rectangle computed by the layout
//! engine, so text goes through `embedded_text::TextBox` rather than a bare
//! `Text` anchored at a point. The box handles horizontal alignment, vertical
//! centring and the `\n` in two-line score labels.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_6X13_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_text::alignment::{HorizontalAlignment, VerticalAlignment};
use embedded_text::style::{TextBoxStyle, TextBoxStyleBuilder};
use profont::PROFONT_14_POINT;

use crate::colors::WHITE;

// =============================================================================
// Fonts
// =============================================================================

/// Bold label font for region, date, time period and score labels.
pub const LABEL_FONT: &MonoFont = &FONT_6X13_BOLD;

/// Loading screen font.
pub const LOADING_FONT: &MonoFont = &PROFONT_14_POINT;

/// Small font for the log viewer.
pub const LOG_FONT: &MonoFont = &FONT_6X10;

// =============================================================================
// Character Styles
// =============================================================================

/// White log message text.
pub const LOG_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Label style in a palette colour.
#[inline]
pub const fn label_style(color: Rgb565) -> MonoTextStyle<'static, Rgb565> { MonoTextStyle::new(LABEL_FONT, color) }

/// Loading text style in a palette colour.
#[inline]
pub const fn loading_style(color: Rgb565) -> MonoTextStyle<'static, Rgb565> { MonoTextStyle::new(LOADING_FONT, color) }

/// Log level prefix style in a level colour.
#[inline]
pub const fn log_style(color: Rgb565) -> MonoTextStyle<'static, Rgb565> { MonoTextStyle::new(LOG_FONT, color) }

// =============================================================================
// Text Box Styles
// =============================================================================

/// Text centred horizontally and vertically in its box.
pub fn centered_box() -> TextBoxStyle {
    TextBoxStyleBuilder::new()
        .alignment(HorizontalAlignment::Center)
        .vertical_alignment(VerticalAlignment::Middle)
        .build()
}

/// Text left-aligned and vertically centred in its box.
pub fn left_box() -> TextBoxStyle {
    TextBoxStyleBuilder::new()
        .alignment(HorizontalAlignment::Left)
        .vertical_alignment(VerticalAlignment::Middle)
        .build()
}
