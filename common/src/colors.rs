//! Colour palettes for colour and black-and-white displays.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! The watch palette is built from 2-bit-per-channel colours (0x00, 0x55, 0xAA,
//! 0xFF), which map onto Rgb565 as:
//!
//! | 8-bit | red/blue (5 bit) | green (6 bit) |
//! |-------|------------------|---------------|
//! | 0x00  | 0                | 0             |
//! | 0x55  | 10               | 21            |
//! | 0xAA  | 21               | 42            |
//! | 0xFF  | 31               | 63            |

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::config::ColorMode;
use crate::thresholds::Visibility;

// =============================================================================
// Standard Colors
// =============================================================================

pub const BLACK: Rgb565 = Rgb565::BLACK;
pub const WHITE: Rgb565 = Rgb565::WHITE;
pub const RED: Rgb565 = Rgb565::RED;
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Dark gray for trace/debug log levels.
pub const GRAY: Rgb565 = Rgb565::new(10, 21, 10);

// =============================================================================
// Watch Palette Colors
// =============================================================================

/// Oxford blue (0x000055). Window background.
pub const OXFORD_BLUE: Rgb565 = Rgb565::new(0, 0, 10);

/// Baby blue eyes (0xAAAAFF). Main rounded background panel.
pub const BABY_BLUE_EYES: Rgb565 = Rgb565::new(21, 42, 31);

/// Very light blue (0x5555FF). Region bubble.
pub const VERY_LIGHT_BLUE: Rgb565 = Rgb565::new(10, 21, 31);

/// Islamic green (0x00AA00). "Visible" score bubble.
pub const ISLAMIC_GREEN: Rgb565 = Rgb565::new(0, 42, 0);

/// Vivid cerulean (0x00AAFF). "Partly visible" score bubble.
pub const VIVID_CERULEAN: Rgb565 = Rgb565::new(0, 42, 31);

/// Rajah (0xFFAA55). "Barely visible" score bubble.
pub const RAJAH: Rgb565 = Rgb565::new(31, 42, 10);

/// Sunset orange (0xFF5555). Morning time bubble.
pub const SUNSET_ORANGE: Rgb565 = Rgb565::new(31, 21, 10);

/// Liberty (0x5555AA). Afternoon time bubble.
pub const LIBERTY: Rgb565 = Rgb565::new(10, 21, 21);

/// Melon (0xFFAAAA). Morning label text.
pub const MELON: Rgb565 = Rgb565::new(31, 42, 21);

/// Picton blue (0x55AAFF). Afternoon label text.
pub const PICTON_BLUE: Rgb565 = Rgb565::new(10, 42, 31);

/// Green (0x00FF00). Info log level.
pub const GREEN: Rgb565 = Rgb565::GREEN;

// =============================================================================
// Palette
// =============================================================================

/// Every colour role used by the watch face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palette {
    pub window: Rgb565,
    pub background_bubble: Rgb565,
    pub date_text: Rgb565,
    pub region_bubble: Rgb565,
    pub region_text: Rgb565,
    pub score_visible_bubble: Rgb565,
    pub score_partly_visible_bubble: Rgb565,
    pub score_barely_visible_bubble: Rgb565,
    pub score_not_visible_bubble: Rgb565,
    pub score_text: Rgb565,
    pub morning_bubble: Rgb565,
    pub afternoon_bubble: Rgb565,
    pub morning_text: Rgb565,
    pub afternoon_text: Rgb565,
    pub sun: Rgb565,
    pub cloud: Rgb565,
    pub loading_background: Rgb565,
    pub loading_text: Rgb565,
    pub splash_mountain: Rgb565,
    pub splash_snow: Rgb565,
}

impl Palette {
    /// Palette for colour displays.
    pub const COLOR: Self = Self {
        window: OXFORD_BLUE,
        background_bubble: BABY_BLUE_EYES,
        date_text: WHITE,
        region_bubble: VERY_LIGHT_BLUE,
        region_text: WHITE,
        score_visible_bubble: ISLAMIC_GREEN,
        score_partly_visible_bubble: VIVID_CERULEAN,
        score_barely_visible_bubble: RAJAH,
        score_not_visible_bubble: RED,
        score_text: WHITE,
        morning_bubble: SUNSET_ORANGE,
        afternoon_bubble: LIBERTY,
        morning_text: MELON,
        afternoon_text: PICTON_BLUE,
        sun: YELLOW,
        cloud: WHITE,
        loading_background: WHITE,
        loading_text: BLACK,
        splash_mountain: LIBERTY,
        splash_snow: WHITE,
    };

    /// Palette for black-and-white displays. Score bubbles are all white.
    pub const MONOCHROME: Self = Self {
        window: BLACK,
        background_bubble: WHITE,
        date_text: BLACK,
        region_bubble: BLACK,
        region_text: WHITE,
        score_visible_bubble: WHITE,
        score_partly_visible_bubble: WHITE,
        score_barely_visible_bubble: WHITE,
        score_not_visible_bubble: WHITE,
        score_text: BLACK,
        morning_bubble: BLACK,
        afternoon_bubble: BLACK,
        morning_text: WHITE,
        afternoon_text: WHITE,
        sun: WHITE,
        cloud: WHITE,
        loading_background: WHITE,
        loading_text: BLACK,
        splash_mountain: BLACK,
        splash_snow: WHITE,
    };

    /// Palette for a display colour mode.
    pub const fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Color => Self::COLOR,
            ColorMode::Monochrome => Self::MONOCHROME,
        }
    }

    /// Score bubble fill for a visibility bucket.
    pub const fn score_bubble(
        &self,
        visibility: Visibility,
    ) -> Rgb565 {
        match visibility {
            Visibility::Visible => self.score_visible_bubble,
            Visibility::PartlyVisible => self.score_partly_visible_bubble,
            Visibility::BarelyVisible => self.score_barely_visible_bubble,
            Visibility::NotVisible => self.score_not_visible_bubble,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_palette_distinguishes_buckets() {
        let palette = Palette::COLOR;
        assert_eq!(palette.score_bubble(Visibility::Visible), ISLAMIC_GREEN);
        assert_eq!(palette.score_bubble(Visibility::PartlyVisible), VIVID_CERULEAN);
        assert_eq!(palette.score_bubble(Visibility::BarelyVisible), RAJAH);
        assert_eq!(palette.score_bubble(Visibility::NotVisible), RED);
    }

    #[test]
    fn test_monochrome_score_bubbles_are_white() {
        let palette = Palette::for_mode(ColorMode::Monochrome);
        for visibility in [Visibility::Visible, Visibility::PartlyVisible, Visibility::BarelyVisible,
            Visibility::NotVisible] {
            assert_eq!(palette.score_bubble(visibility), WHITE);
        }
    }

    #[test]
    fn test_palette_channel_conversion() {
        // 0x55 -> 10/21, 0xAA -> 21/42
        assert_eq!(LIBERTY.r(), 10);
        assert_eq!(LIBERTY.g(), 21);
        assert_eq!(LIBERTY.b(), 21);
        assert_eq!(RAJAH.g(), 42);
    }
}
