//! Layout constants and runtime display configuration.
//!
//! The watch face supports two screen shapes. Instead of compiling a separate
//! build per shape, the shape is a runtime [`DisplayConfig`] value and the
//! layout engine branches on it.
//!
//! Platform scaling (larger displays with the same layout) is expressed as a
//! per-mille factor so all layout math stays in integers.

use embedded_graphics::geometry::Size;

// =============================================================================
// Display Configuration
// =============================================================================

/// Default rectangular display size (144x168).
pub const RECT_SCREEN_SIZE: Size = Size::new(144, 168);

/// Default round display size (180x180).
pub const ROUND_SCREEN_SIZE: Size = Size::new(180, 180);

/// Scale factor that leaves values unchanged.
pub const SCALE_IDENTITY: u32 = 1000;

/// Largest platform scale applied to layout values (4x).
pub const MAX_SCALE_PERMILLE: u32 = 4000;

const _: () = assert!(SCALE_IDENTITY <= MAX_SCALE_PERMILLE);

// =============================================================================
// Layout Constants
// =============================================================================

/// Base spacing unit between UI elements.
pub const PADDING: i32 = 6;

/// Corner radius of the background panel and time bubbles.
pub const CORNER_RADIUS_MAIN: u32 = 14;

/// Corner radius of the region and score bubbles.
pub const CORNER_RADIUS_BUBBLE: u32 = 8;

/// Region bubble (top of the screen) width.
pub const REGION_BUBBLE_WIDTH: i32 = 54;

/// Region bubble height. Also the height of every single-line text row.
pub const REGION_BUBBLE_HEIGHT: i32 = 20;

/// Horizontal inset of the region text inside its bubble.
pub const REGION_TEXT_INSET: i32 = 4;

/// Score bubble height for two-line labels.
pub const SCORE_BUBBLE_HEIGHT: i32 = 34;

/// Extra right margin of the score bubble.
pub const SCORE_RIGHT_MARGIN: i32 = 10;

/// Time bubble height on rectangular displays.
pub const TIME_BUBBLE_HEIGHT: i32 = 62;

/// Horizontal inset of the time bubbles on round displays (before scaling).
pub const ROUND_INSET: i32 = 22;

/// Time bubble height on round displays (before scaling).
pub const ROUND_BUBBLE_HEIGHT: i32 = 57;

/// Time label offset from the bubble top on round displays (before scaling).
pub const ROUND_LABEL_OFFSET_Y: i32 = 36;

/// Icon x position on rectangular displays (before scaling).
pub const ICON_X: i32 = 24;

/// Icon size on rectangular displays.
pub const ICON_SIZE: i32 = 30;

/// Icon offset from the bubble's left edge on round displays (before scaling).
pub const ROUND_ICON_X_OFFSET: i32 = 15;

/// Icon size on round displays (before scaling).
pub const ROUND_ICON_SIZE: i32 = 24;

/// Stroke width for icon outlines.
pub const ICON_STROKE: u32 = 2;

/// Loading text offset below the screen centre.
pub const LOADING_TEXT_Y_PADDING: i32 = 44;

/// Loading text row height.
pub const LOADING_TEXT_HEIGHT: i32 = 24;

/// Hours added to UTC for the date line (Japan Standard Time).
pub const DATE_UTC_OFFSET_HOURS: i32 = 9;

// Compile-time validation: the score bubble must fit inside both time bubbles
const _: () = assert!(SCORE_BUBBLE_HEIGHT < TIME_BUBBLE_HEIGHT);
const _: () = assert!(SCORE_BUBBLE_HEIGHT < ROUND_BUBBLE_HEIGHT);
// Single-line score bubbles shrink by one padding unit top and bottom
const _: () = assert!(SCORE_BUBBLE_HEIGHT > PADDING * 2);
const _: () = assert!(REGION_BUBBLE_WIDTH > REGION_TEXT_INSET * 2);

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Screen shape class.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ScreenShape {
    #[default]
    Rectangular,
    Round,
}

/// Colour capability of the display.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ColorMode {
    #[default]
    Color,
    Monochrome,
}

/// Display properties consumed by the layout engine and renderer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplayConfig {
    /// Screen bounds in pixels.
    pub size: Size,
    /// Screen shape class.
    pub shape: ScreenShape,
    /// Platform scale factor in per-mille (1000 = unscaled).
    pub scale_permille: u32,
    /// Colour capability.
    pub color_mode: ColorMode,
}

impl DisplayConfig {
    /// Rectangular colour display at the default size.
    pub const RECT: Self = Self {
        size: RECT_SCREEN_SIZE,
        shape: ScreenShape::Rectangular,
        scale_permille: SCALE_IDENTITY,
        color_mode: ColorMode::Color,
    };

    /// Round colour display at the default size.
    pub const ROUND: Self = Self {
        size: ROUND_SCREEN_SIZE,
        shape: ScreenShape::Round,
        scale_permille: SCALE_IDENTITY,
        color_mode: ColorMode::Color,
    };

    /// Default configuration for a screen shape.
    pub const fn for_shape(shape: ScreenShape) -> Self {
        match shape {
            ScreenShape::Rectangular => Self::RECT,
            ScreenShape::Round => Self::ROUND,
        }
    }

    /// Same configuration with different bounds.
    #[must_use]
    pub const fn with_size(
        self,
        size: Size,
    ) -> Self {
        Self { size, ..self }
    }

    /// Same configuration with a different colour mode.
    #[must_use]
    pub const fn with_color_mode(
        self,
        color_mode: ColorMode,
    ) -> Self {
        Self { color_mode, ..self }
    }

    /// Same configuration with a different platform scale.
    #[must_use]
    pub const fn with_scale(
        self,
        scale_permille: u32,
    ) -> Self {
        Self { scale_permille, ..self }
    }

    /// Apply the platform scale to a layout value.
    ///
    /// Scales above [`MAX_SCALE_PERMILLE`] are clamped to it.
    #[inline]
    pub const fn scale(
        &self,
        value: i32,
    ) -> i32 {
        let permille = if self.scale_permille > MAX_SCALE_PERMILLE { MAX_SCALE_PERMILLE } else { self.scale_permille };
        round_permille(value, permille as i32)
    }

    #[inline]
    pub const fn width(&self) -> i32 { self.size.width as i32 }

    #[inline]
    pub const fn height(&self) -> i32 { self.size.height as i32 }
}

impl Default for DisplayConfig {
    fn default() -> Self { Self::RECT }
}

// =============================================================================
// Fixed-Point Helpers
// =============================================================================

/// `value * permille / 1000`, rounded half away from zero.
///
/// The product is taken in `i64`; results outside `i32` saturate.
pub const fn round_permille(
    value: i32,
    permille: i32,
) -> i32 {
    let product = value as i64 * permille as i64;
    let rounded = if product >= 0 { (product + 500) / 1000 } else { (product - 500) / 1000 };
    saturate_i32(rounded)
}

/// `value * permille / 1000`, truncated toward zero.
#[inline]
pub const fn truncate_permille(
    value: i32,
    permille: i32,
) -> i32 {
    saturate_i32(value as i64 * permille as i64 / 1000)
}

const fn saturate_i32(value: i64) -> i32 {
    if value > i32::MAX as i64 {
        i32::MAX
    } else if value < i32::MIN as i64 {
        i32::MIN
    } else {
        value as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_permille_half_away_from_zero() {
        assert_eq!(round_permille(30, 150), 5, "4.5 rounds up");
        assert_eq!(round_permille(-30, 150), -5, "-4.5 rounds down");
        assert_eq!(round_permille(30, 120), 4, "3.6 rounds to 4");
        assert_eq!(round_permille(24, 100), 2, "2.4 rounds to 2");
        assert_eq!(round_permille(0, 999), 0);
    }

    #[test]
    fn test_truncate_permille_toward_zero() {
        assert_eq!(truncate_permille(30, 660), 19, "19.8 truncates to 19");
        assert_eq!(truncate_permille(30, 70), 2, "2.1 truncates to 2");
        assert_eq!(truncate_permille(-30, 140), -4, "-4.2 truncates to -4");
    }

    #[test]
    fn test_identity_scale() {
        let config = DisplayConfig::RECT;
        assert_eq!(config.scale(24), 24);
        assert_eq!(config.scale(57), 57);
    }

    #[test]
    fn test_platform_scale() {
        let config = DisplayConfig::RECT.with_scale(1250);
        assert_eq!(config.scale(24), 30);
        assert_eq!(config.scale(22), 28, "27.5 rounds up");
    }

    #[test]
    fn test_permille_products_do_not_overflow() {
        assert_eq!(round_permille(100_000, 100_000), 10_000_000, "product exceeds i32 before the divide");
        assert_eq!(truncate_permille(-100_000, 100_000), -10_000_000);
        assert_eq!(round_permille(i32::MAX, 4000), i32::MAX, "saturates");
        assert_eq!(truncate_permille(i32::MIN, 4000), i32::MIN, "saturates");
    }

    #[test]
    fn test_oversized_platform_scale_is_clamped() {
        let config = DisplayConfig::ROUND.with_scale(100_000_000);
        assert_eq!(config.scale(22), 88, "clamped to 4x");
        assert_eq!(DisplayConfig::RECT.with_scale(u32::MAX).scale(24), 96);
    }

    #[test]
    fn test_shape_defaults() {
        assert_eq!(DisplayConfig::for_shape(ScreenShape::Round).size, ROUND_SCREEN_SIZE);
        assert_eq!(DisplayConfig::default().shape, ScreenShape::Rectangular);
        let mono = DisplayConfig::ROUND.with_color_mode(ColorMode::Monochrome);
        assert_eq!(mono.shape, ScreenShape::Round);
        assert_eq!(mono.color_mode, ColorMode::Monochrome);
    }
}
