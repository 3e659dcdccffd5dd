//! Command-line options for the simulator.
//!
//! The watch face itself takes its display properties from a
//! [`DisplayConfig`]; these flags only decide which one the simulator builds.

use clap::{Parser, ValueEnum};
use embedded_graphics::geometry::Size;
use visibility_common::config::{MAX_SCALE_PERMILLE, SCALE_IDENTITY};
use visibility_common::{ColorMode, DisplayConfig, ScreenShape};

/// Screen shape selectable on the command line.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ShapeArg {
    #[default]
    Rect,
    Round,
}

impl From<ShapeArg> for ScreenShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Rect => Self::Rectangular,
            ShapeArg::Round => Self::Round,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Fuji visibility watch face simulator", long_about = None)]
pub struct Cli {
    /// Screen shape.
    #[arg(long, value_enum, default_value_t = ShapeArg::Rect)]
    pub shape: ShapeArg,

    /// Screen width in pixels (defaults to the shape's native size).
    #[arg(long)]
    pub width: Option<u32>,

    /// Screen height in pixels (defaults to the shape's native size).
    #[arg(long)]
    pub height: Option<u32>,

    /// Black-and-white palette.
    #[arg(long, default_value_t = false)]
    pub mono: bool,

    /// Window pixel scale.
    #[arg(long, default_value_t = 2)]
    pub window_scale: u32,

    /// Platform layout scale in per-mille (1000 = unscaled).
    #[arg(
        long,
        default_value_t = SCALE_IDENTITY,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SCALE_PERMILLE)),
    )]
    pub platform_scale: u32,

    /// Seed for the simulated weather.
    #[arg(long, default_value_t = 2024)]
    pub seed: u64,
}

impl Cli {
    /// Display configuration described by the flags.
    pub fn display_config(&self) -> DisplayConfig {
        let base = DisplayConfig::for_shape(self.shape.into());
        let size = Size::new(
            self.width.unwrap_or(base.size.width),
            self.height.unwrap_or(base.size.height),
        );
        let color_mode = if self.mono { ColorMode::Monochrome } else { ColorMode::Color };

        base.with_size(size)
            .with_color_mode(color_mode)
            .with_scale(self.platform_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli { Cli::parse_from(std::iter::once("simulator").chain(args.iter().copied())) }

    #[test]
    fn test_defaults_rect_color() {
        let config = parse(&[]).display_config();
        assert_eq!(config, DisplayConfig::RECT);
    }

    #[test]
    fn test_round_uses_native_size() {
        let config = parse(&["--shape", "round"]).display_config();
        assert_eq!(config.shape, ScreenShape::Round);
        assert_eq!(config.size, Size::new(180, 180));
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&["--width", "200", "--mono", "--platform-scale", "1250", "--window-scale", "3"]);
        let config = cli.display_config();
        assert_eq!(config.size, Size::new(200, 168), "height keeps the default");
        assert_eq!(config.color_mode, ColorMode::Monochrome);
        assert_eq!(config.scale_permille, 1250);
        assert_eq!(cli.window_scale, 3);
    }

    #[test]
    fn test_platform_scale_range() {
        let args = |scale: &str| ["simulator", "--platform-scale", scale].map(str::to_owned);
        assert!(Cli::try_parse_from(args("0")).is_err(), "zero scale rejected");
        assert!(Cli::try_parse_from(args("4001")).is_err(), "above 4x rejected");
        assert!(Cli::try_parse_from(args("100000000")).is_err());
        let cli = Cli::try_parse_from(args("4000")).ok();
        assert_eq!(cli.map(|c| c.platform_scale), Some(4000));
    }
}
