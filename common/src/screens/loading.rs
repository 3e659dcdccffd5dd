//! Loading view shown until the first full set of scores arrives.
//!
//! # Visual Layout
//!
//! ```text
//! ┌──────────────────────────┐
//! │                          │
//! │          ____            │
//! │         /^^^^\           │  Mountain splash (centred)
//! │        /      \          │
//! │       /________\         │
//! │                          │
//! │        Loading...        │  Centred below the middle
//! └──────────────────────────┘
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::Palette;
use crate::layout::Layout;
use crate::styles::{centered_box, loading_style};
use crate::widgets::{draw_text_box, fill_polygon};

/// Loading message.
pub const LOADING_TEXT: &str = "Loading...";

/// Mountain body outline relative to the screen centre. Flat summit.
const MOUNTAIN: [Point; 4] = [Point::new(-40, 24), Point::new(-8, -24), Point::new(8, -24), Point::new(40, 24)];

/// Snow cap outline relative to the screen centre. Edges follow the body.
const SNOW_CAP: [Point; 7] = [
    Point::new(-8, -24),
    Point::new(8, -24),
    Point::new(20, -6),
    Point::new(10, -10),
    Point::new(0, -4),
    Point::new(-10, -10),
    Point::new(-20, -6),
];

/// Draw the loading view.
pub fn draw_loading_view<D>(
    display: &mut D,
    layout: &Layout,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(palette.loading_background).ok();
    draw_splash(display, layout.bounds().center(), palette);
    draw_text_box(
        display,
        LOADING_TEXT,
        layout.loading_text_rect(),
        loading_style(palette.loading_text),
        centered_box(),
    );
}

fn draw_splash<D>(
    display: &mut D,
    center: Point,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_polygon(display, &MOUNTAIN.map(|p| p + center), palette.splash_mountain);
    fill_polygon(display, &SNOW_CAP.map(|p| p + center), palette.splash_snow);
}
