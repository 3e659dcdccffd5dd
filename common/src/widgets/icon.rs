//! Weather icon rendering.
//!
//! Walks an [`IconGeometry`] shape list in order. Clouds are filled with the
//! colour of the bubble they sit on before being outlined, so a cloud hides
//! whatever sun strokes were drawn beneath it.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Polyline};

use crate::icons::{IconGeometry, IconShape};
use crate::widgets::primitives::fill_polygon;

/// Colours used to draw an icon.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IconColors {
    /// Sun strokes.
    pub sun: Rgb565,
    /// Cloud outline.
    pub cloud: Rgb565,
    /// Cloud interior (the enclosing bubble's colour).
    pub cloud_fill: Rgb565,
}

/// Draw an icon's shapes in order.
pub fn draw_icon<D>(
    display: &mut D,
    geometry: &IconGeometry,
    colors: IconColors,
    stroke_width: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let sun_style = PrimitiveStyle::with_stroke(colors.sun, stroke_width);
    let cloud_style = PrimitiveStyle::with_stroke(colors.cloud, stroke_width);

    for shape in geometry.shapes() {
        match shape {
            IconShape::SunLine { start, end } => {
                Line::new(*start, *end).into_styled(sun_style).draw(display).ok();
            }
            IconShape::Cloud(cloud) => {
                fill_polygon(display, &cloud.points, colors.cloud_fill);
                Polyline::new(&cloud.points)
                    .into_styled(cloud_style)
                    .draw(display)
                    .ok();
            }
        }
    }
}
