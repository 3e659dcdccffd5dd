//! Low-level drawing primitives shared across screens.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{CornerRadii, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_text::TextBox;
use embedded_text::style::TextBoxStyle;
use heapless::Vec;

/// Maximum edge crossings tracked per scanline. A cloud outline crosses any
/// row at most four times; the headroom covers arbitrary simple polygons.
pub const MAX_SCANLINE_CROSSINGS: usize = 32;

/// Fill a rectangle with rounded corners.
pub fn draw_bubble<D>(
    display: &mut D,
    rect: Rectangle,
    radius: u32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if rect.is_zero_sized() {
        return;
    }
    RoundedRectangle::new(rect, CornerRadii::new(Size::new(radius, radius)))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Draw text inside a rectangle using a text box style.
pub fn draw_text_box<D>(
    display: &mut D,
    text: &str,
    rect: Rectangle,
    character_style: MonoTextStyle<'_, Rgb565>,
    box_style: TextBoxStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if rect.is_zero_sized() || text.is_empty() {
        return;
    }
    TextBox::with_textbox_style(text, rect, character_style, box_style)
        .draw(display)
        .ok();
}

/// X coordinates where polygon edges cross the horizontal line through `y`,
/// sorted ascending.
///
/// Edges are treated as half-open in y (top row included, bottom row excluded),
/// so a vertex shared by two edges is counted once and horizontal edges are
/// skipped entirely. The polygon is implicitly closed.
pub fn scanline_crossings(
    points: &[Point],
    y: i32,
) -> Vec<i32, MAX_SCANLINE_CROSSINGS> {
    let mut crossings: Vec<i32, MAX_SCANLINE_CROSSINGS> = Vec::new();
    let count = points.len();

    for i in 0..count {
        let a = points[i];
        let b = points[(i + 1) % count];
        if a.y == b.y {
            continue;
        }

        let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
        if y < top.y || y >= bottom.y {
            continue;
        }

        let x = top.x + (y - top.y) * (bottom.x - top.x) / (bottom.y - top.y);
        if crossings.push(x).is_err() {
            break;
        }
    }

    crossings.sort_unstable();
    crossings
}

/// Fill a closed polygon using even-odd scanline spans.
///
/// The bottom-most row is left to the outline, matching how the filled shape
/// is always stroked afterwards.
pub fn fill_polygon<D>(
    display: &mut D,
    points: &[Point],
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if points.len() < 3 {
        return;
    }

    let (min_y, max_y) = points
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let style = PrimitiveStyle::with_fill(color);

    for y in min_y..max_y {
        let crossings = scanline_crossings(points, y);
        for span in crossings.chunks_exact(2) {
            let width = (span[1] - span[0] + 1) as u32;
            Rectangle::new(Point::new(span[0], y), Size::new(width, 1))
                .into_styled(style)
                .draw(display)
                .ok();
        }
    }
}
