//! Widget components for the watch face.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` for platform independence.

mod icon;
mod primitives;

pub use icon::{IconColors, draw_icon};
pub use primitives::{MAX_SCANLINE_CROSSINGS, draw_bubble, draw_text_box, fill_polygon, scanline_crossings};
