//! In-memory framebuffer for rendering tests.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Framebuffer that records every pixel written. Unwritten pixels are `None`.
pub struct TestDisplay {
    size: Size,
    pixels: Vec<Option<Rgb565>>,
}

impl TestDisplay {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![None; (size.width * size.height) as usize],
        }
    }

    /// Colour at a pixel, `None` if never drawn or out of bounds.
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Option<Rgb565> {
        if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
            return None;
        }
        self.pixels[(y as u32 * self.size.width + x as u32) as usize]
    }

    /// Number of pixels with the given colour.
    pub fn count(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels.iter().filter(|p| **p == Some(color)).count()
    }

    /// Number of pixels with the given colour inside a rectangle.
    pub fn count_in(
        &self,
        color: Rgb565,
        rect: Rectangle,
    ) -> usize {
        rect.points().filter(|p| self.pixel(p.x, p.y) == Some(color)).count()
    }

    /// Whether every pixel of the given colour lies inside `rect`.
    pub fn all_within(
        &self,
        color: Rgb565,
        rect: Rectangle,
    ) -> bool {
        self.count(color) == self.count_in(color, rect)
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for TestDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 && point.x < self.size.width as i32 && point.y < self.size.height as i32 {
                self.pixels[(point.y as u32 * self.size.width + point.x as u32) as usize] = Some(color);
            }
        }
        Ok(())
    }
}
