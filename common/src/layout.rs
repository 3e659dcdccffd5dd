//! Screen-shape dependent layout.
//!
//! Every rectangle is derived on demand from the [`DisplayConfig`]; nothing is
//! cached. The screen is split vertically into a region band at the top and two
//! equal time bubbles (morning, then afternoon) separated by one padding unit.
//!
//! ```text
//! rectangular                      round
//! ┌──────────────────────────┐     ┌──────────────────────────┐
//! │ Mon Oct 19      [North]  │     │         [North]          │
//! │ ┌──────────────────────┐ │     │   ┌──────────────────┐   │
//! │ │ icon     ┌────────┐  │ │     │   │ icon ┌────────┐  │   │
//! │ │ Morning  │ score  │  │ │     │   │ Morn │ score  │  │   │
//! │ └──────────└────────┘──┘ │     │   └──────└────────┘──┘   │
//! │ ┌──────────────────────┐ │     │   ┌──────────────────┐   │
//! │ │ ...    afternoon     │ │     │   │ ... afternoon    │   │
//! │ └──────────────────────┘ │     │   └──────────────────┘   │
//! └──────────────────────────┘     │       Mon Oct 19         │
//!                                  └──────────────────────────┘
//! ```
//!
//! No bounds validation is performed: degenerate display sizes produce
//! zero-sized rectangles rather than errors.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::config::{
    DisplayConfig,
    ICON_SIZE,
    ICON_X,
    LOADING_TEXT_HEIGHT,
    LOADING_TEXT_Y_PADDING,
    PADDING,
    REGION_BUBBLE_HEIGHT,
    REGION_BUBBLE_WIDTH,
    REGION_TEXT_INSET,
    ROUND_BUBBLE_HEIGHT,
    ROUND_ICON_SIZE,
    ROUND_ICON_X_OFFSET,
    ROUND_INSET,
    ROUND_LABEL_OFFSET_Y,
    SCORE_BUBBLE_HEIGHT,
    SCORE_RIGHT_MARGIN,
    ScreenShape,
    TIME_BUBBLE_HEIGHT,
};
use crate::model::TimePeriod;

/// Build a rectangle from signed layout values, clamping negative sizes to zero.
#[inline]
pub fn rect(
    x: i32,
    y: i32,
    w: i32,
    h: i32,
) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w.max(0) as u32, h.max(0) as u32))
}

/// Where and how large to draw a weather icon.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IconPlacement {
    /// Top-left corner of the icon's `size x size` box.
    pub anchor: Point,
    /// Icon edge length in pixels.
    pub size: i32,
}

/// Computes rectangles for every UI element of the watch face.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    config: DisplayConfig,
}

impl Layout {
    pub const fn new(config: DisplayConfig) -> Self { Self { config } }

    #[inline]
    pub const fn config(&self) -> &DisplayConfig { &self.config }

    #[inline]
    const fn is_round(&self) -> bool { matches!(self.config.shape, ScreenShape::Round) }

    /// Full screen rectangle.
    pub const fn bounds(&self) -> Rectangle { Rectangle::new(Point::zero(), self.config.size) }

    /// Height of a time bubble for the current shape.
    pub const fn time_bubble_height(&self) -> i32 {
        if self.is_round() { self.config.scale(ROUND_BUBBLE_HEIGHT) } else { TIME_BUBBLE_HEIGHT }
    }

    /// Morning or afternoon bubble.
    ///
    /// Bubbles start below the region band (`PADDING * 2 + REGION_BUBBLE_HEIGHT`)
    /// and the afternoon bubble follows the morning one after one padding unit.
    /// Round screens inset the bubbles further to stay clear of the curved edge.
    pub fn bubble_rect(
        &self,
        time: TimePeriod,
    ) -> Rectangle {
        let width = self.config.width();
        let bubble_height = self.time_bubble_height();
        let base_y = PADDING * 2 + REGION_BUBBLE_HEIGHT;
        let y = match time {
            TimePeriod::Morning => base_y,
            TimePeriod::Afternoon => base_y + bubble_height + PADDING,
        };
        let inset = if self.is_round() { self.config.scale(ROUND_INSET) } else { PADDING };
        rect(inset, y, width - inset * 2, bubble_height)
    }

    /// Score bubble and score text frame inside a time bubble.
    ///
    /// Sits in the right half of the screen, vertically centred in the time
    /// bubble. Single-line labels get a bubble one padding unit shorter at the
    /// top and bottom so the text does not look offset.
    pub fn score_rect(
        &self,
        time: TimePeriod,
        line_count: u32,
    ) -> Rectangle {
        let bubble = self.bubble_rect(time);
        let width = self.config.width();
        let single_line_padding_y = if line_count == 1 { PADDING } else { 0 };
        let inset = if self.is_round() { self.config.scale(ROUND_INSET) + PADDING } else { PADDING * 2 };
        let bubble_height = self.time_bubble_height();

        rect(
            width / 2 + PADDING,
            bubble.top_left.y + (bubble_height / 2 - SCORE_BUBBLE_HEIGHT / 2) + single_line_padding_y,
            width / 2 - inset - SCORE_RIGHT_MARGIN,
            SCORE_BUBBLE_HEIGHT - single_line_padding_y * 2,
        )
    }

    /// Region bubble: top right on rectangular screens, top centre on round ones.
    pub fn region_bubble_rect(&self) -> Rectangle {
        rect(self.region_bubble_x(), PADDING, REGION_BUBBLE_WIDTH, REGION_BUBBLE_HEIGHT)
    }

    /// Region label frame, inset inside the region bubble.
    pub fn region_text_rect(&self) -> Rectangle {
        rect(
            self.region_bubble_x() + REGION_TEXT_INSET,
            PADDING,
            REGION_BUBBLE_WIDTH - REGION_TEXT_INSET * 2,
            REGION_BUBBLE_HEIGHT,
        )
    }

    fn region_bubble_x(&self) -> i32 {
        let width = self.config.width();
        if self.is_round() { (width - REGION_BUBBLE_WIDTH) / 2 } else { width - PADDING - REGION_BUBBLE_WIDTH }
    }

    /// Date line: top left on rectangular screens, bottom centre on round ones.
    pub fn date_rect(&self) -> Rectangle {
        let width = self.config.width();
        let y = if self.is_round() { self.config.height() - REGION_BUBBLE_HEIGHT - PADDING } else { PADDING };
        rect(PADDING, y, width - PADDING * 2, REGION_BUBBLE_HEIGHT)
    }

    /// Whether the date line is centred (round) or left aligned (rectangular).
    #[inline]
    pub const fn date_centered(&self) -> bool { self.is_round() }

    /// "Morning" / "Afternoon" label frame.
    pub fn time_label_rect(
        &self,
        time: TimePeriod,
    ) -> Rectangle {
        let bubble = self.bubble_rect(time);
        let width = self.config.width();
        let label_width = match time {
            TimePeriod::Morning => width / 2 - PADDING * 3,
            TimePeriod::Afternoon => width / 2,
        };

        if self.is_round() {
            rect(
                bubble.top_left.x + PADDING,
                bubble.top_left.y + self.config.scale(ROUND_LABEL_OFFSET_Y),
                label_width,
                REGION_BUBBLE_HEIGHT,
            )
        } else {
            // Morning sits at 2.5 padding units, afternoon at 2
            let x = match time {
                TimePeriod::Morning => (PADDING * 5 + 1) / 2,
                TimePeriod::Afternoon => PADDING * 2,
            };
            rect(x, bubble.top_left.y + REGION_BUBBLE_HEIGHT * 2, label_width, REGION_BUBBLE_HEIGHT)
        }
    }

    /// Weather icon position and size inside a time bubble.
    pub fn icon_placement(
        &self,
        time: TimePeriod,
    ) -> IconPlacement {
        let bubble = self.bubble_rect(time);
        let y = bubble.top_left.y + PADDING;
        if self.is_round() {
            IconPlacement {
                anchor: Point::new(bubble.top_left.x + self.config.scale(ROUND_ICON_X_OFFSET), y),
                size: self.config.scale(ROUND_ICON_SIZE),
            }
        } else {
            IconPlacement {
                anchor: Point::new(self.config.scale(ICON_X), y),
                size: ICON_SIZE,
            }
        }
    }

    /// "Loading..." text frame, just below the screen centre.
    pub fn loading_text_rect(&self) -> Rectangle {
        rect(
            0,
            self.config.height() / 2 + LOADING_TEXT_Y_PADDING,
            self.config.width(),
            LOADING_TEXT_HEIGHT,
        )
    }
}
