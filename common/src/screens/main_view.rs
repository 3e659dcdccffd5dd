//! Main view: date, region and the two time-period score bubbles.
//!
//! [`MainView`] holds what is currently displayed. It only changes through
//! [`MainView::update_score`] and [`MainView::update_all`], so a score that
//! arrives for the region that is not selected leaves the screen untouched.
//!
//! # Draw Order
//!
//! 1. Window colour
//! 2. Background panel
//! 3. Region bubble
//! 4. Morning and afternoon bubbles
//! 5. Score bubbles (coloured by visibility)
//! 6. Text: date, region, time labels, score labels
//! 7. Weather icons

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::Palette;
use crate::config::{CORNER_RADIUS_BUBBLE, CORNER_RADIUS_MAIN, ICON_STROKE};
use crate::date::{DateText, format_date};
use crate::icons::IconGeometry;
use crate::layout::Layout;
use crate::model::{SCORE_UNLOADED, Score, TimePeriod};
use crate::store::ScoreStore;
use crate::styles::{centered_box, label_style, left_box};
use crate::thresholds::{Visibility, score_line_count, score_text};
use crate::widgets::{IconColors, draw_bubble, draw_icon, draw_text_box};

/// Displayed state of one score bubble.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScoreLabel {
    /// Score the label was last refreshed from.
    pub score: Score,
    /// Label text ("Visible", "Partly\nVisible", ...).
    pub text: &'static str,
    /// Score bubble and text frame.
    pub frame: Rectangle,
}

/// Everything the main view displays.
#[derive(Clone, Debug)]
pub struct MainView {
    pub date: DateText,
    pub region: &'static str,
    morning: ScoreLabel,
    afternoon: ScoreLabel,
}

impl MainView {
    /// Blank view with two-line score frames.
    pub fn new(layout: &Layout) -> Self {
        let blank = |time: TimePeriod| ScoreLabel {
            score: SCORE_UNLOADED,
            text: "",
            frame: layout.score_rect(time, 2),
        };
        Self {
            date: DateText::new(),
            region: "",
            morning: blank(TimePeriod::Morning),
            afternoon: blank(TimePeriod::Afternoon),
        }
    }

    pub const fn label(
        &self,
        time: TimePeriod,
    ) -> &ScoreLabel {
        match time {
            TimePeriod::Morning => &self.morning,
            TimePeriod::Afternoon => &self.afternoon,
        }
    }

    fn label_mut(
        &mut self,
        time: TimePeriod,
    ) -> &mut ScoreLabel {
        match time {
            TimePeriod::Morning => &mut self.morning,
            TimePeriod::Afternoon => &mut self.afternoon,
        }
    }

    /// Refresh one score label from the selected region's score.
    ///
    /// Single-line labels get the shorter frame from [`Layout::score_rect`].
    pub fn update_score(
        &mut self,
        layout: &Layout,
        store: &ScoreStore,
        time: TimePeriod,
    ) {
        let score = store.current_score(time);
        *self.label_mut(time) = ScoreLabel {
            score,
            text: score_text(score),
            frame: layout.score_rect(time, score_line_count(score)),
        };
    }

    /// Refresh date, region and both score labels.
    pub fn update_all(
        &mut self,
        layout: &Layout,
        store: &ScoreStore,
        unix_seconds: i64,
    ) {
        self.date = format_date(unix_seconds);
        self.region = store.get_current_region().label();
        for time in TimePeriod::ALL {
            self.update_score(layout, store, time);
        }
    }
}

// =============================================================================
// Drawing
// =============================================================================

const fn time_bubble_color(
    palette: &Palette,
    time: TimePeriod,
) -> Rgb565 {
    match time {
        TimePeriod::Morning => palette.morning_bubble,
        TimePeriod::Afternoon => palette.afternoon_bubble,
    }
}

const fn time_text_color(
    palette: &Palette,
    time: TimePeriod,
) -> Rgb565 {
    match time {
        TimePeriod::Morning => palette.morning_text,
        TimePeriod::Afternoon => palette.afternoon_text,
    }
}

/// Draw the main view.
pub fn draw_main_view<D>(
    display: &mut D,
    layout: &Layout,
    palette: &Palette,
    view: &MainView,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(palette.window).ok();

    // Panels
    draw_bubble(display, layout.bounds(), CORNER_RADIUS_MAIN, palette.background_bubble);
    draw_bubble(display, layout.region_bubble_rect(), CORNER_RADIUS_BUBBLE, palette.region_bubble);
    for time in TimePeriod::ALL {
        draw_bubble(display, layout.bubble_rect(time), CORNER_RADIUS_MAIN, time_bubble_color(palette, time));
    }
    for time in TimePeriod::ALL {
        let label = view.label(time);
        let color = palette.score_bubble(Visibility::from_score(label.score));
        draw_bubble(display, label.frame, CORNER_RADIUS_BUBBLE, color);
    }

    // Text
    let date_box = if layout.date_centered() { centered_box() } else { left_box() };
    draw_text_box(display, &view.date, layout.date_rect(), label_style(palette.date_text), date_box);
    draw_text_box(
        display,
        view.region,
        layout.region_text_rect(),
        label_style(palette.region_text),
        centered_box(),
    );
    for time in TimePeriod::ALL {
        draw_text_box(
            display,
            time.label(),
            layout.time_label_rect(time),
            label_style(time_text_color(palette, time)),
            left_box(),
        );
        let label = view.label(time);
        draw_text_box(display, label.text, label.frame, label_style(palette.score_text), centered_box());
    }

    // Icons
    for time in TimePeriod::ALL {
        let placement = layout.icon_placement(time);
        let geometry = IconGeometry::for_score(view.label(time).score, placement.anchor, placement.size);
        let colors = IconColors {
            sun: palette.sun,
            cloud: palette.cloud,
            cloud_fill: time_bubble_color(palette, time),
        };
        draw_icon(display, &geometry, colors, ICON_STROKE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ISLAMIC_GREEN, LIBERTY, OXFORD_BLUE, RAJAH, RED, SUNSET_ORANGE, YELLOW};
    use crate::config::{ColorMode, DisplayConfig};
    use crate::model::Region;
    use crate::test_display::TestDisplay;

    fn loaded_store(scores: [Score; 4]) -> ScoreStore {
        let mut store = ScoreStore::new();
        store.set_score(Region::North, TimePeriod::Morning, scores[0]);
        store.set_score(Region::North, TimePeriod::Afternoon, scores[1]);
        store.set_score(Region::South, TimePeriod::Morning, scores[2]);
        store.set_score(Region::South, TimePeriod::Afternoon, scores[3]);
        store
    }

    fn render(
        config: DisplayConfig,
        store: &ScoreStore,
    ) -> (TestDisplay, MainView, Layout) {
        let layout = Layout::new(config);
        let mut view = MainView::new(&layout);
        view.update_all(&layout, store, 1_601_823_600);
        let mut display = TestDisplay::new(config.size);
        draw_main_view(&mut display, &layout, &Palette::for_mode(config.color_mode), &view);
        (display, view, layout)
    }

    #[test]
    fn test_update_all_fills_labels() {
        let store = loaded_store([9, 6, 4, 1]);
        let (_, view, layout) = render(DisplayConfig::RECT, &store);

        assert_eq!(view.date.as_str(), "Mon Oct  5");
        assert_eq!(view.region, "North");
        assert_eq!(view.label(TimePeriod::Morning).text, "Visible");
        assert_eq!(view.label(TimePeriod::Morning).frame, layout.score_rect(TimePeriod::Morning, 1));
        assert_eq!(view.label(TimePeriod::Afternoon).text, "Partly\nVisible");
        assert_eq!(view.label(TimePeriod::Afternoon).frame, layout.score_rect(TimePeriod::Afternoon, 2));
    }

    #[test]
    fn test_window_corners_and_panels() {
        let store = loaded_store([9, 6, 4, 1]);
        let (display, _, layout) = render(DisplayConfig::RECT, &store);

        assert_eq!(display.pixel(0, 0), Some(OXFORD_BLUE), "window shows through the panel's rounded corner");
        assert_eq!(display.pixel(3, 40), Some(Palette::COLOR.background_bubble), "panel margin");

        let morning = layout.bubble_rect(TimePeriod::Morning);
        assert_eq!(display.pixel(morning.top_left.x + 60, morning.top_left.y + 2), Some(SUNSET_ORANGE));
        let afternoon = layout.bubble_rect(TimePeriod::Afternoon);
        let bottom = afternoon.top_left.y + afternoon.size.height as i32 - 3;
        assert_eq!(display.pixel(afternoon.top_left.x + 60, bottom), Some(LIBERTY));
    }

    #[test]
    fn test_score_bubble_colours_follow_visibility() {
        let store = loaded_store([9, 6, 4, 1]);
        let (display, view, _) = render(DisplayConfig::RECT, &store);

        let morning = view.label(TimePeriod::Morning).frame;
        assert!(display.count_in(ISLAMIC_GREEN, morning) > 0, "score 9 is green");

        let mut south = store.clone();
        south.set_current_region(Region::South);
        let (display, view, _) = render(DisplayConfig::RECT, &south);
        assert!(display.count_in(RAJAH, view.label(TimePeriod::Morning).frame) > 0, "score 4 is rajah");
        assert!(display.count_in(RED, view.label(TimePeriod::Afternoon).frame) > 0, "score 1 is red");
    }

    #[test]
    fn test_sun_icon_only_for_visible_score() {
        let store = loaded_store([10, 2, 4, 1]);
        let (display, _, layout) = render(DisplayConfig::RECT, &store);

        let morning = layout.bubble_rect(TimePeriod::Morning);
        assert!(display.count_in(YELLOW, morning) > 0, "sun drawn in the morning bubble");

        // Very cloudy icon has no sun strokes
        let afternoon = layout.bubble_rect(TimePeriod::Afternoon);
        assert_eq!(display.count_in(YELLOW, afternoon), 0);
    }

    #[test]
    fn test_unloaded_cell_renders_not_visible() {
        let mut store = loaded_store([9, 6, 4, 1]);
        store.set_score(Region::North, TimePeriod::Afternoon, SCORE_UNLOADED);
        let (display, view, _) = render(DisplayConfig::ROUND, &store);

        let label = view.label(TimePeriod::Afternoon);
        assert_eq!(label.text, "Not\nVisible");
        assert!(display.count_in(RED, label.frame) > 0);
    }

    #[test]
    fn test_monochrome_uses_white_score_bubbles() {
        let store = loaded_store([9, 6, 4, 1]);
        let config = DisplayConfig::RECT.with_color_mode(ColorMode::Monochrome);
        let (display, view, _) = render(config, &store);

        assert_eq!(display.count(ISLAMIC_GREEN), 0);
        let frame = view.label(TimePeriod::Afternoon).frame;
        let inside = Point::new(frame.top_left.x + 2, frame.top_left.y + frame.size.height as i32 / 2);
        assert_eq!(display.pixel(inside.x, inside.y), Some(Rgb565::WHITE));
    }

    #[test]
    fn test_round_layout_draws_date_at_bottom() {
        let store = loaded_store([9, 6, 4, 1]);
        let (display, _, layout) = render(DisplayConfig::ROUND, &store);
        let date = layout.date_rect();
        assert!(display.count_in(Rgb565::WHITE, date) > 0, "date text drawn in its row");
    }
}
