//! Application state and event handling.
//!
//! [`App`] owns every piece of mutable state: the score table, the active
//! view, the main view's displayed text and the log buffer. The host calls
//! into it from a single event loop:
//!
//! - [`App::handle_message`] for every inbound companion message
//! - [`App::handle_click`] for button presses
//! - [`App::handle_hour_tick`] when the wall-clock hour changes
//! - [`App::draw`] whenever the returned [`Redraw`] says something changed
//!
//! # View Lifecycle
//!
//! ```text
//! Loading ──(4/4 scores received, first time)──> Main
//! ```
//!
//! The transition is one-way. Once the main view is up it stays up for the
//! lifetime of the process, even if a later message sets a cell back to the
//! unloaded sentinel.

use core::fmt;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::Palette;
use crate::config::DisplayConfig;
use crate::layout::Layout;
use crate::log_buffer::{LogBuffer, LogLevel};
use crate::message::{Dictionary, InboundMessage, OutboundRequest, Outbox, send_request, send_update_all};
use crate::model::TimePeriod;
use crate::screens::{MainView, draw_loading_view, draw_main_view};
use crate::store::ScoreStore;

/// Which page is on screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum View {
    /// Splash shown until every score has arrived.
    Loading,
    /// Scores for the selected region.
    Main,
}

/// Physical buttons.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Button {
    Up,
    Select,
    Down,
    Back,
}

/// What the host needs to redraw after an event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Redraw {
    /// Nothing visible changed.
    None,
    /// One score bubble, its text and icon changed.
    Score(TimePeriod),
    /// Date, region and both scores changed.
    All,
    /// The loading view was replaced by the main view.
    ShowMain,
}

/// Watch application state.
pub struct App {
    store: ScoreStore,
    layout: Layout,
    palette: Palette,
    view: View,
    main: MainView,
    logs: LogBuffer,
    uptime_ms: u32,
    clock_seconds: i64,
}

impl App {
    /// Start with an empty score table (loading view).
    pub fn new(config: DisplayConfig) -> Self { Self::with_store(config, ScoreStore::new()) }

    /// Start with an existing score table. A fully loaded table opens
    /// straight into the main view.
    pub fn with_store(
        config: DisplayConfig,
        store: ScoreStore,
    ) -> Self {
        let layout = Layout::new(config);
        let mut app = Self {
            store,
            layout,
            palette: Palette::for_mode(config.color_mode),
            view: View::Loading,
            main: MainView::new(&layout),
            logs: LogBuffer::new(),
            uptime_ms: 0,
            clock_seconds: 0,
        };
        app.log(
            LogLevel::Info,
            format_args!("Started {}x{}", config.size.width, config.size.height),
        );
        if app.store.is_fully_loaded() {
            app.show_main();
        }
        app
    }

    // =========================================================================
    // Host Clock
    // =========================================================================

    /// Milliseconds since start, used to timestamp log entries.
    pub fn set_uptime_ms(
        &mut self,
        uptime_ms: u32,
    ) {
        self.uptime_ms = uptime_ms;
    }

    /// Wall-clock time (Unix seconds) used for the date line on the next full update.
    pub fn set_clock(
        &mut self,
        unix_seconds: i64,
    ) {
        self.clock_seconds = unix_seconds;
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    /// Apply an inbound companion message.
    ///
    /// Malformed or unknown messages are ignored without touching any state.
    pub fn handle_message<O>(
        &mut self,
        dict: &Dictionary,
        outbox: &mut O,
    ) -> Redraw
    where
        O: Outbox + ?Sized,
    {
        let Some(message) = InboundMessage::parse(dict) else {
            let kind = dict.message_type().unwrap_or("?");
            self.log(LogLevel::Debug, format_args!("Ignored message: {kind}"));
            return Redraw::None;
        };

        match message {
            InboundMessage::Ready => {
                self.log(LogLevel::Info, format_args!("Companion ready"));
                self.request_update_all(outbox);
                Redraw::None
            }
            InboundMessage::NewScore { region, time, score } => {
                let was_loaded = self.store.is_fully_loaded();
                self.store.set_score(region, time, score);
                self.log(
                    LogLevel::Info,
                    format_args!("Score {} {}: {}", region.wire_name(), time.wire_name(), score),
                );

                if self.try_show_main(was_loaded) {
                    return Redraw::ShowMain;
                }
                if self.view == View::Main && region == self.store.get_current_region() {
                    self.main.update_score(&self.layout, &self.store, time);
                    return Redraw::Score(time);
                }
                Redraw::None
            }
            InboundMessage::NewScores(scores) => {
                let was_loaded = self.store.is_fully_loaded();
                for (region, time, score) in scores.cells() {
                    self.store.set_score(region, time, score);
                }
                self.log(
                    LogLevel::Info,
                    format_args!(
                        "Scores N {}/{} S {}/{}",
                        scores.north_morning, scores.north_afternoon, scores.south_morning, scores.south_afternoon
                    ),
                );

                if self.try_show_main(was_loaded) {
                    return Redraw::ShowMain;
                }
                if self.view == View::Main {
                    self.update_all();
                    return Redraw::All;
                }
                Redraw::None
            }
        }
    }

    /// Handle a button press. Up and Down toggle the region on the main view.
    pub fn handle_click(
        &mut self,
        button: Button,
    ) -> Redraw {
        if self.view != View::Main {
            return Redraw::None;
        }
        match button {
            Button::Up | Button::Down => {
                let region = self.store.get_current_region().toggle();
                self.store.set_current_region(region);
                self.log(LogLevel::Debug, format_args!("Region: {}", region.label()));
                self.update_all();
                Redraw::All
            }
            Button::Select | Button::Back => Redraw::None,
        }
    }

    /// Process start: request scores without waiting for the companion's `ready`.
    pub fn start<O>(
        &mut self,
        outbox: &mut O,
    ) -> bool
    where
        O: Outbox + ?Sized,
    {
        self.log(LogLevel::Info, format_args!("Requesting scores"));
        self.request_update_all(outbox)
    }

    /// Hourly refresh: ask the companion for fresh scores.
    pub fn handle_hour_tick<O>(
        &mut self,
        outbox: &mut O,
    ) where
        O: Outbox + ?Sized,
    {
        self.log(LogLevel::Info, format_args!("Hour tick"));
        self.request_update_all(outbox);
    }

    /// Send `update_all`. Failures are logged and not retried.
    pub fn request_update_all<O>(
        &mut self,
        outbox: &mut O,
    ) -> bool
    where
        O: Outbox + ?Sized,
    {
        match send_update_all(outbox) {
            Ok(()) => {
                self.log(LogLevel::Debug, format_args!("Sent update_all"));
                true
            }
            Err(error) => {
                self.log(LogLevel::Error, format_args!("[AppMessage] {error}"));
                false
            }
        }
    }

    /// Ask the companion to recompute one score of the selected region.
    pub fn request_score<O>(
        &mut self,
        outbox: &mut O,
        time: TimePeriod,
    ) -> bool
    where
        O: Outbox + ?Sized,
    {
        let region = self.store.get_current_region();
        match send_request(outbox, OutboundRequest::UpdateSingle { region, time }) {
            Ok(()) => {
                self.log(
                    LogLevel::Debug,
                    format_args!("Sent update_single {} {}", region.wire_name(), time.wire_name()),
                );
                true
            }
            Err(error) => {
                self.log(LogLevel::Error, format_args!("[AppMessage] {error}"));
                false
            }
        }
    }

    // =========================================================================
    // View Updates
    // =========================================================================

    /// Switch to the main view if this update completed the first full load.
    fn try_show_main(
        &mut self,
        was_loaded: bool,
    ) -> bool {
        if was_loaded || self.view == View::Main || !self.store.is_fully_loaded() {
            return false;
        }
        self.show_main();
        true
    }

    fn show_main(&mut self) {
        self.view = View::Main;
        self.main = MainView::new(&self.layout);
        self.update_all();
        self.log(LogLevel::Info, format_args!("Showing main view"));
    }

    /// Refresh date, region and both score labels.
    fn update_all(&mut self) {
        self.main.update_all(&self.layout, &self.store, self.clock_seconds);
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw the active view.
    pub fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        match self.view {
            View::Loading => draw_loading_view(display, &self.layout, &self.palette),
            View::Main => draw_main_view(display, &self.layout, &self.palette, &self.main),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Append a log entry stamped with the current uptime.
    pub fn log(
        &mut self,
        level: LogLevel,
        args: fmt::Arguments<'_>,
    ) {
        self.logs.push_fmt(level, self.uptime_ms, args);
    }

    #[inline]
    pub const fn view(&self) -> View { self.view }

    #[inline]
    pub const fn store(&self) -> &ScoreStore { &self.store }

    #[inline]
    pub const fn main_view(&self) -> &MainView { &self.main }

    #[inline]
    pub const fn logs(&self) -> &LogBuffer { &self.logs }

    #[inline]
    pub const fn layout(&self) -> &Layout { &self.layout }

    #[inline]
    pub const fn palette(&self) -> &Palette { &self.palette }
}
