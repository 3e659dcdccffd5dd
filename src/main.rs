// Crate-level lints: Allow common embedded/graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // u128 -> u32 uptime, f64 -> i8 scores
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)] // u32 -> i32 for pixel math
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)] // main() is long but well-structured

//! Desktop simulator for the Fuji visibility watch face.
//!
//! Stands in for the watch platform: an SDL window for the display, the
//! keyboard for the buttons, the system clock for hour ticks, and an
//! in-process [`bridge::Bridge`] plus [`companion::Companion`] for the phone.
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `Up` / `Down` | Toggle region (north ↔ south) |
//! | `S` | Request a single-score refresh (alternates morning/afternoon) |
//! | `D` | Toggle simulated disconnect |
//! | `H` | Force an hour tick |
//! | `L` | Switch between watch face and logs |
//! | `Escape` | Quit |
//!
//! Key repeat is ignored to prevent toggle spam when holding keys.
//!
//! # Frame Loop
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌────────────┐   ┌──────────┐
//! │  events  │──>│ hour ticker   │──>│ companion  │──>│  watch   │
//! │ (keys)   │   │ (system time) │   │ (requests) │   │ (inbox)  │
//! └──────────┘   └───────────────┘   └────────────┘   └──────────┘
//!                                                          │
//!                                          redraw if dirty <┘
//! ```

mod bridge;
mod cli;
mod companion;
mod input;
mod pages;
mod screens;
mod timing;

use std::thread;
use std::time::Instant;

use bridge::Bridge;
use chrono::Utc;
use clap::Parser;
use cli::Cli;
use companion::{Companion, SimulatedWeather};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use input::KeyAction;
use pages::Page;
use screens::draw_logs_page;
use timing::{FRAME_TIME, HourTicker};
use visibility_common::log_buffer::LogLevel;
use visibility_common::{App, Redraw, TimePeriod};

fn main() {
    let cli = Cli::parse();
    let config = cli.display_config();

    // Initialize display and window (simulator mode)
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(config.size);
    let output_settings = OutputSettingsBuilder::new().scale(cli.window_scale).build();
    let mut window = Window::new("Fuji Visibility", &output_settings);

    // ==========================================================================
    // Main Loop State
    // ==========================================================================

    let started = Instant::now();
    let mut app = App::new(config);
    let mut bridge = Bridge::new();
    let mut companion = Companion::new(SimulatedWeather::with_seed(cli.seed));
    let mut hour_ticker = HourTicker::new();
    hour_ticker.poll(Utc::now().timestamp());

    // Page navigation state (watch face is default, L toggles to logs)
    let mut current_page = Page::default();
    // Whole-frame redraw flag, set by anything that changes what is shown
    let mut dirty = true;
    // S alternates which period gets a single refresh
    let mut next_single = TimePeriod::Morning;

    // Ask for scores straight away; the companion's ready triggers another request
    app.start(&mut bridge);
    bridge.post_to_watch(Companion::<SimulatedWeather>::ready_message());

    // ==========================================================================
    // Main Loop
    // ==========================================================================

    loop {
        let frame_start = Instant::now();
        let now = Utc::now().timestamp();
        app.set_uptime_ms(started.elapsed().as_millis() as u32);
        app.set_clock(now);

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat to prevent toggle spam when holding keys
                    if repeat {
                        continue;
                    }
                    let Some(action) = KeyAction::from_key_name(&keycode.name()) else {
                        continue;
                    };
                    match action {
                        KeyAction::Quit => return,
                        KeyAction::TogglePage => {
                            current_page = current_page.toggle();
                            dirty = true;
                        }
                        KeyAction::Press(button) if current_page.forwards_buttons() => {
                            dirty |= app.handle_click(button) != Redraw::None;
                        }
                        KeyAction::Press(_) => {}
                        KeyAction::RequestScore => {
                            app.request_score(&mut bridge, next_single);
                            next_single = next_single.toggle();
                            dirty |= current_page.redraws_on_activity();
                        }
                        KeyAction::ToggleConnection => {
                            let connected = bridge.toggle_connected();
                            app.log(
                                LogLevel::Warn,
                                format_args!("Link {}", if connected { "restored" } else { "lost" }),
                            );
                            dirty |= current_page.redraws_on_activity();
                        }
                        KeyAction::HourTick => {
                            app.handle_hour_tick(&mut bridge);
                            dirty |= current_page.redraws_on_activity();
                        }
                    }
                }
                _ => {}
            }
        }

        // ======================================================================
        // Hour Tick
        // ======================================================================

        if hour_ticker.poll(now) {
            app.handle_hour_tick(&mut bridge);
            dirty |= current_page.redraws_on_activity();
        }

        // ======================================================================
        // Message Exchange
        // ======================================================================

        while let Some(request) = bridge.next_for_companion() {
            if let Some(reply) = companion.handle(&request) {
                bridge.post_to_watch(reply);
            }
        }
        while let Some(message) = bridge.next_for_watch() {
            let redraw = app.handle_message(&message, &mut bridge);
            dirty |= redraw != Redraw::None || current_page.redraws_on_activity();
        }

        // ======================================================================
        // Rendering
        // ======================================================================

        if dirty {
            match current_page {
                Page::Watch => app.draw(&mut display),
                Page::Logs => draw_logs_page(&mut display, app.logs(), bridge.is_connected()),
            }
            dirty = false;
        }
        window.update(&display);

        // Sleep to maintain target frame rate (~50 FPS)
        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
