//! Full-screen views.
//!
//! Each view draws the whole display from scratch. The host decides when to
//! call it based on the [`crate::controller::Redraw`] returned by the
//! controller.

mod loading;
mod main_view;

pub use loading::draw_loading_view;
pub use main_view::{MainView, ScoreLabel, draw_main_view};
