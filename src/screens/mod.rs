//! Simulator-only pages. The watch face views live in the common crate.

mod logs;

pub use logs::draw_logs_page;
