//! Frame pacing and wall-clock tick detection.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

const SECONDS_PER_HOUR: i64 = 3600;

/// Fires once each time the wall-clock hour changes.
///
/// The first poll only records the current hour; start-up requests are
/// driven by the companion's `ready` message instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct HourTicker {
    last_hour: Option<i64>,
}

impl HourTicker {
    pub const fn new() -> Self { Self { last_hour: None } }

    /// Returns `true` if `unix_seconds` falls in a different hour than the previous poll.
    pub fn poll(
        &mut self,
        unix_seconds: i64,
    ) -> bool {
        let hour = unix_seconds.div_euclid(SECONDS_PER_HOUR);
        let changed = self.last_hour.is_some_and(|last| last != hour);
        self.last_hour = Some(hour);
        changed
    }
}
