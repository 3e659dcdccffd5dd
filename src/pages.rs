//! Page navigation for the simulator window.
//!
//! Press `L` to toggle between pages.
//!
//! # Pages
//!
//! - [`Page::Watch`]: The watch face (loading or main view)
//! - [`Page::Logs`]: Recent log entries from the watch app

/// Available pages in the simulator.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// Watch face as it would appear on the device.
    #[default]
    Watch,

    /// Log viewer with colour-coded levels and timestamps.
    Logs,
}

impl Page {
    /// Toggle to the other page.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Watch => Self::Logs,
            Self::Logs => Self::Watch,
        }
    }

    /// Watch buttons only reach the app while its face is visible.
    #[inline]
    pub const fn forwards_buttons(self) -> bool { matches!(self, Self::Watch) }

    /// The logs page changes whenever anything is logged, so any activity
    /// needs a redraw. The watch face redraws only when the app asks for it.
    #[inline]
    pub const fn redraws_on_activity(self) -> bool { matches!(self, Self::Logs) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_watch_face() {
        let page = Page::default();
        assert_eq!(page, Page::Watch);
        assert!(page.forwards_buttons(), "buttons work at start-up");
        assert!(!page.redraws_on_activity());
    }

    #[test]
    fn test_logs_page_swallows_buttons() {
        let logs = Page::Watch.toggle();
        assert_eq!(logs, Page::Logs);
        assert!(!logs.forwards_buttons(), "region toggles are blocked while reading logs");
        assert!(logs.redraws_on_activity(), "new log lines must appear");
        assert_eq!(logs.toggle(), Page::Watch);
    }
}
