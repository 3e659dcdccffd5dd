//! In-memory score cache.
//!
//! Holds one score per (region, time period) pair plus the region selected for
//! display. Nothing is persisted: every cell starts at [`SCORE_UNLOADED`] and is
//! filled by messages from the companion.

use crate::model::{Region, SCORE_UNLOADED, Score, TimePeriod};

/// Number of cells in the score table (2 regions x 2 time periods).
pub const SCORE_CELLS: usize = 4;

/// Score table and current region selection.
#[derive(Clone, Debug)]
pub struct ScoreStore {
    /// Indexed by `[region][time]`.
    scores: [[Score; 2]; 2],
    current_region: Region,
}

impl ScoreStore {
    /// Create an empty store (all cells unloaded, North selected).
    pub const fn new() -> Self {
        Self {
            scores: [[SCORE_UNLOADED; 2]; 2],
            current_region: Region::North,
        }
    }

    /// Cached score for one cell, possibly [`SCORE_UNLOADED`].
    #[inline]
    pub const fn get_score(
        &self,
        region: Region,
        time: TimePeriod,
    ) -> Score {
        self.scores[region.index()][time.index()]
    }

    /// Overwrite one cell.
    #[inline]
    pub fn set_score(
        &mut self,
        region: Region,
        time: TimePeriod,
        score: Score,
    ) {
        self.scores[region.index()][time.index()] = score;
    }

    /// Score of the currently selected region.
    #[inline]
    pub const fn current_score(
        &self,
        time: TimePeriod,
    ) -> Score {
        self.get_score(self.current_region, time)
    }

    #[inline]
    pub const fn get_current_region(&self) -> Region { self.current_region }

    /// Select the region to display. Refreshing the display is the caller's job.
    #[inline]
    pub fn set_current_region(
        &mut self,
        region: Region,
    ) {
        self.current_region = region;
    }

    /// Number of cells holding a received score (0..=4).
    pub fn load_progress(&self) -> usize {
        self.scores
            .iter()
            .flatten()
            .filter(|&&score| score != SCORE_UNLOADED)
            .count()
    }

    /// Whether every cell has been received.
    #[inline]
    pub fn is_fully_loaded(&self) -> bool { self.load_progress() == SCORE_CELLS }
}

impl Default for ScoreStore {
    fn default() -> Self { Self::new() }
}
