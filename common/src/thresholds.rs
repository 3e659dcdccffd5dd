//! Centralized score threshold configuration.
//!
//! A score is bucketed into one of four visibility levels. The same cut points
//! select the label text, the score bubble colour and the weather icon, so they
//! live here as compile-time constants with ordering assertions.
//!
//! Thresholds are inclusive lower bounds checked in descending order; the first
//! match wins. Everything below [`SCORE_BARELY_VISIBLE`], including the
//! unloaded sentinel, is "not visible".

use crate::icons::IconKind;
use crate::model::Score;

// =============================================================================
// Score Thresholds
// =============================================================================

/// Lowest score shown as "Visible" with a sun icon.
pub const SCORE_VISIBLE: Score = 8;

/// Lowest score shown as "Partly Visible" with a partly cloudy icon.
pub const SCORE_PARTLY_VISIBLE: Score = 6;

/// Lowest score shown as "Barely Visible" with a mostly cloudy icon.
pub const SCORE_BARELY_VISIBLE: Score = 3;

// Compile-time validation: thresholds must be in descending order
const _: () = assert!(SCORE_VISIBLE > SCORE_PARTLY_VISIBLE);
const _: () = assert!(SCORE_PARTLY_VISIBLE > SCORE_BARELY_VISIBLE);
const _: () = assert!(SCORE_BARELY_VISIBLE > 0);

// =============================================================================
// Visibility Buckets
// =============================================================================

/// Visibility level derived from a score.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Visibility {
    /// Score >= 8.
    Visible,
    /// Score 6-7.
    PartlyVisible,
    /// Score 3-5.
    BarelyVisible,
    /// Score < 3, including the unloaded sentinel.
    NotVisible,
}

impl Visibility {
    /// Bucket a score.
    pub const fn from_score(score: Score) -> Self {
        if score >= SCORE_VISIBLE {
            Self::Visible
        } else if score >= SCORE_PARTLY_VISIBLE {
            Self::PartlyVisible
        } else if score >= SCORE_BARELY_VISIBLE {
            Self::BarelyVisible
        } else {
            Self::NotVisible
        }
    }

    /// Label drawn inside the score bubble.
    pub const fn text(self) -> &'static str {
        match self {
            Self::Visible => "Visible",
            Self::PartlyVisible => "Partly\nVisible",
            Self::BarelyVisible => "Barely\nVisible",
            Self::NotVisible => "Not\nVisible",
        }
    }

    /// Number of text lines the label needs.
    pub const fn line_count(self) -> u32 {
        match self {
            Self::Visible => 1,
            _ => 2,
        }
    }

    /// Weather icon drawn next to the label.
    pub const fn icon(self) -> IconKind {
        match self {
            Self::Visible => IconKind::Sun,
            Self::PartlyVisible => IconKind::PartlyCloudy,
            Self::BarelyVisible => IconKind::MostlyCloudy,
            Self::NotVisible => IconKind::VeryCloudy,
        }
    }
}

/// Label text for a score.
#[inline]
pub const fn score_text(score: Score) -> &'static str { Visibility::from_score(score).text() }

/// Number of label lines for a score.
#[inline]
pub const fn score_line_count(score: Score) -> u32 { Visibility::from_score(score).line_count() }

// =============================================================================
// Unit Tests
// =============================================================================
