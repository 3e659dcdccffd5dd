//! Core data model: regions, time periods and scores.
//!
//! A score is a visibility rating from 0 (not visible) to 10 (perfect view).
//! The sentinel [`SCORE_UNLOADED`] marks a cell that has not been received
//! from the companion yet.

/// Visibility score. Valid range is 0..=10 once loaded, -1 before that.
pub type Score = i8;

/// Sentinel for a score that has not been received yet.
pub const SCORE_UNLOADED: Score = -1;

/// Geographic area a score pair belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Region {
    /// Northern observation points (default selection).
    #[default]
    North,
    /// Southern observation points.
    South,
}

impl Region {
    /// Both regions in table order.
    pub const ALL: [Self; 2] = [Self::North, Self::South];

    /// Switch to the other region.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
        }
    }

    /// Label shown in the region bubble.
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::South => "South",
        }
    }

    /// Name used on the wire.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
        }
    }

    /// Parse the wire name. Anything other than the two known names is rejected.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "north" => Some(Self::North),
            "south" => Some(Self::South),
            _ => None,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
        }
    }
}

/// Morning or afternoon half of a region's forecast.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimePeriod {
    Morning,
    Afternoon,
}

impl TimePeriod {
    /// Both periods in display order (top to bottom).
    pub const ALL: [Self; 2] = [Self::Morning, Self::Afternoon];

    /// The other period.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Morning => Self::Afternoon,
            Self::Afternoon => Self::Morning,
        }
    }

    /// Label drawn inside the time bubble.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
        }
    }

    /// Name used on the wire.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
        }
    }

    /// Parse the wire name. Anything other than the two known names is rejected.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            _ => None,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Morning => 0,
            Self::Afternoon => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_default() {
        assert_eq!(Region::default(), Region::North);
    }

    #[test]
    fn test_region_toggle_cycle() {
        let region = Region::North;
        let region = region.toggle(); // -> South
        assert_eq!(region, Region::South);
        let region = region.toggle(); // -> North
        assert_eq!(region, Region::North);
    }

    #[test]
    fn test_time_toggle() {
        assert_eq!(TimePeriod::Morning.toggle(), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::Afternoon.toggle(), TimePeriod::Morning);
    }

    #[test]
    fn test_wire_names_parse() {
        for region in Region::ALL {
            assert_eq!(Region::from_wire(region.wire_name()), Some(region));
        }
        for time in TimePeriod::ALL {
            assert_eq!(TimePeriod::from_wire(time.wire_name()), Some(time));
        }
    }

    #[test]
    fn test_unknown_wire_names_rejected() {
        assert_eq!(Region::from_wire("east"), None);
        assert_eq!(Region::from_wire("North"), None);
        assert_eq!(TimePeriod::from_wire("evening"), None);
        assert_eq!(TimePeriod::from_wire(""), None);
    }
}
