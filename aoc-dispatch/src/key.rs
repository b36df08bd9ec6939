//! Puzzle keys and the unit naming convention

use std::fmt;

/// Identifies one puzzle instance by its (year, day) pair.
///
/// The day is expected to be in `1..=25` but is not validated here: a key
/// that no unit was generated for simply fails lookup downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PuzzleKey {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
}

impl PuzzleKey {
    pub const fn new(year: u16, day: u8) -> Self {
        Self { year, day }
    }

    /// Deterministic identifier of the unit bound to this key, e.g. `Year2020Day01`.
    ///
    /// The `Day` separator keeps the mapping injective even though the year is
    /// printed without padding.
    pub fn unit_name(&self) -> String {
        format!("Year{}Day{:02}", self.year, self.day)
    }
}

impl fmt::Display for PuzzleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/day{:02}", self.year, self.day)
    }
}

impl From<(u16, u8)> for PuzzleKey {
    fn from((year, day): (u16, u8)) -> Self {
        Self::new(year, day)
    }
}
