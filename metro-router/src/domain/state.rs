//! Search states.

use super::{LineId, StationId};

/// Where a traveller is and which line they are riding.
///
/// Two states at the same station on different lines are distinct: leaving a
/// station costs a line-change penalty or not depending on the line the
/// traveller arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchState {
    pub station: StationId,
    pub line: LineId,
}

impl SearchState {
    pub const fn new(station: StationId, line: LineId) -> Self {
        Self { station, line }
    }

    /// Same station, different line.
    pub const fn with_line(self, line: LineId) -> Self {
        Self {
            station: self.station,
            line,
        }
    }
}
