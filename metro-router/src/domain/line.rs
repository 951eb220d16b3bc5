//! Line identifiers.

use std::fmt;

/// A line in a network, identified by its position in the network's line list.
///
/// The position doubles as the line enumeration order: wherever a search has to
/// pick one of several lines shared by two stations, it picks the one with the
/// lowest `LineId`. Names are resolved through
/// [`Network::line_name`](crate::network::Network::line_name).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u8);

impl LineId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u8)
    }

    /// Zero-based position of the line in the network's enumeration order.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}
