//! Station identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station {input:?}: {reason}")]
pub struct InvalidStation {
    input: String,
    reason: &'static str,
}

/// A station number in a rail network.
///
/// Stations are numbered from 1. Whether a number actually exists depends on
/// the network, so range checks against the station count live in
/// [`Network::check_station`](crate::network::Network::check_station).
///
/// # Examples
///
/// ```
/// use metro_router::domain::StationId;
///
/// let e7 = StationId::parse("E7").unwrap();
/// assert_eq!(e7.get(), 7);
/// assert_eq!(StationId::parse("7").unwrap(), e7);
///
/// // Station numbers start at 1
/// assert!(StationId::parse("0").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct StationId(u16);

impl StationId {
    /// Create a station id from its number. Returns `None` for zero.
    pub const fn new(number: u16) -> Option<Self> {
        if number == 0 {
            None
        } else {
            Some(Self(number))
        }
    }

    /// Create a station id from a zero-based table index.
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u16 + 1)
    }

    /// Parse a station number, accepting an optional `E` prefix.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('E')
            .or_else(|| trimmed.strip_prefix('e'))
            .unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStation {
                input: s.to_string(),
                reason: "must be a station number",
            });
        }

        let number: u16 = digits.parse().map_err(|_| InvalidStation {
            input: s.to_string(),
            reason: "station number too large",
        })?;

        Self::new(number).ok_or_else(|| InvalidStation {
            input: s.to_string(),
            reason: "station numbers start at 1",
        })
    }

    /// The station number (1-based).
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Zero-based index into the network tables.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<u16> for StationId {
    type Error = InvalidStation;

    fn try_from(number: u16) -> Result<Self, Self::Error> {
        Self::new(number).ok_or_else(|| InvalidStation {
            input: number.to_string(),
            reason: "station numbers start at 1",
        })
    }
}

impl From<StationId> for u16 {
    fn from(station: StationId) -> Self {
        station.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any positive number parses, with or without the prefix.
        #[test]
        fn positive_numbers_parse(n in 1u16..=u16::MAX) {
            let plain = StationId::parse(&n.to_string()).unwrap();
            let prefixed = StationId::parse(&format!("E{n}")).unwrap();
            prop_assert_eq!(plain, prefixed);
            prop_assert_eq!(plain.get(), n);
        }

        /// A letter anywhere after the first digit is rejected.
        #[test]
        fn trailing_letters_rejected(s in "[0-9]{1,3}[a-zA-Z][0-9]{0,3}") {
            prop_assert!(StationId::parse(&s).is_err());
        }
    }
}
