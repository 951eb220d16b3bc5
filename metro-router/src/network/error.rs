//! Network construction and loading errors.

use std::path::PathBuf;

use crate::domain::StationId;

/// Errors raised while building or loading a network.
///
/// All of these are configuration-data problems: once a [`Network`](super::Network)
/// exists it is internally consistent and searches over it cannot fail for
/// these reasons.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// A network needs at least one station
    #[error("network has no stations")]
    Empty,

    /// More stations than a station id can address
    #[error("network has {0} stations, at most {max} are supported", max = u16::MAX)]
    TooManyStations(usize),

    /// A distance table has the wrong number of rows or columns
    #[error("{table}: expected {expected} {what}, found {found}")]
    Shape {
        table: &'static str,
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// The two distance tables disagree on the number of stations
    #[error("edge table has {edges} stations but straight-line table has {straight_line}")]
    SizeMismatch { edges: usize, straight_line: usize },

    /// A station number outside `[1, size]`
    #[error("station {station} is outside the network (1..={size})")]
    StationOutOfRange { station: u16, size: usize },

    /// An edge or distance from a station to itself
    #[error("station {0} cannot be connected to itself")]
    SelfLoop(StationId),

    /// A negative, NaN or infinite distance
    #[error("invalid distance {value} between {a} and {b}")]
    InvalidDistance {
        a: StationId,
        b: StationId,
        value: f64,
    },

    /// A cell that is not a number
    #[error("{table}: cannot parse {value:?} at row {row}, column {column}")]
    BadCell {
        table: &'static str,
        row: usize,
        column: usize,
        value: String,
    },

    /// Train speed must be a positive finite number
    #[error("invalid train speed {0}")]
    InvalidSpeed(f64),

    /// Line names must be non-empty
    #[error("line names must not be empty")]
    EmptyLineName,

    /// Line names must be unique
    #[error("line {0:?} is defined more than once")]
    DuplicateLine(String),

    /// A line with no stations
    #[error("line {0:?} has no stations")]
    EmptyLine(String),

    /// More lines than a line id can address
    #[error("network has {0} lines, at most 256 are supported")]
    TooManyLines(usize),

    /// A line lists a station that is not in the network
    #[error("line {line:?} lists station {station}, outside the network (1..={size})")]
    LineStationOutOfRange {
        line: String,
        station: u16,
        size: usize,
    },

    /// Every station must be served by at least one line
    #[error("station {0} is not served by any line")]
    UnservedStation(StationId),

    /// Two directly connected stations share no line
    #[error("stations {a} and {b} are connected but share no line")]
    InconsistentTopology { a: StationId, b: StationId },

    /// Reading a data file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A distance table is not valid CSV
    #[error("CSV error in {table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// The line membership file is not valid JSON
    #[error("invalid line membership JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(n: u16) -> StationId {
        StationId::new(n).unwrap()
    }

    #[test]
    fn error_display() {
        let err = NetworkError::StationOutOfRange {
            station: 15,
            size: 14,
        };
        assert_eq!(
            err.to_string(),
            "station 15 is outside the network (1..=14)"
        );

        let err = NetworkError::InconsistentTopology {
            a: station(2),
            b: station(9),
        };
        assert_eq!(
            err.to_string(),
            "stations E2 and E9 are connected but share no line"
        );

        let err = NetworkError::Shape {
            table: "edge_distances.csv",
            what: "columns in row 3",
            expected: 14,
            found: 13,
        };
        assert_eq!(
            err.to_string(),
            "edge_distances.csv: expected 14 columns in row 3, found 13"
        );

        let err = NetworkError::DuplicateLine("red".into());
        assert_eq!(err.to_string(), "line \"red\" is defined more than once");

        let err = NetworkError::UnservedStation(station(6));
        assert_eq!(err.to_string(), "station E6 is not served by any line");
    }
}
