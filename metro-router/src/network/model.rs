//! The immutable network model queried by the planner.

use crate::domain::{LineId, SearchState, StationId};

use super::error::NetworkError;

/// A named line and the stations it serves.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(super) name: String,
    pub(super) color: Option<String>,
    pub(super) stations: Vec<StationId>,
}

impl Line {
    /// The line's name, e.g. `"red"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display colour, if one was configured.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Stations served, in the order they were listed.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }
}

/// A rail network: travel times, straight-line estimates and line membership.
///
/// Built once through [`NetworkBuilder`](super::NetworkBuilder) and never
/// mutated afterwards, so a single `Network` can be shared by any number of
/// concurrent searches without locking.
///
/// Times are in minutes. Both tables are symmetric.
#[derive(Debug, Clone)]
pub struct Network {
    pub(super) size: usize,
    /// Row-major `size * size`; `+inf` where there is no direct edge.
    pub(super) edge_minutes: Vec<f64>,
    /// Row-major `size * size`; zero on the diagonal.
    pub(super) heuristic_minutes: Vec<f64>,
    pub(super) lines: Vec<Line>,
    /// Lines serving each station, ascending by `LineId`.
    pub(super) station_lines: Vec<Vec<LineId>>,
}

impl Network {
    /// Number of stations. Valid station numbers are `1..=station_count()`.
    pub fn station_count(&self) -> usize {
        self.size
    }

    /// All stations in ascending order.
    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.size).map(StationId::from_index)
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines in enumeration order, paired with their ids.
    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Line)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (LineId::from_index(i), line))
    }

    /// Look up a line definition.
    ///
    /// # Panics
    ///
    /// Panics if `line` was issued by a network with more lines than this
    /// one. Use [`Network::get_line`] for ids of unknown origin.
    pub fn line(&self, line: LineId) -> &Line {
        &self.lines[line.index()]
    }

    /// Look up a line definition, or `None` if this network has no such line.
    pub fn get_line(&self, line: LineId) -> Option<&Line> {
        self.lines.get(line.index())
    }

    /// The name of a line.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Network::line`].
    pub fn line_name(&self, line: LineId) -> &str {
        &self.line(line).name
    }

    /// Resolve a line by name (exact match).
    pub fn line_by_name(&self, name: &str) -> Option<LineId> {
        self.lines
            .iter()
            .position(|line| line.name == name)
            .map(LineId::from_index)
    }

    /// Check that a station number exists in this network.
    pub fn check_station(&self, number: u16) -> Result<StationId, NetworkError> {
        match StationId::new(number) {
            Some(station) if station.index() < self.size => Ok(station),
            _ => Err(NetworkError::StationOutOfRange {
                station: number,
                size: self.size,
            }),
        }
    }

    /// Direct travel time between two stations, or `+inf` if they are not
    /// directly connected.
    pub fn edge_cost(&self, a: StationId, b: StationId) -> f64 {
        self.edge_minutes[a.index() * self.size + b.index()]
    }

    /// Lower bound on the travel time from `station` to `goal`.
    pub fn heuristic(&self, station: StationId, goal: StationId) -> f64 {
        self.heuristic_minutes[station.index() * self.size + goal.index()]
    }

    /// Lines serving a station, in enumeration order. Never empty.
    pub fn lines_of(&self, station: StationId) -> &[LineId] {
        &self.station_lines[station.index()]
    }

    /// Whether `line` stops at `station`.
    pub fn serves(&self, station: StationId, line: LineId) -> bool {
        self.lines_of(station).contains(&line)
    }

    /// Whether the station is served by more than one line.
    pub fn is_interchange(&self, station: StationId) -> bool {
        self.lines_of(station).len() > 1
    }

    /// Stations directly connected to `station`, ascending.
    pub fn neighbors(&self, station: StationId) -> impl Iterator<Item = StationId> + '_ {
        let row = station.index() * self.size;
        self.edge_minutes[row..row + self.size]
            .iter()
            .enumerate()
            .filter(|(_, cost)| cost.is_finite())
            .map(|(i, _)| StationId::from_index(i))
    }

    /// The first line, in enumeration order, serving both stations.
    pub fn first_shared_line(&self, a: StationId, b: StationId) -> Option<LineId> {
        let b_lines = self.lines_of(b);
        self.lines_of(a)
            .iter()
            .copied()
            .find(|line| b_lines.contains(line))
    }

    /// Build a search state after checking the line serves the station.
    pub fn state(&self, station: StationId, line: LineId) -> Option<SearchState> {
        self.serves(station, line)
            .then(|| SearchState::new(station, line))
    }

    /// Directly connected pairs whose straight-line estimate exceeds the
    /// edge cost. Such pairs break A* optimality.
    pub fn admissibility_violations(&self) -> Vec<(StationId, StationId)> {
        let mut violations = Vec::new();
        for a in self.stations() {
            for b in self.neighbors(a).filter(|b| *b > a) {
                if self.heuristic(a, b) > self.edge_cost(a, b) {
                    violations.push((a, b));
                }
            }
        }
        violations
    }
}
