//! Validated construction of [`Network`] values.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{LineId, StationId};

use super::config::{NetworkConfig, TopologyPolicy};
use super::error::NetworkError;
use super::model::{Line, Network};

/// Raw line membership as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub stations: Vec<u16>,
}

impl LineDef {
    pub fn new(name: impl Into<String>, stations: impl IntoIterator<Item = u16>) -> Self {
        Self {
            name: name.into(),
            color: None,
            stations: stations.into_iter().collect(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A square table of raw distances; `None` marks a missing entry.
pub type DistanceMatrix = Vec<Vec<Option<f64>>>;

/// Builder for [`Network`].
///
/// Distances are given in raw distance units and converted to minutes with
/// [`NetworkConfig::minutes_per_unit`] when the network is built. Nothing is
/// validated until [`build`](Self::build).
///
/// Straight-line distances that are never supplied default to zero, which
/// keeps the heuristic admissible and turns the search into plain Dijkstra.
///
/// # Example
///
/// ```
/// use metro_router::network::NetworkBuilder;
///
/// let network = NetworkBuilder::new(3)
///     .edge(1, 2, 4.0)
///     .edge(2, 3, 4.0)
///     .line("red", [1, 2])
///     .line("blue", [2, 3])
///     .build()
///     .unwrap();
///
/// assert_eq!(network.station_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    size: usize,
    config: NetworkConfig,
    edges: Vec<(u16, u16, f64)>,
    straight_lines: Vec<(u16, u16, f64)>,
    lines: Vec<LineDef>,
}

impl NetworkBuilder {
    /// Start a network with `size` stations, numbered `1..=size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            config: NetworkConfig::default(),
            edges: Vec::new(),
            straight_lines: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Use a custom configuration.
    pub fn config(mut self, config: NetworkConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the policy for edges between stations sharing no line.
    pub fn topology_policy(mut self, policy: TopologyPolicy) -> Self {
        self.config.topology = policy;
        self
    }

    /// Add a direct, symmetric connection.
    pub fn edge(mut self, a: u16, b: u16, distance: f64) -> Self {
        self.edges.push((a, b, distance));
        self
    }

    /// Add a symmetric straight-line distance.
    pub fn straight_line(mut self, a: u16, b: u16, distance: f64) -> Self {
        self.straight_lines.push((a, b, distance));
        self
    }

    /// Add a line serving the given stations.
    pub fn line(self, name: &str, stations: impl IntoIterator<Item = u16>) -> Self {
        self.line_def(LineDef::new(name, stations))
    }

    /// Add a line from its configuration form.
    pub fn line_def(mut self, def: LineDef) -> Self {
        self.lines.push(def);
        self
    }

    /// Add edges from a full distance table.
    ///
    /// Only the upper triangle is read, so the result is symmetric even if
    /// the table is not. The diagonal is ignored.
    pub fn edge_matrix(mut self, table: &[Vec<Option<f64>>]) -> Result<Self, NetworkError> {
        check_square("edge distances", table, self.size)?;
        self.edges.extend(upper_triangle(table));
        Ok(self)
    }

    /// Add straight-line distances from a full table. See [`edge_matrix`](Self::edge_matrix).
    pub fn straight_line_matrix(
        mut self,
        table: &[Vec<Option<f64>>],
    ) -> Result<Self, NetworkError> {
        check_square("straight-line distances", table, self.size)?;
        self.straight_lines.extend(upper_triangle(table));
        Ok(self)
    }

    /// Validate everything and produce the network.
    pub fn build(self) -> Result<Network, NetworkError> {
        let size = self.size;
        if size == 0 {
            return Err(NetworkError::Empty);
        }
        if size > u16::MAX as usize {
            return Err(NetworkError::TooManyStations(size));
        }

        let speed = self.config.train_speed;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(NetworkError::InvalidSpeed(speed));
        }
        let scale = self.config.minutes_per_unit();
        if !scale.is_finite() {
            return Err(NetworkError::InvalidSpeed(speed));
        }

        let mut edge_minutes = vec![f64::INFINITY; size * size];
        for &(a, b, distance) in &self.edges {
            let (a, b, minutes) = check_pair(a, b, distance, scale, size)?;
            edge_minutes[a.index() * size + b.index()] = minutes;
            edge_minutes[b.index() * size + a.index()] = minutes;
        }

        let mut heuristic_minutes = vec![0.0; size * size];
        for &(a, b, distance) in &self.straight_lines {
            let (a, b, minutes) = check_pair(a, b, distance, scale, size)?;
            heuristic_minutes[a.index() * size + b.index()] = minutes;
            heuristic_minutes[b.index() * size + a.index()] = minutes;
        }

        let lines = build_lines(self.lines, size)?;

        let mut station_lines: Vec<Vec<LineId>> = vec![Vec::new(); size];
        for (i, line) in lines.iter().enumerate() {
            for station in &line.stations {
                station_lines[station.index()].push(LineId::from_index(i));
            }
        }
        if let Some(i) = station_lines.iter().position(Vec::is_empty) {
            return Err(NetworkError::UnservedStation(StationId::from_index(i)));
        }

        let network = Network {
            size,
            edge_minutes,
            heuristic_minutes,
            lines,
            station_lines,
        };

        check_topology(&network, self.config.topology)?;

        for (a, b) in network.admissibility_violations() {
            warn!(
                %a, %b,
                heuristic = network.heuristic(a, b),
                edge = network.edge_cost(a, b),
                "straight-line estimate exceeds edge cost; routes may not be optimal"
            );
        }

        debug!(
            stations = size,
            lines = network.lines.len(),
            "network built"
        );

        Ok(network)
    }
}

fn check_square(
    table: &'static str,
    rows: &[Vec<Option<f64>>],
    size: usize,
) -> Result<(), NetworkError> {
    if rows.len() != size {
        return Err(NetworkError::Shape {
            table,
            what: "rows",
            expected: size,
            found: rows.len(),
        });
    }
    for row in rows {
        if row.len() != size {
            return Err(NetworkError::Shape {
                table,
                what: "columns",
                expected: size,
                found: row.len(),
            });
        }
    }
    Ok(())
}

fn upper_triangle(rows: &[Vec<Option<f64>>]) -> impl Iterator<Item = (u16, u16, f64)> + '_ {
    rows.iter().enumerate().flat_map(|(i, row)| {
        row.iter()
            .enumerate()
            .skip(i + 1)
            .filter_map(move |(j, cell)| cell.map(|d| (i as u16 + 1, j as u16 + 1, d)))
    })
}

fn check_station(number: u16, size: usize) -> Result<StationId, NetworkError> {
    StationId::new(number)
        .filter(|s| s.index() < size)
        .ok_or(NetworkError::StationOutOfRange {
            station: number,
            size,
        })
}

/// Validate a station pair and convert its distance to minutes.
fn check_pair(
    a: u16,
    b: u16,
    distance: f64,
    scale: f64,
    size: usize,
) -> Result<(StationId, StationId, f64), NetworkError> {
    let a = check_station(a, size)?;
    let b = check_station(b, size)?;
    if a == b {
        return Err(NetworkError::SelfLoop(a));
    }
    let minutes = distance * scale;
    if !distance.is_finite() || distance < 0.0 || !minutes.is_finite() {
        return Err(NetworkError::InvalidDistance {
            a,
            b,
            value: distance,
        });
    }
    Ok((a, b, minutes))
}

fn build_lines(defs: Vec<LineDef>, size: usize) -> Result<Vec<Line>, NetworkError> {
    if defs.len() > u8::MAX as usize + 1 {
        return Err(NetworkError::TooManyLines(defs.len()));
    }

    let mut names = HashSet::new();
    let mut lines = Vec::with_capacity(defs.len());

    for def in defs {
        if def.name.trim().is_empty() {
            return Err(NetworkError::EmptyLineName);
        }
        if !names.insert(def.name.clone()) {
            return Err(NetworkError::DuplicateLine(def.name));
        }
        if def.stations.is_empty() {
            return Err(NetworkError::EmptyLine(def.name));
        }

        let mut stations = Vec::with_capacity(def.stations.len());
        for &number in &def.stations {
            let station =
                check_station(number, size).map_err(|_| NetworkError::LineStationOutOfRange {
                    line: def.name.clone(),
                    station: number,
                    size,
                })?;
            if !stations.contains(&station) {
                stations.push(station);
            }
        }

        lines.push(Line {
            name: def.name,
            color: def.color,
            stations,
        });
    }

    Ok(lines)
}

fn check_topology(network: &Network, policy: TopologyPolicy) -> Result<(), NetworkError> {
    for a in network.stations() {
        for b in network.neighbors(a).filter(|b| *b > a) {
            if network.first_shared_line(a, b).is_some() {
                continue;
            }
            match policy {
                TopologyPolicy::Reject => return Err(NetworkError::InconsistentTopology { a, b }),
                TopologyPolicy::Skip => {
                    warn!(%a, %b, "connected stations share no line; edge will never be used")
                }
            }
        }
    }
    Ok(())
}
