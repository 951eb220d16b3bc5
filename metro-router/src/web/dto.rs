//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::SearchState;
use crate::network::Network;
use crate::planner::{SearchOutcome, SearchRequest};

/// Query string of a route request.
///
/// Every field is optional at the deserialization level so that missing
/// parameters are reported as JSON errors by the handler instead of being
/// rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    /// Start station, e.g. `1` or `E1`
    pub from: Option<String>,

    /// Line the traveller starts on
    pub from_line: Option<String>,

    /// Destination station
    pub to: Option<String>,

    /// Preferred arrival line (recorded, never constrains the route)
    pub to_line: Option<String>,
}

/// A station in the network description.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Station number
    pub number: u16,

    /// Display label, e.g. `E4`
    pub label: String,

    /// Names of lines serving the station, in enumeration order
    pub lines: Vec<String>,

    /// Whether more than one line serves the station
    pub interchange: bool,
}

/// A line in the network description.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub name: String,
    pub color: Option<String>,
    pub stations: Vec<u16>,
}

/// Response describing the whole network.
#[derive(Debug, Serialize)]
pub struct NetworkResponse {
    pub stations: Vec<StationResult>,
    pub lines: Vec<LineResult>,
}

impl NetworkResponse {
    pub fn from_network(network: &Network) -> Self {
        let stations = network
            .stations()
            .map(|station| StationResult {
                number: station.get(),
                label: station.to_string(),
                lines: network
                    .lines_of(station)
                    .iter()
                    .map(|&line| network.line_name(line).to_string())
                    .collect(),
                interchange: network.is_interchange(station),
            })
            .collect();

        let lines = network
            .lines()
            .map(|(_, line)| LineResult {
                name: line.name().to_string(),
                color: line.color().map(str::to_string),
                stations: line.stations().iter().map(|s| s.get()).collect(),
            })
            .collect();

        Self { stations, lines }
    }
}

/// One stop on a planned route.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Station number
    pub station: u16,

    /// Display label, e.g. `E4`
    pub label: String,

    /// Line ridden to reach this station
    pub line: String,

    /// Whether the traveller changes lines here
    pub interchange: bool,
}

/// A line change on a planned route.
#[derive(Debug, Serialize)]
pub struct ChangeResult {
    pub station: u16,
    pub from_line: String,
    pub to_line: String,
}

/// Response to a route request.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub from: u16,
    pub from_line: String,
    pub to: u16,

    /// Requested arrival line, echoed back
    pub to_line: Option<String>,

    /// Whether the destination can be reached at all
    pub reachable: bool,

    /// Total travel time in minutes, absent when unreachable
    pub total_minutes: Option<f64>,

    /// Stops from start to destination; only the start when unreachable
    pub stops: Vec<StopResult>,

    pub changes: Vec<ChangeResult>,

    /// Number of states the search expanded
    pub expansions: usize,
}

impl RouteResponse {
    pub fn from_outcome(
        network: &Network,
        request: &SearchRequest,
        outcome: &SearchOutcome,
    ) -> Self {
        let route = outcome.route();
        let interchanges = route.interchanges();

        let stops = route
            .states()
            .iter()
            .enumerate()
            .map(|(i, state)| StopResult {
                station: state.station.get(),
                label: state.station.to_string(),
                line: line_name(network, state),
                interchange: interchanges.iter().any(|c| c.index == i),
            })
            .collect();

        let changes = interchanges
            .iter()
            .map(|c| ChangeResult {
                station: c.station.get(),
                from_line: network.line_name(c.from).to_string(),
                to_line: network.line_name(c.to).to_string(),
            })
            .collect();

        Self {
            from: request.start.station.get(),
            from_line: line_name(network, &request.start),
            to: request.goal.get(),
            to_line: request
                .goal_line
                .map(|line| network.line_name(line).to_string()),
            reachable: route.is_reachable(),
            total_minutes: route.total_minutes(),
            stops,
            changes,
            expansions: outcome.expansions(),
        }
    }
}

fn line_name(network: &Network, state: &SearchState) -> String {
    network.line_name(state.line).to_string()
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkBuilder, reference_network};
    use crate::planner::{Planner, SearchConfig};

    #[test]
    fn network_response_lists_everything() {
        let net = reference_network().unwrap();
        let response = NetworkResponse::from_network(&net);

        assert_eq!(response.stations.len(), 14);
        assert_eq!(response.lines.len(), 4);
        assert_eq!(response.lines[0].name, "red");
        assert_eq!(response.lines[0].stations, vec![3, 9, 11, 13]);

        let e13 = &response.stations[12];
        assert_eq!(e13.label, "E13");
        assert_eq!(e13.lines, vec!["red", "green"]);
        assert!(e13.interchange);
        assert!(!response.stations[0].interchange);
    }

    #[test]
    fn route_response_marks_interchange() {
        let net = NetworkBuilder::new(3)
            .edge(1, 2, 5.0)
            .edge(2, 3, 5.0)
            .line("x", [1, 2])
            .line("y", [2, 3])
            .build()
            .unwrap();
        let config = SearchConfig::default();
        let request = SearchRequest::resolve(&net, 1, "x", 3, Some("y")).unwrap();
        let outcome = Planner::new(&net, &config).search(&request).unwrap();

        let response = RouteResponse::from_outcome(&net, &request, &outcome);
        assert!(response.reachable);
        assert_eq!(response.total_minutes, Some(24.0));
        assert_eq!(response.to_line.as_deref(), Some("y"));

        let flags: Vec<bool> = response.stops.iter().map(|s| s.interchange).collect();
        assert_eq!(flags, vec![false, true, false]);
        assert_eq!(response.stops[2].line, "y");

        assert_eq!(response.changes.len(), 1);
        assert_eq!(response.changes[0].station, 2);
        assert_eq!(response.changes[0].from_line, "x");
        assert_eq!(response.changes[0].to_line, "y");
    }

    #[test]
    fn unreachable_serializes_null_total() {
        let net = NetworkBuilder::new(2).line("a", [1, 2]).build().unwrap();
        let config = SearchConfig::default();
        let request = SearchRequest::resolve(&net, 1, "a", 2, None).unwrap();
        let outcome = Planner::new(&net, &config).search(&request).unwrap();

        let response = RouteResponse::from_outcome(&net, &request, &outcome);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["reachable"], false);
        assert!(json["total_minutes"].is_null());
        assert_eq!(json["stops"].as_array().unwrap().len(), 1);
        assert_eq!(json["expansions"], 1);
    }
}
