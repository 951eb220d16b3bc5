//! Line-aware A* route search.
//!
//! Searches over (station, line) states. Continuing on the current line
//! costs only the edge travel time; moving to a station the current line
//! does not serve also costs the line-change penalty. The straight-line
//! time to the goal guides expansion.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::{LineId, SearchState, StationId};
use crate::network::Network;

use super::config::SearchConfig;
use super::frontier::Frontier;
use super::route::{Route, reconstruct};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Station number outside the network
    #[error("station {station} is out of range (1..={size})")]
    StationOutOfRange { station: u16, size: usize },

    /// The requested line does not stop at the station
    #[error("line {line} does not serve {station}")]
    LineNotServing { station: StationId, line: String },

    /// No line with this name exists
    #[error("unknown line {0:?}")]
    UnknownLine(String),

    /// Search configuration is unusable
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

/// Request for a route search.
///
/// The goal is a station; arriving there on any line completes the search.
/// A goal line may be recorded for the caller's benefit but never constrains
/// the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest {
    /// Where the traveller starts and the line they start on.
    pub start: SearchState,

    /// The destination station.
    pub goal: StationId,

    /// The line the traveller asked to arrive on, if any.
    pub goal_line: Option<LineId>,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(start: SearchState, goal: StationId) -> Self {
        Self {
            start,
            goal,
            goal_line: None,
        }
    }

    /// Record the requested arrival line.
    pub fn with_goal_line(mut self, line: LineId) -> Self {
        self.goal_line = Some(line);
        self
    }

    /// Resolve station numbers and line names against a network.
    pub fn resolve(
        network: &Network,
        start_station: u16,
        start_line: &str,
        goal_station: u16,
        goal_line: Option<&str>,
    ) -> Result<Self, SearchError> {
        let start = resolve_state(network, start_station, start_line)?;
        let goal = station_in(network, goal_station)?;

        let mut request = Self::new(start, goal);
        if let Some(name) = goal_line {
            request = request.with_goal_line(resolve_state(network, goal_station, name)?.line);
        }
        Ok(request)
    }

    /// Validate the search request.
    pub fn validate(&self, network: &Network) -> Result<(), SearchError> {
        station_in(network, self.start.station.get())?;
        station_in(network, self.goal.get())?;
        check_serves(network, self.start.station, self.start.line)?;
        if let Some(line) = self.goal_line {
            check_serves(network, self.goal, line)?;
        }
        Ok(())
    }
}

fn station_in(network: &Network, number: u16) -> Result<StationId, SearchError> {
    network
        .check_station(number)
        .map_err(|_| SearchError::StationOutOfRange {
            station: number,
            size: network.station_count(),
        })
}

fn check_serves(network: &Network, station: StationId, line: LineId) -> Result<(), SearchError> {
    if line.index() >= network.line_count() {
        return Err(SearchError::UnknownLine(format!("#{}", line.index())));
    }
    if !network.serves(station, line) {
        return Err(SearchError::LineNotServing {
            station,
            line: network.line_name(line).to_string(),
        });
    }
    Ok(())
}

fn resolve_state(network: &Network, number: u16, line: &str) -> Result<SearchState, SearchError> {
    let station = station_in(network, number)?;
    let line_id = network
        .line_by_name(line.trim())
        .ok_or_else(|| SearchError::UnknownLine(line.trim().to_string()))?;
    check_serves(network, station, line_id)?;
    Ok(SearchState::new(station, line_id))
}

/// Hooks into the search loop, used for diagnostics.
pub trait SearchObserver {
    /// A state was popped from the frontier with its best known cost.
    fn on_expand(&mut self, _state: SearchState, _cost: f64) {}

    /// The frontier after a state's neighbours were relaxed.
    fn on_frontier(&mut self, _frontier: &Frontier) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Everything a finished search knows.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    start: SearchState,
    goal: StationId,
    reached: Option<SearchState>,
    predecessors: HashMap<SearchState, Option<SearchState>>,
    best_cost: HashMap<SearchState, f64>,
    expansions: usize,
}

impl SearchOutcome {
    pub fn start(&self) -> SearchState {
        self.start
    }

    pub fn goal(&self) -> StationId {
        self.goal
    }

    /// The goal-bearing state that ended the search, if any.
    pub fn reached(&self) -> Option<SearchState> {
        self.reached
    }

    pub fn is_reachable(&self) -> bool {
        self.reached.is_some()
    }

    /// Lowest known cost to a state.
    pub fn cost_to(&self, state: &SearchState) -> Option<f64> {
        self.best_cost.get(state).copied()
    }

    /// The state `state` was reached from. `Some(None)` for the start.
    pub fn predecessor(&self, state: &SearchState) -> Option<Option<SearchState>> {
        self.predecessors.get(state).copied()
    }

    pub fn predecessors(&self) -> &HashMap<SearchState, Option<SearchState>> {
        &self.predecessors
    }

    pub fn best_costs(&self) -> &HashMap<SearchState, f64> {
        &self.best_cost
    }

    /// Number of states popped from the frontier.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Build the route to the goal.
    pub fn route(&self) -> Route {
        reconstruct(
            self.start,
            self.reached,
            &self.predecessors,
            &self.best_cost,
        )
    }
}

/// Route planner over a fixed network.
///
/// Holds only shared references; each call to [`search`](Self::search)
/// owns its own frontier and maps, so one network can serve concurrent
/// searches.
pub struct Planner<'a> {
    network: &'a Network,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    /// Search for the fastest route and return the reconstructed route.
    pub fn plan(&self, request: &SearchRequest) -> Result<Route, SearchError> {
        Ok(self.search(request)?.route())
    }

    /// Run the search.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        self.search_observed(request, &mut NoopObserver)
    }

    /// Run the search, reporting progress to `observer`.
    pub fn search_observed<O: SearchObserver>(
        &self,
        request: &SearchRequest,
        observer: &mut O,
    ) -> Result<SearchOutcome, SearchError> {
        if !self.config.is_valid() {
            return Err(SearchError::InvalidConfig(format!(
                "line change penalty {} must be finite and non-negative",
                self.config.line_change_penalty()
            )));
        }
        request.validate(self.network)?;

        let network = self.network;
        let penalty = self.config.line_change_penalty();
        let start = request.start;
        let goal = request.goal;

        let mut predecessors = HashMap::from([(start, None)]);
        let mut best_cost = HashMap::from([(start, 0.0)]);
        let mut frontier = Frontier::new();
        frontier.push(start, 0.0);

        let mut reached = None;
        let mut expansions = 0;

        while let Some(current) = frontier.pop() {
            // Every queued state has a recorded cost.
            let current_cost = best_cost[&current];
            expansions += 1;
            observer.on_expand(current, current_cost);

            trace!(
                station = %current.station,
                line = network.line_name(current.line),
                cost = current_cost,
                "expanding"
            );

            if current.station == goal {
                reached = Some(current);
                break;
            }

            for next_station in network.neighbors(current.station) {
                let mut cost = current_cost + network.edge_cost(current.station, next_station);

                let line = if network.serves(next_station, current.line) {
                    current.line
                } else {
                    cost += penalty;
                    match network.first_shared_line(current.station, next_station) {
                        Some(line) => line,
                        None => {
                            trace!(
                                from = %current.station,
                                to = %next_station,
                                "no shared line, skipping transition"
                            );
                            continue;
                        }
                    }
                };

                let next = SearchState::new(next_station, line);
                if best_cost.get(&next).is_none_or(|&known| cost < known) {
                    best_cost.insert(next, cost);
                    predecessors.insert(next, Some(current));
                    frontier.push(next, cost + network.heuristic(next_station, goal));
                }
            }

            observer.on_frontier(&frontier);
        }

        debug!(
            start = %start.station,
            goal = %goal,
            reachable = reached.is_some(),
            cost = reached.and_then(|s| best_cost.get(&s).copied()),
            expansions,
            "search complete"
        );

        Ok(SearchOutcome {
            start,
            goal,
            reached,
            predecessors,
            best_cost,
            expansions,
        })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
