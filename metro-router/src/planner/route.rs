//! Route reconstruction from search results.

use std::collections::HashMap;

use crate::domain::{LineId, SearchState, StationId};

/// A line change between two consecutive route entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interchange {
    /// Index in [`Route::states`] of the state where the change happens.
    pub index: usize,
    /// The station where the traveller changes.
    pub station: StationId,
    /// Line the traveller arrived on.
    pub from: LineId,
    /// Line the traveller leaves on.
    pub to: LineId,
}

/// An ordered sequence of states from start to goal, with its total time.
///
/// An unreachable goal yields a route holding only the start state and no
/// total; check [`is_reachable`](Self::is_reachable) before trusting the
/// route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    states: Vec<SearchState>,
    total_minutes: Option<f64>,
}

impl Route {
    /// The degenerate route returned when the goal cannot be reached.
    pub fn unreachable(start: SearchState) -> Self {
        Self {
            states: vec![start],
            total_minutes: None,
        }
    }

    /// States from start to goal. Each state's line is the line ridden to
    /// reach its station.
    pub fn states(&self) -> &[SearchState] {
        &self.states
    }

    /// Total travel time in minutes, if the goal was reached.
    pub fn total_minutes(&self) -> Option<f64> {
        self.total_minutes
    }

    pub fn is_reachable(&self) -> bool {
        self.total_minutes.is_some()
    }

    pub fn start(&self) -> SearchState {
        self.states[0]
    }

    /// The last state: the goal if reachable, otherwise the start.
    pub fn end(&self) -> SearchState {
        self.states[self.states.len() - 1]
    }

    /// Number of states, including start and goal. Always at least one.
    pub fn stop_count(&self) -> usize {
        self.states.len()
    }

    /// Every place where consecutive states are on different lines.
    pub fn interchanges(&self) -> Vec<Interchange> {
        self.states
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].line != pair[1].line)
            .map(|(index, pair)| Interchange {
                index,
                station: pair[0].station,
                from: pair[0].line,
                to: pair[1].line,
            })
            .collect()
    }

    /// Number of line changes.
    pub fn change_count(&self) -> usize {
        self.interchanges().len()
    }
}

/// Walk the predecessor map back from `reached` to `start`.
///
/// `reached` is the goal-bearing state the search popped, or `None` if the
/// search exhausted its frontier.
pub fn reconstruct(
    start: SearchState,
    reached: Option<SearchState>,
    predecessors: &HashMap<SearchState, Option<SearchState>>,
    best_cost: &HashMap<SearchState, f64>,
) -> Route {
    let Some(goal) = reached else {
        return Route::unreachable(start);
    };
    let Some(&total) = best_cost.get(&goal) else {
        return Route::unreachable(start);
    };

    let mut states = vec![goal];
    let mut current = goal;
    // Predecessor chains are acyclic; the length bound only stops a
    // malformed map from looping forever.
    while current != start && states.len() <= predecessors.len() {
        match predecessors.get(&current).copied().flatten() {
            Some(previous) => {
                states.push(previous);
                current = previous;
            }
            None => break,
        }
    }
    states.reverse();

    Route {
        states,
        total_minutes: Some(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(station: u16, line: usize) -> SearchState {
        SearchState::new(StationId::new(station).unwrap(), LineId::from_index(line))
    }

    #[test]
    fn unreachable_route() {
        let start = state(1, 0);
        let route = reconstruct(start, None, &HashMap::new(), &HashMap::new());

        assert!(!route.is_reachable());
        assert_eq!(route.states(), &[start]);
        assert_eq!(route.total_minutes(), None);
        assert_eq!(route.end(), start);
        assert!(route.interchanges().is_empty());
    }

    #[test]
    fn start_is_goal() {
        let start = state(1, 0);
        let predecessors = HashMap::from([(start, None)]);
        let costs = HashMap::from([(start, 0.0)]);

        let route = reconstruct(start, Some(start), &predecessors, &costs);
        assert!(route.is_reachable());
        assert_eq!(route.states(), &[start]);
        assert_eq!(route.total_minutes(), Some(0.0));
    }

    #[test]
    fn walks_back_and_reverses() {
        let a = state(1, 0);
        let b = state(2, 0);
        let c = state(3, 1);
        let predecessors = HashMap::from([(a, None), (b, Some(a)), (c, Some(b))]);
        let costs = HashMap::from([(a, 0.0), (b, 2.0), (c, 7.0)]);

        let route = reconstruct(a, Some(c), &predecessors, &costs);
        assert_eq!(route.states(), &[a, b, c]);
        assert_eq!(route.total_minutes(), Some(7.0));
        assert_eq!(route.stop_count(), 3);
        assert_eq!(route.start(), a);
        assert_eq!(route.end(), c);
    }

    #[test]
    fn interchanges_marked() {
        let a = state(1, 0);
        let b = state(2, 0);
        let c = state(3, 1);
        let d = state(4, 2);
        let predecessors = HashMap::from([(a, None), (b, Some(a)), (c, Some(b)), (d, Some(c))]);
        let costs = HashMap::from([(a, 0.0), (b, 1.0), (c, 2.0), (d, 3.0)]);

        let route = reconstruct(a, Some(d), &predecessors, &costs);
        let changes = route.interchanges();
        assert_eq!(route.change_count(), 2);
        assert_eq!(
            changes[0],
            Interchange {
                index: 1,
                station: b.station,
                from: LineId::from_index(0),
                to: LineId::from_index(1),
            }
        );
        assert_eq!(changes[1].station, c.station);
        assert_eq!(changes[1].to, LineId::from_index(2));
    }
}
