//! Line-aware route planner.
//!
//! Answers: "I am at this station on this line; what is the fastest way to
//! that station?" The search runs A* over (station, line) states, charging
//! a fixed penalty whenever the traveller has to change lines.

mod config;
mod frontier;
mod route;
mod search;

pub use config::{DEFAULT_LINE_CHANGE_PENALTY_MINS, SearchConfig};
pub use frontier::Frontier;
pub use route::{Interchange, Route, reconstruct};
pub use search::{
    NoopObserver, Planner, SearchError, SearchObserver, SearchOutcome, SearchRequest,
};
