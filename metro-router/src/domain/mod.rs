//! Domain types for the metro router.
//!
//! Small value types shared by every layer: stations, lines and the
//! (station, line) search state. Station numbers are validated at parse
//! time; range checks against a concrete network happen in
//! [`crate::network`].

mod line;
mod state;
mod station;

pub use line::LineId;
pub use state::SearchState;
pub use station::{InvalidStation, StationId};
