//! Web layer for the route planner.
//!
//! Provides HTTP endpoints for inspecting the network and planning routes,
//! as JSON or as HTML fragments.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
