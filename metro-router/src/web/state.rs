//! Application state for the web layer.

use std::sync::Arc;

use crate::network::Network;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// The network is read-only after startup. Every request builds its own
/// [`Planner`](crate::planner::Planner) over these shared references, so
/// concurrent searches never contend.
#[derive(Clone)]
pub struct AppState {
    /// The network routes are planned over
    pub network: Arc<Network>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, config: SearchConfig) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
        }
    }
}
