//! The 14-station reference network.
//!
//! Four lines (red, green, blue, yellow) over stations E1 to E14, with trains
//! running at 30 distance units per hour. The data files are compiled in so
//! the reference network is always available, independent of the working
//! directory.

use super::config::NetworkConfig;
use super::error::NetworkError;
use super::load::network_from_readers;
use super::model::Network;

const EDGE_DISTANCES: &str = include_str!("../../data/edge_distances.csv");
const STRAIGHT_LINE_DISTANCES: &str = include_str!("../../data/straight_line_distances.csv");
const LINES: &str = include_str!("../../data/lines.json");

/// Number of stations in the reference network.
pub const REFERENCE_STATIONS: usize = 14;

/// Build the reference network with the default configuration.
pub fn reference_network() -> Result<Network, NetworkError> {
    reference_network_with(NetworkConfig::default())
}

/// Build the reference network with a custom configuration.
pub fn reference_network_with(config: NetworkConfig) -> Result<Network, NetworkError> {
    network_from_readers(
        EDGE_DISTANCES.as_bytes(),
        STRAIGHT_LINE_DISTANCES.as_bytes(),
        LINES.as_bytes(),
        config,
    )
}
