//! The network model.
//!
//! A [`Network`] holds everything the planner needs to know about the rail
//! system: direct travel times, straight-line time estimates and which
//! lines serve which stations. Networks are built with [`NetworkBuilder`],
//! loaded from data files with [`load_network`], or taken ready-made from
//! [`reference_network`].

mod builder;
mod config;
mod error;
mod load;
mod model;
mod reference;

pub use builder::{DistanceMatrix, LineDef, NetworkBuilder};
pub use config::{DEFAULT_TRAIN_SPEED, NetworkConfig, TopologyPolicy};
pub use error::NetworkError;
pub use load::{
    EDGE_DISTANCES_FILE, LINES_FILE, STRAIGHT_LINE_DISTANCES_FILE, load_network,
    network_from_readers, read_distance_table, read_lines,
};
pub use model::{Line, Network};
pub use reference::{REFERENCE_STATIONS, reference_network, reference_network_with};
