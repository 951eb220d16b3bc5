//! Network construction configuration.

/// Average train speed in the reference network, in distance units per hour.
pub const DEFAULT_TRAIN_SPEED: f64 = 30.0;

/// What to do with a direct edge between two stations that share no line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopologyPolicy {
    /// Refuse to build the network.
    #[default]
    Reject,
    /// Build the network; searches never take the edge.
    Skip,
}

/// Parameters used when turning raw distances into travel times.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Train speed in distance units per hour.
    pub train_speed: f64,

    /// Handling of edges between stations with no common line.
    pub topology: TopologyPolicy,
}

impl NetworkConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(train_speed: f64, topology: TopologyPolicy) -> Self {
        Self {
            train_speed,
            topology,
        }
    }

    /// Minutes needed to cover one distance unit.
    pub fn minutes_per_unit(&self) -> f64 {
        60.0 / self.train_speed
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            train_speed: DEFAULT_TRAIN_SPEED,
            topology: TopologyPolicy::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NetworkConfig::default();

        assert_eq!(config.train_speed, 30.0);
        assert_eq!(config.topology, TopologyPolicy::Reject);
        assert_eq!(config.minutes_per_unit(), 2.0);
    }

    #[test]
    fn custom_config() {
        let config = NetworkConfig::new(60.0, TopologyPolicy::Skip);

        assert_eq!(config.minutes_per_unit(), 1.0);
        assert_eq!(config.topology, TopologyPolicy::Skip);
    }
}
