//! Search configuration for the route planner.

/// Minutes lost changing lines at a station in the reference network.
pub const DEFAULT_LINE_CHANGE_PENALTY_MINS: f64 = 4.0;

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Fixed time added whenever continuing requires switching lines
    /// (minutes).
    pub line_change_penalty_mins: f64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(line_change_penalty_mins: f64) -> Self {
        Self {
            line_change_penalty_mins,
        }
    }

    /// Returns the line-change penalty in minutes.
    pub fn line_change_penalty(&self) -> f64 {
        self.line_change_penalty_mins
    }

    /// A penalty must be a finite, non-negative number of minutes.
    pub fn is_valid(&self) -> bool {
        self.line_change_penalty_mins.is_finite() && self.line_change_penalty_mins >= 0.0
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            line_change_penalty_mins: DEFAULT_LINE_CHANGE_PENALTY_MINS,
        }
    }
}
