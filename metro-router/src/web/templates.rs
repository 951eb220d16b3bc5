//! Askama templates for the web frontend.

use askama::Template;

use crate::network::Network;
use crate::planner::{SearchOutcome, SearchRequest};
use crate::render::format_minutes;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<StationView>,
    pub lines: Vec<LineView>,
}

impl IndexTemplate {
    pub fn from_network(network: &Network) -> Self {
        let stations = network
            .stations()
            .map(|station| StationView {
                number: station.get(),
                label: station.to_string(),
                lines: network
                    .lines_of(station)
                    .iter()
                    .map(|&line| network.line_name(line).to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();

        let lines = network
            .lines()
            .map(|(_, line)| LineView {
                name: line.name().to_string(),
                color: css_color(line.color().unwrap_or(line.name())),
            })
            .collect();

        Self { stations, lines }
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Planned route fragment.
#[derive(Template)]
#[template(path = "route.html")]
pub struct RouteTemplate {
    pub route: RouteView,
}

/// Error fragment.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A station option in the route form.
#[derive(Debug, Clone)]
pub struct StationView {
    pub number: u16,
    pub label: String,
    /// Serving lines, comma separated
    pub lines: String,
}

/// A line in the legend.
#[derive(Debug, Clone)]
pub struct LineView {
    pub name: String,
    pub color: String,
}

/// One stop on a rendered route.
#[derive(Debug, Clone)]
pub struct StopView {
    pub label: String,
    pub line: String,
    pub color: String,
    /// Set when the traveller changes here; names the line they change to.
    pub change_to: Option<String>,
}

impl StopView {
    pub fn is_interchange(&self) -> bool {
        self.change_to.is_some()
    }

    pub fn change_to_line(&self) -> &str {
        self.change_to.as_deref().unwrap_or_default()
    }
}

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub from: String,
    pub to: String,
    pub reachable: bool,
    pub duration_display: String,
    pub changes: usize,
    pub expansions: usize,
    pub stops: Vec<StopView>,
}

impl RouteView {
    pub fn from_outcome(
        network: &Network,
        request: &SearchRequest,
        outcome: &SearchOutcome,
    ) -> Self {
        let route = outcome.route();
        let interchanges = route.interchanges();

        let stops = route
            .states()
            .iter()
            .enumerate()
            .map(|(i, state)| {
                let line = network.line(state.line);
                StopView {
                    label: state.station.to_string(),
                    line: line.name().to_string(),
                    color: css_color(line.color().unwrap_or(line.name())),
                    change_to: interchanges
                        .iter()
                        .find(|c| c.index == i)
                        .map(|c| network.line_name(c.to).to_string()),
                }
            })
            .collect();

        let duration_display = route
            .total_minutes()
            .map(|m| format!("{} min", format_minutes(m)))
            .unwrap_or_default();

        Self {
            from: request.start.station.to_string(),
            to: request.goal.to_string(),
            reachable: route.is_reachable(),
            duration_display,
            changes: interchanges.len(),
            expansions: outcome.expansions(),
            stops,
        }
    }
}

/// CSS colour for a configured line colour. Only plain colour names are let
/// through; anything else falls back to grey.
fn css_color(color: &str) -> String {
    if !color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic()) {
        color.to_ascii_lowercase()
    } else {
        "grey".to_string()
    }
}
