//! Text rendering of stations, routes and the search frontier.
//!
//! Used by the command-line front end. The web layer has its own view
//! models in [`crate::web`].

use std::fmt::Write as _;
use std::io;

use crate::domain::SearchState;
use crate::network::Network;
use crate::planner::{Frontier, Route, SearchObserver};

const RESET: &str = "\x1b[0m";

/// How labels are decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Bare `E<n>` labels.
    #[default]
    Plain,
    /// Labels wrapped in the ANSI colour of their line.
    Ansi,
}

/// ANSI escape for a colour name, if it is one we know.
fn ansi_code(color: &str) -> Option<&'static str> {
    match color.to_ascii_lowercase().as_str() {
        "red" => Some("\x1b[91m"),
        "green" => Some("\x1b[92m"),
        "yellow" => Some("\x1b[93m"),
        "blue" => Some("\x1b[94m"),
        "magenta" => Some("\x1b[95m"),
        "cyan" => Some("\x1b[96m"),
        _ => None,
    }
}

/// Label for a state, e.g. `E4`.
///
/// With [`Style::Ansi`] the label is coloured after the line's configured
/// colour, falling back to the line name. Unknown colours render plain.
pub fn station_label(network: &Network, state: SearchState, style: Style) -> String {
    let label = state.station.to_string();
    if style == Style::Plain {
        return label;
    }

    let line = network.line(state.line);
    match ansi_code(line.color().unwrap_or(line.name())) {
        Some(code) => format!("{code}{label}{RESET}"),
        None => label,
    }
}

/// The route as `E1 -> E2 -> ...`.
///
/// Wherever the line changes, the interchange station is listed a second
/// time on the new line, so `E4 -> E4 -> E13` reads as "change at E4".
pub fn render_route(network: &Network, route: &Route, style: Style) -> String {
    let states = route.states();
    let mut labels = Vec::with_capacity(states.len() + route.change_count());

    for pair in states.windows(2) {
        labels.push(station_label(network, pair[0], style));
        if pair[0].line != pair[1].line {
            labels.push(station_label(
                network,
                pair[0].with_line(pair[1].line),
                style,
            ));
        }
    }
    labels.push(station_label(network, route.end(), style));

    labels.join(" -> ")
}

/// Round to five decimal places and drop trailing zeros: `89.4`, `24`.
pub fn format_minutes(minutes: f64) -> String {
    let fixed = format!("{minutes:.5}");
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// The frontier in pop order: `Frontier - [E2: 20, E3: 37.4]`.
pub fn render_frontier(network: &Network, frontier: &Frontier, style: Style) -> String {
    let mut out = String::from("Frontier - [");
    for (i, (state, priority)) in frontier.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(
            out,
            "{}: {}",
            station_label(network, state, style),
            format_minutes(priority)
        );
    }
    out.push(']');
    out
}

/// Human-readable summary of a finished search.
pub fn render_summary(network: &Network, route: &Route, style: Style) -> String {
    match route.total_minutes() {
        Some(total) => {
            let mut out = format!(
                "Route: {}\nEstimated time (min): {}",
                render_route(network, route, style),
                format_minutes(total)
            );
            for change in route.interchanges() {
                let _ = write!(
                    out,
                    "\nChange at {} from {} to {}",
                    change.station,
                    network.line_name(change.from),
                    network.line_name(change.to)
                );
            }
            out
        }
        None => format!(
            "No route from {} to the destination",
            station_label(network, route.start(), style)
        ),
    }
}

/// Search observer that prints every expansion and the frontier after it.
///
/// Write errors stop further output; the first one is returned from
/// [`finish`](Self::finish).
pub struct TracePrinter<'a, W> {
    network: &'a Network,
    style: Style,
    out: W,
    error: Option<io::Error>,
}

impl<'a, W: io::Write> TracePrinter<'a, W> {
    pub fn new(network: &'a Network, style: Style, out: W) -> Self {
        Self {
            network,
            style,
            out,
            error: None,
        }
    }

    fn line(&mut self, text: String) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{text}") {
            self.error = Some(e);
        }
    }

    /// Hand back the writer, or the first write error.
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: io::Write> SearchObserver for TracePrinter<'_, W> {
    fn on_expand(&mut self, state: SearchState, cost: f64) {
        let label = station_label(self.network, state, self.style);
        self.line(format!(
            "Current station: {label} ({} min)",
            format_minutes(cost)
        ));
    }

    fn on_frontier(&mut self, frontier: &Frontier) {
        let text = render_frontier(self.network, frontier, self.style);
        self.line(format!("\t{text}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkBuilder, reference_network};
    use crate::planner::{Planner, SearchConfig, SearchRequest};

    fn chain() -> Network {
        NetworkBuilder::new(3)
            .edge(1, 2, 5.0)
            .edge(2, 3, 5.0)
            .line("x", [1, 2])
            .line("y", [2, 3])
            .build()
            .unwrap()
    }

    fn plan(net: &Network, from: u16, line: &str, to: u16) -> Route {
        let config = SearchConfig::default();
        let req = SearchRequest::resolve(net, from, line, to, None).unwrap();
        Planner::new(net, &config).plan(&req).unwrap()
    }

    #[test]
    fn format_minutes_trims() {
        assert_eq!(format_minutes(89.4), "89.4");
        assert_eq!(format_minutes(24.0), "24");
        assert_eq!(format_minutes(0.0), "0");
        assert_eq!(format_minutes(1.0 / 3.0), "0.33333");
        assert_eq!(format_minutes(37.400000000000006), "37.4");
        assert_eq!(format_minutes(-0.0), "0");
    }

    #[test]
    fn plain_and_coloured_labels() {
        let net = reference_network().unwrap();
        let blue = net.line_by_name("blue").unwrap();
        let state = SearchState::new(crate::domain::StationId::new(4).unwrap(), blue);

        assert_eq!(station_label(&net, state, Style::Plain), "E4");
        assert_eq!(
            station_label(&net, state, Style::Ansi),
            "\x1b[94mE4\x1b[0m"
        );
    }

    #[test]
    fn unknown_colour_renders_plain() {
        let net = chain();
        let x = net.line_by_name("x").unwrap();
        let state = SearchState::new(crate::domain::StationId::new(1).unwrap(), x);
        assert_eq!(station_label(&net, state, Style::Ansi), "E1");
    }

    #[test]
    fn interchange_marker_inserted() {
        let net = chain();
        let route = plan(&net, 1, "x", 3);
        assert_eq!(
            render_route(&net, &route, Style::Plain),
            "E1 -> E2 -> E2 -> E3"
        );
    }

    #[test]
    fn reference_route_rendering() {
        let net = reference_network().unwrap();
        let route = plan(&net, 1, "blue", 14);
        assert_eq!(
            render_route(&net, &route, Style::Plain),
            "E1 -> E2 -> E3 -> E4 -> E4 -> E13 -> E14"
        );
        assert_eq!(
            render_summary(&net, &route, Style::Plain),
            "Route: E1 -> E2 -> E3 -> E4 -> E4 -> E13 -> E14\n\
             Estimated time (min): 89.4\n\
             Change at E4 from blue to green"
        );
    }

    #[test]
    fn single_state_route() {
        let net = chain();
        let route = plan(&net, 2, "y", 2);
        assert_eq!(render_route(&net, &route, Style::Plain), "E2");
    }

    #[test]
    fn unreachable_summary() {
        let net = NetworkBuilder::new(2).line("a", [1, 2]).build().unwrap();
        let route = plan(&net, 1, "a", 2);
        assert_eq!(
            render_summary(&net, &route, Style::Plain),
            "No route from E1 to the destination"
        );
    }

    #[test]
    fn frontier_rendering() {
        let net = chain();
        let x = net.line_by_name("x").unwrap();
        let y = net.line_by_name("y").unwrap();
        let mut frontier = Frontier::new();
        assert_eq!(
            render_frontier(&net, &frontier, Style::Plain),
            "Frontier - []"
        );

        let station = |n| crate::domain::StationId::new(n).unwrap();
        frontier.push(SearchState::new(station(3), y), 24.0);
        frontier.push(SearchState::new(station(2), x), 10.5);
        assert_eq!(
            render_frontier(&net, &frontier, Style::Plain),
            "Frontier - [E2: 10.5, E3: 24]"
        );
    }

    #[test]
    fn trace_printer_writes_expansions() {
        let net = chain();
        let config = SearchConfig::default();
        let req = SearchRequest::resolve(&net, 1, "x", 3, None).unwrap();

        let mut printer = TracePrinter::new(&net, Style::Plain, Vec::new());
        Planner::new(&net, &config)
            .search_observed(&req, &mut printer)
            .unwrap();
        let text = String::from_utf8(printer.finish().unwrap()).unwrap();

        assert_eq!(
            text,
            "Current station: E1 (0 min)\n\
             \tFrontier - [E2: 10]\n\
             Current station: E2 (10 min)\n\
             \tFrontier - [E3: 24]\n\
             Current station: E3 (24 min)\n"
        );
    }
}
