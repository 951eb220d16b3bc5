use std::io::{self, IsTerminal, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_router::domain::{InvalidStation, StationId};
use metro_router::network::{
    DEFAULT_TRAIN_SPEED, Network, NetworkConfig, NetworkError, TopologyPolicy, load_network,
    reference_network_with,
};
use metro_router::planner::{
    DEFAULT_LINE_CHANGE_PENALTY_MINS, Planner, SearchConfig, SearchError, SearchRequest,
};
use metro_router::prompt::{Prompt, PromptError};
use metro_router::render::{Style, TracePrinter, render_summary};
use metro_router::web::{AppState, create_router};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory with edge_distances.csv, straight_line_distances.csv and
    /// lines.json. The built-in 14-station network is used when absent.
    #[arg(long, env = "METRO_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Minutes added for every change of line
    #[arg(long, env = "METRO_CHANGE_PENALTY", default_value_t = DEFAULT_LINE_CHANGE_PENALTY_MINS, global = true)]
    change_penalty: f64,

    /// Train speed in distance units per hour
    #[arg(long, env = "METRO_TRAIN_SPEED", default_value_t = DEFAULT_TRAIN_SPEED, global = true)]
    speed: f64,

    /// Ignore connections between stations that share no line instead of
    /// rejecting the network
    #[arg(long, global = true)]
    skip_inconsistent: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a single route and print it
    Route {
        /// Start station, e.g. 1 or E1
        from: String,
        /// Line the traveller starts on
        from_line: String,
        /// Destination station
        to: String,
        /// Preferred arrival line
        #[arg(long)]
        to_line: Option<String>,
        /// Print every expansion and the frontier after it
        #[arg(short, long)]
        verbose: bool,
        /// Never colour station labels
        #[arg(long)]
        no_color: bool,
    },
    /// Ask for the route interactively
    Prompt {
        #[arg(short, long)]
        verbose: bool,
        #[arg(long)]
        no_color: bool,
    },
    /// Serve the web interface and JSON API
    Serve {
        #[arg(long, env = "METRO_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Station(#[from] InvalidStation),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    report(run(args), &mut io::stderr())
}

/// Print a failed run once and map it to the process exit code.
fn report(result: Result<(), CliError>, out: &mut impl Write) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(out, "error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let topology = if args.skip_inconsistent {
        TopologyPolicy::Skip
    } else {
        TopologyPolicy::Reject
    };
    let network_config = NetworkConfig::new(args.speed, topology);
    let network = match &args.data_dir {
        Some(dir) => load_network(dir, network_config)?,
        None => reference_network_with(network_config)?,
    };

    let search_config = SearchConfig::new(args.change_penalty);
    if !search_config.is_valid() {
        return Err(SearchError::InvalidConfig(format!(
            "line change penalty {} must be finite and non-negative",
            args.change_penalty
        ))
        .into());
    }

    match args.cmd {
        Command::Route {
            from,
            from_line,
            to,
            to_line,
            verbose,
            no_color,
        } => {
            let request = SearchRequest::resolve(
                &network,
                StationId::parse(&from)?.get(),
                &from_line,
                StationId::parse(&to)?.get(),
                to_line.as_deref(),
            )?;
            plan_and_print(&network, &search_config, &request, verbose, style(no_color))
        }
        Command::Prompt { verbose, no_color } => {
            let stdin = io::stdin();
            let mut prompt = Prompt::new(stdin.lock(), io::stdout());
            let request = prompt.request(&network)?;
            println!("\n{}\n", "-".repeat(35));
            plan_and_print(&network, &search_config, &request, verbose, style(no_color))
        }
        Command::Serve { bind } => serve(network, search_config, bind),
    }
}

fn style(no_color: bool) -> Style {
    if !no_color && io::stdout().is_terminal() {
        Style::Ansi
    } else {
        Style::Plain
    }
}

fn plan_and_print(
    network: &Network,
    config: &SearchConfig,
    request: &SearchRequest,
    verbose: bool,
    style: Style,
) -> Result<(), CliError> {
    let planner = Planner::new(network, config);

    let outcome = if verbose {
        let mut printer = TracePrinter::new(network, style, io::stdout().lock());
        let outcome = planner.search_observed(request, &mut printer)?;
        printer.finish()?;
        outcome
    } else {
        planner.search(request)?
    };

    let mut out = io::stdout().lock();
    writeln!(out, "{}", render_summary(network, &outcome.route(), style))?;
    Ok(())
}

fn serve(network: Network, config: SearchConfig, bind: SocketAddr) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let stations = network.station_count();
        let app = create_router(AppState::new(network, config));

        let listener = tokio::net::TcpListener::bind(bind).await?;
        info!(%bind, stations, "metro router listening");
        info!("GET /             - route form");
        info!("GET /api/network  - stations and lines");
        info!("GET /api/route    - plan a route (from, from_line, to, to_line)");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
    }
    info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_is_reported_once() {
        let mut out = Vec::new();
        let err = CliError::Network(NetworkError::InvalidSpeed(0.0));
        assert_eq!(report(Err(err), &mut out), ExitCode::FAILURE);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("error: "));
    }

    #[test]
    fn success_prints_nothing() {
        let mut out = Vec::new();
        assert_eq!(report(Ok(()), &mut out), ExitCode::SUCCESS);
        assert!(out.is_empty());
    }
}
