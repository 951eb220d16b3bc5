//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::StationId;
use crate::planner::{Planner, SearchError, SearchOutcome, SearchRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/network", get(network_info))
        .route("/api/route", get(plan_route))
        .route("/route", get(plan_route_html))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the route form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    IndexTemplate::from_network(&state.network)
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })
}

/// Stations, lines and interchanges of the loaded network.
async fn network_info(State(state): State<AppState>) -> Json<NetworkResponse> {
    Json(NetworkResponse::from_network(&state.network))
}

/// Plan a route and return it as JSON.
async fn plan_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let (request, outcome) = run_search(&state, &query)?;
    Ok(Json(RouteResponse::from_outcome(
        &state.network,
        &request,
        &outcome,
    )))
}

/// Plan a route and return it as an HTML fragment.
async fn plan_route_html(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Response {
    let rendered = run_search(&state, &query).and_then(|(request, outcome)| {
        RouteTemplate {
            route: RouteView::from_outcome(&state.network, &request, &outcome),
        }
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })
    });

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            let (status, message) = err.parts();
            let title = status.canonical_reason().unwrap_or("Error").to_string();
            let body = ErrorTemplate {
                title,
                message: message.to_string(),
            }
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));
            (status, Html(body)).into_response()
        }
    }
}

/// Parse the query, resolve it against the network and run the search.
fn run_search(
    state: &AppState,
    query: &RouteQuery,
) -> Result<(SearchRequest, SearchOutcome), AppError> {
    let from = parse_station(query.from.as_deref(), "from")?;
    let from_line = required(query.from_line.as_deref(), "from_line")?;
    let to = parse_station(query.to.as_deref(), "to")?;
    let to_line = query
        .to_line
        .as_deref()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let network = &state.network;
    let request = SearchRequest::resolve(network, from.get(), from_line, to.get(), to_line)?;

    let planner = Planner::new(network, &state.config);
    let outcome = planner.search(&request)?;

    debug!(
        from = %request.start.station,
        to = %request.goal,
        reachable = outcome.is_reachable(),
        expansions = outcome.expansions(),
        "route planned"
    );

    Ok((request, outcome))
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: format!("Missing parameter: {}", name),
        })
}

fn parse_station(value: Option<&str>, name: &str) -> Result<StationId, AppError> {
    let raw = required(value, name)?;
    StationId::parse(raw).map_err(|e| AppError::BadRequest {
        message: format!("Invalid {}: {}", name, e),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl AppError {
    fn parts(&self) -> (StatusCode, &str) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidConfig(_) => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        if status.is_server_error() {
            warn!(%status, "{message}");
        } else {
            debug!(%status, "{message}");
        }

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
