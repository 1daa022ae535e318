//! Serve command: the planner behind a small HTTP API.
//!
//! - `POST /tsp` takes `{"locations": [...]}` and answers with the plan.
//! - `GET /health` answers `ok`.
//! - Any other path is served from the static asset directory, if one is
//!   configured, with `/` mapped to `index.html`.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use waymark_core::Planner;

use crate::fs::open_utf8_dir;
use crate::plan::{
    GooglePlannerBuilder, PlanRequest, PlanResponse, PlannerBuilder, PlannerSettings,
};
use crate::{
    ARG_API_KEY, ARG_BIND, ARG_MAX_LOCATIONS, ARG_PLAN_TIMEOUT_SECS, ARG_STATIC_DIR,
    ARG_TIMEOUT_SECS, CliError, ENV_SERVE_API_KEY,
};

/// Default listening address.
const DEFAULT_BIND: SocketAddr = SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::LOCALHOST), 5000);

/// Default deadline for one plan request in seconds.
const DEFAULT_PLAN_TIMEOUT_SECS: u64 = 60;

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Expose the planner over HTTP. POST /tsp accepts a JSON \
                 body of locations and answers with the best path, its \
                 distance in kilometres and a Google Maps link.",
    about = "Serve the planner over HTTP"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct ServeArgs {
    /// Address to listen on.
    #[arg(long = ARG_BIND, value_name = "addr")]
    #[serde(default)]
    pub(crate) bind: Option<SocketAddr>,
    /// Directory of static assets served for every other path.
    #[arg(long = ARG_STATIC_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) static_dir: Option<Utf8PathBuf>,
    /// Google Maps Platform API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Timeout for each upstream HTTP request.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Largest number of locations accepted per request.
    #[arg(long = ARG_MAX_LOCATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_locations: Option<usize>,
    /// Deadline for a whole plan request.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) plan_timeout_secs: Option<u64>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServeConfig::try_from(merged)
    }
}

/// Resolved `serve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    pub(crate) bind: SocketAddr,
    pub(crate) static_dir: Option<Utf8PathBuf>,
    pub(crate) plan_timeout: Duration,
    pub(crate) settings: PlannerSettings,
}

impl ServeConfig {
    pub(crate) fn validate_static_dir(&self) -> Result<(), CliError> {
        let Some(path) = &self.static_dir else {
            return Ok(());
        };
        open_utf8_dir(path)
            .map(drop)
            .map_err(|source| CliError::StaticDir {
                path: path.clone(),
                source,
            })
    }
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let settings = PlannerSettings::resolve(
            args.api_key,
            args.timeout_secs,
            args.max_locations,
            ENV_SERVE_API_KEY,
        )?;
        Ok(Self {
            bind: args.bind.unwrap_or(DEFAULT_BIND),
            static_dir: args.static_dir,
            plan_timeout: Duration::from_secs(
                args.plan_timeout_secs.unwrap_or(DEFAULT_PLAN_TIMEOUT_SECS),
            ),
            settings,
        })
    }
}

/// Shared handler state.
#[derive(Clone)]
pub(crate) struct AppState {
    planner: Arc<dyn Planner>,
    plan_timeout: Duration,
}

impl AppState {
    pub(crate) fn new(planner: Arc<dyn Planner>, plan_timeout: Duration) -> Self {
        Self {
            planner,
            plan_timeout,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

/// Build the HTTP router.
pub(crate) fn build_router(state: AppState, static_dir: Option<&Utf8Path>) -> Router {
    let router = Router::new()
        .route("/tsp", post(solve_tsp))
        .route("/health", get(health));
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };
    router.with_state(state)
}

async fn solve_tsp(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            log::warn!("rejected plan request: {rejection}");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let planner = Arc::clone(&state.planner);
    let task = tokio::task::spawn_blocking(move || planner.plan(&request.locations));
    match tokio::time::timeout(state.plan_timeout, task).await {
        Ok(Ok(Ok(itinerary))) => {
            log::info!(
                "planned {} stops, {} m",
                itinerary.stops.len(),
                itinerary.total_distance_metres
            );
            (StatusCode::OK, Json(PlanResponse::from(itinerary))).into_response()
        }
        Ok(Ok(Err(err))) => {
            let status = if err.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            log::warn!("plan request failed with {status}: {err}");
            error_response(status, err.to_string())
        }
        Ok(Err(join_error)) => {
            log::error!("planning task failed: {join_error}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "planning task failed".to_owned(),
            )
        }
        Err(_elapsed) => {
            log::warn!("plan request exceeded {:?} deadline", state.plan_timeout);
            error_response(
                StatusCode::GATEWAY_TIMEOUT,
                format!("planning did not finish within {:?}", state.plan_timeout),
            )
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

pub(crate) fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    run_serve_with(args, &GooglePlannerBuilder)
}

pub(crate) fn run_serve_with(args: ServeArgs, builder: &dyn PlannerBuilder) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_static_dir()?;

    // The HTTP adapters own runtimes of their own; this handle keeps the last
    // reference outside the server runtime so they are dropped from sync code.
    let planner: Arc<dyn Planner> = Arc::from(builder.build(&config.settings)?);
    let app = build_router(
        AppState::new(Arc::clone(&planner), config.plan_timeout),
        config.static_dir.as_deref(),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(serve(config.bind, app))
}

async fn serve(addr: SocketAddr, app: Router) -> Result<(), CliError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| CliError::Bind { addr, source })?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, app).await.map_err(CliError::Serve)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ServeConfig, CliError> {
    let merged = ServeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ServeConfig::try_from(merged)
}
