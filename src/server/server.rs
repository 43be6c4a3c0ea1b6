use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::catalog_store::{CatalogStore, ReleaseDetails};

use axum::{
    extract::{Query, State},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::{
    envelope::{ApiError, ApiResponse},
    http_cache, log_requests,
    metrics::{metrics_handler, record_release_lookup, LookupOutcome},
    state::*,
    RequestsLoggingLevel, ServerConfig,
};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: &'static str,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct ReleaseIdParams {
    pub id: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct CanonicalRelease {
    pub id: String,
}

/// Check the `id` query parameter and normalize it to the lowercase
/// hyphenated form gids are stored in.
fn parse_release_id(params: ReleaseIdParams) -> Result<String, ApiError> {
    let raw = match params.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(ApiError::MissingParameter("id")),
    };
    let uuid = uuid::Uuid::parse_str(raw.trim()).map_err(|_| ApiError::InvalidParameter("id"))?;
    Ok(uuid.hyphenated().to_string())
}

/// Run a blocking catalog lookup off the async runtime and record its outcome.
async fn run_lookup<T, F>(
    operation: &'static str,
    catalog_store: GuardedCatalogStore,
    lookup: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn CatalogStore) -> Result<Option<T>> + Send + 'static,
{
    let start = Instant::now();
    let result = tokio::task::spawn_blocking(move || lookup(catalog_store.as_ref()))
        .await
        .context("Catalog lookup task failed")
        .and_then(|result| result);

    let outcome = match &result {
        Ok(Some(_)) => LookupOutcome::Found,
        Ok(None) => LookupOutcome::NotFound,
        Err(_) => LookupOutcome::Error,
    };
    record_release_lookup(operation, outcome, start.elapsed());

    match result {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(ApiError::NotFound),
        Err(err) => Err(ApiError::Internal(err)),
    }
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION"),
    };
    Json(stats)
}

async fn get_release_details(
    State(catalog_store): State<GuardedCatalogStore>,
    Query(params): Query<ReleaseIdParams>,
) -> Result<ApiResponse<ReleaseDetails>, ApiError> {
    let gid = parse_release_id(params)?;
    debug!("Release details lookup for {}", gid);
    let details = run_lookup("details", catalog_store, move |store| {
        store.get_release_details(&gid)
    })
    .await?;
    Ok(ApiResponse::success(details))
}

async fn resolve_release(
    State(catalog_store): State<GuardedCatalogStore>,
    Query(params): Query<ReleaseIdParams>,
) -> Result<ApiResponse<CanonicalRelease>, ApiError> {
    let gid = parse_release_id(params)?;
    let id = run_lookup("resolve", catalog_store, move |store| {
        store.resolve_release_gid(&gid)
    })
    .await?;
    Ok(ApiResponse::success(CanonicalRelease { id }))
}

impl ServerState {
    fn new(config: ServerConfig, catalog_store: GuardedCatalogStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            catalog_store,
        }
    }
}

pub fn make_app(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Result<Router> {
    let state = ServerState::new(config.clone(), catalog_store);

    let release_routes: Router = Router::new()
        .route("/details", get(get_release_details))
        .route("/resolve", get(resolve_release))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ))
        .with_state(state.clone());

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    let mut app: Router = home_router.nest("/v1/release", release_routes);

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(
    catalog_store: GuardedCatalogStore,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    metrics_port: u16,
    content_cache_age_sec: usize,
) -> Result<()> {
    let config = ServerConfig {
        port,
        metrics_port,
        requests_logging_level,
        content_cache_age_sec,
    };
    let app = make_app(config, catalog_store)?;

    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;
    info!("Serving metrics on port {}", metrics_port);
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            tracing::error!("Metrics server stopped: {}", err);
        }
    });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Serving release lookups on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
