//! HTTP Controller (Driver Adapter)
//!
//! Axum router serving the snapshot resource plus operational endpoints.
//!
//! # Endpoints
//!
//! - `GET /stocks.xml`, `GET /stocks.json` - snapshot in the requested format
//! - `GET /health` - JSON health status
//! - `GET /healthz` - liveness probe (simple OK)
//! - `GET /metrics` - Prometheus metrics in text format

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::application::format::Format;
use crate::application::ports::{FeedFetcherPort, FeedParserPort, RendererPort};
use crate::application::use_cases::{GetStocksUseCase, StocksOutcome};
use crate::infrastructure::metrics::{RequestOutcome, get_metrics_handle, record_request};

use super::error::ApiError;
use super::freshness::{format_http_date, parse_http_date};
use super::response::HealthResponse;

/// Application state shared across handlers.
pub struct AppState<F, P, R>
where
    F: FeedFetcherPort,
    P: FeedParserPort,
    R: RendererPort,
{
    /// Snapshot use case.
    pub get_stocks: Arc<GetStocksUseCase<F, P, R>>,
    /// Application version.
    pub version: String,
    /// When the state was created.
    pub started_at: Instant,
}

impl<F, P, R> AppState<F, P, R>
where
    F: FeedFetcherPort,
    P: FeedParserPort,
    R: RendererPort,
{
    /// Create state for `get_stocks`, starting the uptime clock now.
    pub fn new(get_stocks: Arc<GetStocksUseCase<F, P, R>>, version: impl Into<String>) -> Self {
        Self {
            get_stocks,
            version: version.into(),
            started_at: Instant::now(),
        }
    }
}

impl<F, P, R> Clone for AppState<F, P, R>
where
    F: FeedFetcherPort,
    P: FeedParserPort,
    R: RendererPort,
{
    fn clone(&self) -> Self {
        Self {
            get_stocks: Arc::clone(&self.get_stocks),
            version: self.version.clone(),
            started_at: self.started_at,
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<F, P, R>(state: AppState<F, P, R>) -> Router
where
    F: FeedFetcherPort + 'static,
    P: FeedParserPort + 'static,
    R: RendererPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(liveness_handler))
        .route("/metrics", get(metrics_handler))
        .route("/{resource}", get(get_stocks))
        .with_state(state)
}

/// Snapshot endpoint.
async fn get_stocks<F, P, R>(
    State(state): State<AppState<F, P, R>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response
where
    F: FeedFetcherPort,
    P: FeedParserPort,
    R: RendererPort,
{
    let path = uri.path();
    let format_label = Format::from_path(path).map_or("unknown", Format::extension);
    let if_modified_since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_http_date);

    match state.get_stocks.execute(path, if_modified_since).await {
        Ok(StocksOutcome::Fresh {
            body,
            format,
            last_modified,
        }) => {
            record_request(format_label, RequestOutcome::Ok);
            tracing::info!(path, format = %format, bytes = body.len(), "Served snapshot");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, format.media_type().to_string()),
                    (header::LAST_MODIFIED, format_http_date(last_modified)),
                ],
                body,
            )
                .into_response()
        }
        Ok(StocksOutcome::NotModified { last_modified }) => {
            record_request(format_label, RequestOutcome::NotModified);
            tracing::info!(path, "Snapshot not modified");
            (
                StatusCode::NOT_MODIFIED,
                [(header::LAST_MODIFIED, format_http_date(last_modified))],
            )
                .into_response()
        }
        Err(e) => {
            let error = ApiError::from(e);
            record_request(format_label, RequestOutcome::Failed(error.code()));
            tracing::info!(
                path,
                status = error.status().as_u16(),
                code = %error.code(),
                "Snapshot request failed"
            );
            error.into_response()
        }
    }
}

/// Health check endpoint.
async fn health_check<F, P, R>(State(state): State<AppState<F, P, R>>) -> impl IntoResponse
where
    F: FeedFetcherPort,
    P: FeedParserPort,
    R: RendererPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        upstream: state.get_stocks.feed_url().to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn metrics_handler() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                handle.render(),
            )
        },
    )
}
