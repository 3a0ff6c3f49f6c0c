//! Stocks API Binary
//!
//! Starts the snapshot HTTP service.
//!
//! # Usage
//!
//! ```bash
//! STOCKS_FEED_URL=https://example.com/stocks.json cargo run --bin stocks-api
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOCKS_FEED_URL`: Upstream feed URL
//!
//! ## Optional
//! - `STOCKS_FEED_TIMEOUT_SECS`: Upstream fetch timeout (default: 10)
//! - `STOCKS_FEED_CURRENCY`: Currency attached to prices (default: PHP)
//! - `STOCKS_FEED_UTC_OFFSET_MINUTES`: Exchange offset of the feed's as-of time (default: 480)
//! - `STOCKS_HTTP_HOST`: Bind address (default: 0.0.0.0)
//! - `STOCKS_HTTP_PORT`: Bind port (default: 8080)
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: <http://localhost:4317>)
//! - `OTEL_SERVICE_NAME`: Service name (default: stocks-api)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use stocks_api::infrastructure::telemetry;
use stocks_api::{
    AppState, FormatRenderer, GetStocksUseCase, HttpFeedFetcher, HttpServer, PseFeedParser,
    ServiceConfig, create_router, init_metrics,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();

    // Initialize telemetry (tracing + optional OpenTelemetry)
    let telemetry_guard = telemetry::init();

    tracing::info!(span_export = telemetry_guard.is_exporting(), "Starting Stocks API");

    let _metrics_handle = init_metrics()?;

    let config = ServiceConfig::from_env()?;
    log_config(&config);

    let fetcher = Arc::new(HttpFeedFetcher::new(config.feed.timeout)?);
    let parser = Arc::new(PseFeedParser::new(
        config.feed.currency.clone(),
        config.feed.utc_offset,
    ));
    let renderer = Arc::new(FormatRenderer::new());

    let get_stocks = Arc::new(GetStocksUseCase::new(
        fetcher,
        parser,
        renderer,
        config.feed.url.as_str(),
    ));
    let router = create_router(AppState::new(get_stocks, env!("CARGO_PKG_VERSION")));

    let shutdown_token = CancellationToken::new();
    let server = HttpServer::new(config.server.socket_addr(), router, shutdown_token.clone());

    tokio::spawn(await_shutdown(shutdown_token));

    tracing::info!("Stocks API ready");

    // Returns once the signal handler cancels the token and connections drain
    tokio::spawn(server.run()).await??;

    tracing::info!("Stocks API stopped");
    Ok(())
}

/// Load `.env` from the current directory or the nearest ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &ServiceConfig) {
    tracing::info!(
        upstream = %config.feed.url,
        timeout_secs = config.feed.timeout.as_secs(),
        currency = %config.feed.currency,
        utc_offset = %config.feed.utc_offset,
        addr = %config.server.socket_addr(),
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT), then cancel `shutdown_token`.
#[allow(clippy::expect_used)]
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();
}
