//! HTTP Surface
//!
//! Thin axum layer over the scan engine, quote client, advisory client and
//! store. Each scan, magic-pick or verify action runs to completion within
//! one request; there is no shared mutable state across requests beyond the
//! database pool.

pub mod config;

mod advisor_routes;
mod holdings_routes;
mod magic_routes;
mod scan_routes;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use advisor_client::{AdvisorClient, AdvisorConfig};
use finnhub_client::FinnhubClient;
use scan_store::ScanDb;
use scout_core::QuoteProvider;

use config::ServerConfig;

/// Shared handler context. The quote source is held behind its capability
/// trait so a different feed can be swapped in at startup.
#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<dyn QuoteProvider>,
    pub advisor: AdvisorClient,
    pub db: ScanDb,
}

/// Response envelope: a success flag plus the endpoint's flattened payload,
/// so wire shapes stay `{success, ...fields}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Payload for endpoints that only acknowledge.
#[derive(Debug, Serialize)]
pub struct Empty {}

/// Anyhow wrapper so handlers can use `?`; unhandled failures surface as
/// 500s with `success: false`.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Handler error: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "success": false, "error": self.0.to_string() })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(scan_routes::scan_routes())
        .merge(holdings_routes::holdings_routes())
        .merge(magic_routes::magic_routes())
        .merge(advisor_routes::advisor_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    init_tracing();

    // Key=value config file; running without one is a fatal condition.
    dotenvy::dotenv().context(".env file not found")?;
    let config = ServerConfig::from_env()?;

    tracing::info!("Starting trade-scout API server");
    tracing::info!("  Database: {}", config.database_url);
    tracing::info!("  Quote pacing: {}ms", config.quote_pace_ms);

    let db = ScanDb::new(&config.database_url).await?;
    let quotes: Arc<dyn QuoteProvider> = Arc::new(FinnhubClient::with_pacing(
        config.finnhub_api_key.clone(),
        Duration::from_millis(config.quote_pace_ms),
    ));
    let advisor = AdvisorClient::new(AdvisorConfig::new(config.anthropic_api_key.clone()));

    let app = router(AppState {
        quotes,
        advisor,
        db,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
