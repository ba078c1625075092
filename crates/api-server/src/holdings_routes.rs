//! Holdings Routes
//!
//! User-managed symbol set. Listing enriches each row with a live quote;
//! a dead quote yields zeroed fields rather than dropping the holding.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scan_engine::{estimate_rsi, gap_percent, RandomMetrics};
use scout_core::EstimatedMetricsProvider;

use crate::{ApiResponse, AppError, AppState, Empty};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AddHoldingRequest {
    pub symbol: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveHoldingRequest {
    pub symbol: String,
}

/// Holding row plus live quote fields. Database columns keep their
/// snake_case names; the quote extras use the dashboard's camelCase.
#[derive(Debug, Serialize)]
pub struct HoldingView {
    pub id: i64,
    pub symbol: String,
    pub name: Option<String>,
    pub added_at: DateTime<Utc>,
    pub price: f64,
    pub price_change: f64,
    pub rsi: f64,
    pub volume: f64,
    #[serde(rename = "dayHigh")]
    pub day_high: f64,
    #[serde(rename = "dayLow")]
    pub day_low: f64,
    pub gap: f64,
    #[serde(rename = "marketCap")]
    pub market_cap: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct HoldingsBody {
    pub holdings: Vec<HoldingView>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list_holdings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HoldingsBody>>, AppError> {
    let metrics = RandomMetrics;
    let mut holdings = Vec::new();

    for row in state.db.list_holdings().await? {
        let quote = match state.quotes.get_quote(&row.symbol).await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!("Quote fetch failed for {}: {}", row.symbol, e);
                None
            }
        };

        let view = match quote {
            Some(q) => {
                let change = q.percent_change.unwrap_or(0.0);
                HoldingView {
                    id: row.id,
                    name: row.name,
                    added_at: row.added_at,
                    price: q.price,
                    price_change: change,
                    rsi: estimate_rsi(change),
                    volume: q.volume.unwrap_or(0.0),
                    day_high: q.high.unwrap_or(0.0),
                    day_low: q.low.unwrap_or(0.0),
                    gap: gap_percent(q.open, q.prev_close),
                    market_cap: Some(metrics.market_cap(&row.symbol)),
                    symbol: row.symbol,
                }
            }
            // Quote unavailable: neutral RSI, everything else zeroed.
            None => HoldingView {
                id: row.id,
                name: row.name,
                added_at: row.added_at,
                price: 0.0,
                price_change: 0.0,
                rsi: 50.0,
                volume: 0.0,
                day_high: 0.0,
                day_low: 0.0,
                gap: 0.0,
                market_cap: None,
                symbol: row.symbol,
            },
        };
        holdings.push(view);
    }

    Ok(Json(ApiResponse::success(HoldingsBody { holdings })))
}

async fn add_holding(
    State(state): State<AppState>,
    Json(req): Json<AddHoldingRequest>,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    let symbol = req.symbol.trim().to_uppercase();
    let name = req.name.unwrap_or_else(|| symbol.clone());
    state.db.add_holding(&symbol, &name).await?;

    Ok(Json(ApiResponse::success(Empty {})))
}

async fn remove_holding(
    State(state): State<AppState>,
    Json(req): Json<RemoveHoldingRequest>,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    state.db.remove_holding(req.symbol.trim()).await?;

    Ok(Json(ApiResponse::success(Empty {})))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn holdings_routes() -> Router<AppState> {
    Router::new().route(
        "/api/holdings",
        get(list_holdings).post(add_holding).delete(remove_holding),
    )
}
