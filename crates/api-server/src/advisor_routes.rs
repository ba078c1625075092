//! Advisory Routes
//!
//! On-demand verdicts plus the append-only analysis history.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use advisor_client::{web_search, AdvisoryRequest};
use scan_engine::{estimate_rsi, gap_percent};
use scan_store::AdvisoryLogEntry;
use scout_core::TechnicalSnapshot;

use crate::{ApiResponse, AppError, AppState};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub symbol: String,
    pub name: Option<String>,
    /// Names the exact scan row this verdict annotates, decided by the
    /// caller at request time. Without it the verdict is logged only.
    #[serde(default)]
    pub stock_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct VerifyBody {
    pub verdict: String,
}

#[derive(Debug, Serialize)]
pub struct LogsBody {
    pub logs: Vec<AdvisoryLogEntry>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<ApiResponse<VerifyBody>>, AppError> {
    let name = req.name.clone().unwrap_or_else(|| req.symbol.clone());
    let search = web_search(&format!("{} {} news stock", req.symbol, name));

    // Current technicals for prompt context; an unavailable quote just means
    // a sparser prompt.
    let technicals = match state.quotes.get_quote(&req.symbol).await {
        Ok(Some(q)) => {
            let change = q.percent_change.unwrap_or(0.0);
            Some(TechnicalSnapshot {
                price: q.price,
                change,
                rsi: estimate_rsi(change),
                volume: q.volume,
                high: q.high,
                low: q.low,
                gap: Some(gap_percent(q.open, q.prev_close)),
                score: None,
            })
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Quote fetch failed for {}: {}", req.symbol, e);
            None
        }
    };
    let price = technicals.as_ref().map(|t| t.price).unwrap_or(0.0);

    let history = state.db.verdict_history(&req.symbol, 3).await?;

    let verdict = state
        .advisor
        .verdict(&AdvisoryRequest {
            symbol: req.symbol.clone(),
            name,
            search,
            technicals,
            history,
        })
        .await;

    // Logged first (append-only record), then the explicit row annotation.
    state
        .db
        .insert_advisory_log(&req.symbol, price, &verdict, req.stock_id)
        .await?;

    if let Some(stock_id) = req.stock_id {
        state.db.attach_verdict(stock_id, &verdict).await?;
    }

    Ok(Json(ApiResponse::success(VerifyBody { verdict })))
}

async fn get_logs(State(state): State<AppState>) -> Result<Json<ApiResponse<LogsBody>>, AppError> {
    let logs = state.db.recent_logs(100).await?;
    Ok(Json(ApiResponse::success(LogsBody { logs })))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn advisor_routes() -> Router<AppState> {
    Router::new()
        .route("/api/verify", post(verify))
        .route("/api/logs", get(get_logs))
}
