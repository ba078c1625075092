//! Magic Pick Route
//!
//! Walks the fixed watchlist with no filters, keeps the top-scoring
//! candidate, asks the advisory model about it, and appends the verdict to
//! the audit log. `pick` is null when every quote fetch failed.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use advisor_client::{web_search, AdvisoryRequest};
use scan_engine::{estimate_rsi, select_best, PickCandidate, MAGIC_CANDIDATES};
use scout_core::TechnicalSnapshot;

use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Serialize)]
pub struct MagicPick {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub rsi: f64,
    pub score: i32,
    pub action: &'static str,
    pub ai_analysis: String,
}

#[derive(Debug, Serialize)]
pub struct MagicBody {
    pub pick: Option<MagicPick>,
}

async fn magic_pick(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MagicBody>>, AppError> {
    let mut candidates = Vec::new();

    for &symbol in MAGIC_CANDIDATES {
        let quote = match state.quotes.get_quote(symbol).await {
            Ok(Some(quote)) => quote,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Quote fetch failed for {}: {}", symbol, e);
                continue;
            }
        };

        let change = quote.percent_change.unwrap_or(0.0);
        candidates.push(PickCandidate {
            symbol: symbol.to_string(),
            price: quote.price,
            change,
            rsi: estimate_rsi(change),
        });
    }

    let Some(best) = select_best(candidates) else {
        return Ok(Json(ApiResponse::success(MagicBody { pick: None })));
    };

    let search = web_search(&format!("{} stock news institutional flows", best.symbol));
    let technicals = TechnicalSnapshot {
        price: best.price,
        change: best.change,
        rsi: best.rsi,
        score: Some(best.score),
        ..Default::default()
    };

    let verdict = state
        .advisor
        .verdict(&AdvisoryRequest {
            symbol: best.symbol.clone(),
            name: "Magic Pick Analysis".to_string(),
            search,
            technicals: Some(technicals),
            history: Vec::new(),
        })
        .await;

    state
        .db
        .insert_advisory_log(&best.symbol, best.price, &verdict, None)
        .await?;

    Ok(Json(ApiResponse::success(MagicBody {
        pick: Some(MagicPick {
            symbol: best.symbol,
            price: best.price,
            change: best.change,
            rsi: best.rsi,
            score: best.score,
            action: best.action,
            ai_analysis: verdict,
        }),
    })))
}

pub fn magic_routes() -> Router<AppState> {
    Router::new().route("/api/magic", get(magic_pick))
}
