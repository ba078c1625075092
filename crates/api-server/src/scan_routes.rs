//! Scanner Routes
//!
//! One scan per request: sample the pool, fetch quotes sequentially (the
//! client paces itself under the upstream rate limit), gate and tally each
//! survivor, persist the batch, return the annotated rows.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use scan_engine::{enrich, evaluate, sample_batch, RandomMetrics, SignalTally, SCAN_BATCH_SIZE};
use scout_core::{ScanFilters, StockSnapshot};

use crate::{ApiResponse, AppError, AppState};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default = "default_preset")]
    pub preset: String,
    pub filters: ScanFilters,
}

fn default_preset() -> String {
    "custom".into()
}

/// One result row on the wire. `id` is the database row a client hands back
/// to `/api/verify` to annotate exactly this row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedStock {
    pub id: i64,
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub price_change: f64,
    pub volume: f64,
    pub volume_ratio: f64,
    pub rsi: f64,
    pub market_cap: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub gap: f64,
    pub signals: u32,
    pub signal_details: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub results: Vec<ScannedStock>,
    pub scan_id: i64,
}

/// A named bundle of filter-range defaults ("personality").
#[derive(Debug, Serialize)]
pub struct PresetDef {
    pub id: &'static str,
    pub label: &'static str,
    pub filters: ScanFilters,
}

#[derive(Debug, Serialize)]
pub struct PresetsBody {
    pub presets: Vec<PresetDef>,
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

fn get_presets() -> Vec<PresetDef> {
    vec![
        PresetDef {
            id: "burry",
            label: "Burry (exhaustion shorts)",
            filters: ScanFilters {
                rsi_min: 70.0,
                rsi_max: 100.0,
                market_cap_min: 1_000.0,
                market_cap_max: 2_000_000.0,
                price_change_min: 15.0,
                price_change_max: 100.0,
                volume_multiplier: 2.0,
                min_signals: 3,
            },
        },
        PresetDef {
            id: "penguin",
            label: "Penguin (fear-rotation longs)",
            filters: ScanFilters {
                rsi_min: 20.0,
                rsi_max: 45.0,
                market_cap_min: 500.0,
                market_cap_max: 2_000_000.0,
                price_change_min: -20.0,
                price_change_max: 10.0,
                volume_multiplier: 1.5,
                min_signals: 3,
            },
        },
        PresetDef {
            id: "sniper",
            label: "Sniper (precision breakouts)",
            filters: ScanFilters {
                rsi_min: 55.0,
                rsi_max: 75.0,
                market_cap_min: 10_000.0,
                market_cap_max: 2_000_000.0,
                price_change_min: 3.0,
                price_change_max: 15.0,
                volume_multiplier: 1.2,
                min_signals: 3,
            },
        },
        PresetDef {
            id: "idiot",
            label: "Idiot (pump chasing)",
            filters: ScanFilters {
                rsi_min: 80.0,
                rsi_max: 100.0,
                market_cap_min: 0.0,
                market_cap_max: 1_000.0,
                price_change_min: 20.0,
                price_change_max: 500.0,
                volume_multiplier: 4.0,
                min_signals: 3,
            },
        },
    ]
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn run_scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ApiResponse<ScanResult>>, AppError> {
    let batch = sample_batch(SCAN_BATCH_SIZE);
    tracing::info!("Scan [{}]: sampling {} symbols", req.preset, batch.len());

    let metrics = RandomMetrics;
    let mut survivors: Vec<(StockSnapshot, SignalTally)> = Vec::new();

    for ticker in &batch {
        // Upstream failure or missing price drops the candidate; no retry,
        // no row written for it.
        let quote = match state.quotes.get_quote(&ticker.symbol).await {
            Ok(Some(quote)) => quote,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Quote fetch failed for {}: {}", ticker.symbol, e);
                continue;
            }
        };

        let snapshot = enrich(ticker, &quote, &metrics);
        if let Some(tally) = evaluate(&snapshot, &req.filters) {
            survivors.push((snapshot, tally));
        }
    }

    let scan_id = state
        .db
        .create_scan(&req.preset, survivors.len() as i64)
        .await?;

    let mut results = Vec::with_capacity(survivors.len());
    for (snapshot, tally) in survivors {
        let signal_details = tally.details_joined();
        let id = state
            .db
            .insert_stock(scan_id, &snapshot, tally.count, &signal_details)
            .await?;
        results.push(ScannedStock {
            id,
            symbol: snapshot.symbol,
            name: snapshot.name,
            price: snapshot.price,
            price_change: snapshot.price_change,
            volume: snapshot.volume,
            volume_ratio: snapshot.volume_ratio,
            rsi: snapshot.rsi,
            market_cap: snapshot.market_cap,
            day_high: snapshot.day_high,
            day_low: snapshot.day_low,
            gap: snapshot.gap,
            signals: tally.count,
            signal_details,
        });
    }

    tracing::info!("Scan {} matched {} symbols", scan_id, results.len());

    Ok(Json(ApiResponse::success(ScanResult { results, scan_id })))
}

async fn list_presets() -> Json<ApiResponse<PresetsBody>> {
    Json(ApiResponse::success(PresetsBody {
        presets: get_presets(),
    }))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn scan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/scan", post(run_scan))
        .route("/api/presets", get(list_presets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_request_accepts_dashboard_body() {
        let req: ScanRequest = serde_json::from_str(
            r#"{"preset":"burry","filters":{"rsiMin":70,"rsiMax":100,"marketCapMin":1000,
                "marketCapMax":2000000,"priceChangeMin":15,"priceChangeMax":100,
                "volumeMultiplier":2.0,"minSignals":3}}"#,
        )
        .unwrap();
        assert_eq!(req.preset, "burry");
        assert_eq!(req.filters.rsi_min, 70.0);
        assert_eq!(req.filters.min_signals, 3);
    }

    #[test]
    fn min_signals_is_optional_on_the_wire() {
        let req: ScanRequest = serde_json::from_str(
            r#"{"filters":{"rsiMin":0,"rsiMax":100,"marketCapMin":0,"marketCapMax":2000000,
                "priceChangeMin":-100,"priceChangeMax":100,"volumeMultiplier":1.0}}"#,
        )
        .unwrap();
        assert_eq!(req.preset, "custom");
        assert_eq!(req.filters.min_signals, 0);
    }

    #[test]
    fn scan_result_serializes_dashboard_casing() {
        let result = ScanResult {
            scan_id: 7,
            results: vec![ScannedStock {
                id: 1,
                symbol: "NVDA".to_string(),
                name: "Nvidia".to_string(),
                price: 420.0,
                price_change: 4.2,
                volume: 1.0,
                volume_ratio: 2.0,
                rsi: 60.0,
                market_cap: 1e9,
                day_high: 430.0,
                day_low: 410.0,
                gap: 0.5,
                signals: 4,
                signal_details: "RSI, Volume, Price, MCap".to_string(),
            }],
        };
        let json = serde_json::to_string(&ApiResponse::success(result)).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""scanId":7"#));
        assert!(json.contains(r#""priceChange":4.2"#));
        assert!(json.contains(r#""signalDetails":"RSI, Volume, Price, MCap""#));
    }

    #[test]
    fn four_personalities_with_sane_bounds() {
        let presets = get_presets();
        assert_eq!(presets.len(), 4);
        for preset in &presets {
            assert!(preset.filters.rsi_min < preset.filters.rsi_max);
            assert!(preset.filters.price_change_min < preset.filters.price_change_max);
        }
        let burry = &presets[0];
        assert_eq!(burry.id, "burry");
        assert_eq!(burry.filters.rsi_min, 70.0);
    }
}
