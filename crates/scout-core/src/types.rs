//! Shared Scanner Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time quote for a single symbol.
///
/// Field presence mirrors the upstream quote payload: only the last price is
/// guaranteed, everything else may be absent outside market hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Last traded price
    pub price: f64,
    /// Percent change vs previous close
    pub percent_change: Option<f64>,
    /// Day high
    pub high: Option<f64>,
    /// Day low
    pub low: Option<f64>,
    /// Today's open
    pub open: Option<f64>,
    /// Previous close
    pub prev_close: Option<f64>,
    /// Day volume
    pub volume: Option<f64>,
}

/// A symbol paired with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerInfo {
    pub symbol: String,
    pub name: String,
}

/// Immutable filter configuration for one scan invocation.
///
/// Wire casing follows the dashboard's JSON body. Market cap bounds are in
/// millions of dollars; raw caps are converted before comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanFilters {
    pub rsi_min: f64,
    pub rsi_max: f64,
    pub market_cap_min: f64,
    pub market_cap_max: f64,
    pub price_change_min: f64,
    pub price_change_max: f64,
    pub volume_multiplier: f64,
    /// Accepted and stored with the preset; not applied as a gate.
    #[serde(default)]
    pub min_signals: u32,
}

/// Fully enriched scan candidate, ready for gating and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
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
    /// Gap percent, open vs previous close
    pub gap: f64,
}

/// Numeric context handed to the advisory prompt builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub price: f64,
    pub change: f64,
    pub rsi: f64,
    pub volume: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub gap: Option<f64>,
    /// Best-pick composite score, present only for magic-pick analyses
    pub score: Option<i32>,
}

/// A previously logged verdict for the same symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorVerdict {
    pub verdict: String,
    pub created_at: DateTime<Utc>,
}
