//! Filter/Score Engine
//!
//! Applies the configured range gates to an enriched candidate and tallies
//! its signals. All four gates must pass (logical AND, inclusive bounds);
//! any single failed bound excludes the candidate entirely.

use scout_core::{EstimatedMetricsProvider, Quote, ScanFilters, StockSnapshot, TickerInfo};

use crate::estimator;

/// Signal tally for a candidate that survived the gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalTally {
    pub count: u32,
    pub details: Vec<&'static str>,
}

impl SignalTally {
    /// Human-readable form persisted alongside the row.
    pub fn details_joined(&self) -> String {
        self.details.join(", ")
    }
}

/// Gap percent, open vs previous close. Zero when either side is missing or
/// the previous close is zero.
pub fn gap_percent(open: Option<f64>, prev_close: Option<f64>) -> f64 {
    match (open, prev_close) {
        (Some(o), Some(pc)) if pc != 0.0 => (o - pc) / pc * 100.0,
        _ => 0.0,
    }
}

/// Build the enriched snapshot for one candidate: quote fields, the
/// pseudo-RSI estimate, and the estimated metrics the feed cannot supply.
pub fn enrich(
    ticker: &TickerInfo,
    quote: &Quote,
    metrics: &dyn EstimatedMetricsProvider,
) -> StockSnapshot {
    let price_change = quote.percent_change.unwrap_or(0.0);
    StockSnapshot {
        symbol: ticker.symbol.clone(),
        name: ticker.name.clone(),
        price: quote.price,
        price_change,
        volume: quote.volume.unwrap_or(0.0),
        volume_ratio: metrics.volume_ratio(&ticker.symbol),
        rsi: estimator::estimate_rsi(price_change),
        market_cap: metrics.market_cap(&ticker.symbol),
        day_high: quote.high.unwrap_or(0.0),
        day_low: quote.low.unwrap_or(0.0),
        gap: gap_percent(quote.open, quote.prev_close),
    }
}

/// Gate a candidate, returning its signal tally when it survives.
pub fn evaluate(snapshot: &StockSnapshot, filters: &ScanFilters) -> Option<SignalTally> {
    if snapshot.rsi < filters.rsi_min || snapshot.rsi > filters.rsi_max {
        return None;
    }

    // Filter bounds are in millions, caps are raw dollars.
    let mcap_min_raw = filters.market_cap_min * 1_000_000.0;
    let mcap_max_raw = filters.market_cap_max * 1_000_000.0;
    if snapshot.market_cap < mcap_min_raw || snapshot.market_cap > mcap_max_raw {
        return None;
    }

    if snapshot.price_change < filters.price_change_min
        || snapshot.price_change > filters.price_change_max
    {
        return None;
    }

    if snapshot.volume_ratio < filters.volume_multiplier {
        return None;
    }

    Some(signal_tally(snapshot, filters))
}

/// One point per independently-true condition, max 5. The first four mirror
/// the gates; the momentum bonus fires on |change| > 15.
fn signal_tally(snapshot: &StockSnapshot, filters: &ScanFilters) -> SignalTally {
    let mut details = Vec::new();

    if snapshot.rsi >= filters.rsi_min && snapshot.rsi <= filters.rsi_max {
        details.push("RSI");
    }

    if snapshot.volume_ratio >= filters.volume_multiplier {
        details.push("Volume");
    }

    if snapshot.price_change >= filters.price_change_min
        && snapshot.price_change <= filters.price_change_max
    {
        details.push("Price");
    }

    let market_cap_m = snapshot.market_cap / 1_000_000.0;
    if market_cap_m >= filters.market_cap_min && market_cap_m <= filters.market_cap_max {
        details.push("MCap");
    }

    if snapshot.price_change.abs() > 15.0 {
        details.push("Momentum");
    }

    SignalTally {
        count: details.len() as u32,
        details,
    }
}
