use async_trait::async_trait;

use crate::error::ScoutError;
use crate::types::Quote;

/// Source of point-in-time quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current quote for `symbol`.
    ///
    /// `Ok(None)` means the upstream answered but carried no usable price;
    /// callers drop the candidate in both cases.
    async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>, ScoutError>;
}

/// Supplies the per-symbol metrics the quote feed does not carry
/// (relative volume, market capitalization).
///
/// The stand-in implementation fabricates these values; a real data feed can
/// replace it without touching the filter logic.
pub trait EstimatedMetricsProvider: Send + Sync {
    /// Relative volume vs a trailing average.
    fn volume_ratio(&self, symbol: &str) -> f64;

    /// Market capitalization in raw dollars.
    fn market_cap(&self, symbol: &str) -> f64;
}
