//! Pseudo-RSI Estimator
//!
//! Maps a single percent change to an RSI-like value in [0, 100]. This is an
//! approximation, not a momentum oscillator over historical closes; no price
//! series is consulted anywhere in the system.

use rand::Rng;

use scout_core::EstimatedMetricsProvider;

/// Linear base estimate: 50 shifted by change x 2, clamped to [0, 100].
pub fn base_rsi(price_change: f64) -> f64 {
    (50.0 + price_change * 2.0).clamp(0.0, 100.0)
}

/// Base estimate plus uniform jitter in [-5, +5], clamped again.
pub fn estimate_rsi(price_change: f64) -> f64 {
    let jitter = rand::thread_rng().gen_range(-5.0..=5.0);
    (base_rsi(price_change) + jitter).clamp(0.0, 100.0)
}

/// Stand-in metrics for data the free quote feed does not carry.
///
/// Volume ratio is uniform in [1.0, 5.0], market cap uniform in
/// [$100M, $1T]. Swap in a real `EstimatedMetricsProvider` once a paid
/// data source is wired up.
pub struct RandomMetrics;

impl EstimatedMetricsProvider for RandomMetrics {
    fn volume_ratio(&self, _symbol: &str) -> f64 {
        rand::thread_rng().gen_range(10..=50) as f64 / 10.0
    }

    fn market_cap(&self, _symbol: &str) -> f64 {
        rand::thread_rng().gen_range(100_000_000.0..=1_000_000_000_000.0)
    }
}
