//! Scan Engine
//!
//! The filter-and-scoring pipeline: pseudo-RSI estimation, candidate
//! sampling, range-gate filtering with signal tallies, and the no-filter
//! best-pick selector.

pub mod engine;
pub mod estimator;
pub mod picker;
pub mod universe;

pub use engine::{enrich, evaluate, gap_percent, SignalTally};
pub use estimator::{base_rsi, estimate_rsi, RandomMetrics};
pub use picker::{action_label, score_candidate, select_best, BestPick, PickCandidate};
pub use universe::{sample_batch, MAGIC_CANDIDATES, MARKET_POOL, SCAN_BATCH_SIZE};
