//! Store Row Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user-held symbol. Symbols are unique and upper-case at the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Holding {
    pub id: i64,
    pub symbol: String,
    pub name: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Append-only advisory audit row; never updated or deleted.
///
/// `stock_id`, when present, names the exact scan row the verdict
/// annotates, decided at write time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdvisoryLogEntry {
    pub id: i64,
    pub symbol: String,
    pub price: f64,
    pub verdict: String,
    pub stock_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
