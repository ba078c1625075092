//! SQLite Persistence
//!
//! Plain insert/select operations over a shared pool. Scan batches and
//! their child rows are written without a wrapping transaction; a crash
//! mid-batch can leave a scan with fewer child rows than its recorded
//! `total_results`.

use std::str::FromStr;

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use scout_core::{PriorVerdict, StockSnapshot};

use crate::models::{AdvisoryLogEntry, Holding};

#[derive(Clone)]
pub struct ScanDb {
    pool: SqlitePool,
}

impl ScanDb {
    /// Open (creating if missing) and initialize the schema.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;

        Ok(db)
    }

    /// Execute schema.sql statement-by-statement (sqlx does not support
    /// multi-statement queries).
    async fn init_schema(&self) -> Result<()> {
        let schema = include_str!("../../../schema.sql");

        for statement in schema.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt).execute(&self.pool).await?;
            }
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // -----------------------------------------------------------------------
    // Scans
    // -----------------------------------------------------------------------

    /// Record one scan invocation; the row is immutable thereafter.
    pub async fn create_scan(&self, preset: &str, total_results: i64) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO scans (scan_date, preset, total_results) VALUES (?, ?, ?)",
        )
        .bind(Utc::now())
        .bind(preset)
        .bind(total_results)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert one result row for a scan, returning its id.
    pub async fn insert_stock(
        &self,
        scan_id: i64,
        snapshot: &StockSnapshot,
        signals: u32,
        signal_details: &str,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO stocks (scan_id, symbol, name, price, price_change, volume,
                                volume_ratio, rsi, market_cap, signals, signal_details, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(scan_id)
        .bind(&snapshot.symbol)
        .bind(&snapshot.name)
        .bind(snapshot.price)
        .bind(snapshot.price_change)
        .bind(snapshot.volume)
        .bind(snapshot.volume_ratio)
        .bind(snapshot.rsi)
        .bind(snapshot.market_cap)
        .bind(signals as i64)
        .bind(signal_details)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Attach a verdict to one explicitly identified result row.
    pub async fn attach_verdict(&self, stock_id: i64, verdict: &str) -> Result<()> {
        sqlx::query("UPDATE stocks SET ai_verified = 1, ai_verdict = ? WHERE id = ?")
            .bind(verdict)
            .bind(stock_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Holdings
    // -----------------------------------------------------------------------

    /// Add a holding. Duplicate symbols are ignored; the symbol is
    /// upper-cased here so uniqueness is case-insensitive.
    pub async fn add_holding(&self, symbol: &str, name: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO holdings (symbol, name, added_at) VALUES (?, ?, ?)")
            .bind(symbol.to_uppercase())
            .bind(name)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn remove_holding(&self, symbol: &str) -> Result<()> {
        sqlx::query("DELETE FROM holdings WHERE symbol = ?")
            .bind(symbol.to_uppercase())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn list_holdings(&self) -> Result<Vec<Holding>> {
        let holdings: Vec<Holding> = sqlx::query_as(
            "SELECT id, symbol, name, added_at FROM holdings ORDER BY added_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(holdings)
    }

    // -----------------------------------------------------------------------
    // Advisory log
    // -----------------------------------------------------------------------

    /// Append to the audit trail. Rows here are historical record only.
    pub async fn insert_advisory_log(
        &self,
        symbol: &str,
        price: f64,
        verdict: &str,
        stock_id: Option<i64>,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO ai_logs (symbol, price, verdict, stock_id, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(symbol)
        .bind(price)
        .bind(verdict)
        .bind(stock_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn recent_logs(&self, limit: i64) -> Result<Vec<AdvisoryLogEntry>> {
        let logs: Vec<AdvisoryLogEntry> = sqlx::query_as(
            r#"
            SELECT id, symbol, price, verdict, stock_id, created_at
            FROM ai_logs
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// Most recent verdicts for a symbol, newest first, for prompt context.
    pub async fn verdict_history(&self, symbol: &str, limit: i64) -> Result<Vec<PriorVerdict>> {
        let rows: Vec<(String, chrono::DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT verdict, created_at
            FROM ai_logs
            WHERE symbol = ?
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(symbol)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(verdict, created_at)| PriorVerdict {
                verdict,
                created_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(symbol: &str) -> StockSnapshot {
        StockSnapshot {
            symbol: symbol.to_string(),
            name: format!("{} Inc", symbol),
            price: 100.0,
            price_change: 5.0,
            volume: 1_000_000.0,
            volume_ratio: 2.0,
            rsi: 60.0,
            market_cap: 1_000_000_000.0,
            day_high: 101.0,
            day_low: 98.0,
            gap: 0.4,
        }
    }

    #[tokio::test]
    async fn db_creation() {
        let db = ScanDb::new("sqlite::memory:").await.unwrap();
        assert!(db.pool().acquire().await.is_ok());
    }

    #[tokio::test]
    async fn holdings_round_trip() {
        let db = ScanDb::new("sqlite::memory:").await.unwrap();

        db.add_holding("aapl", "Apple").await.unwrap();
        let holdings = db.list_holdings().await.unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].symbol, "AAPL");

        // Duplicate add (any casing) does not create a second row.
        db.add_holding("AAPL", "Apple").await.unwrap();
        assert_eq!(db.list_holdings().await.unwrap().len(), 1);

        db.remove_holding("aapl").await.unwrap();
        assert!(db.list_holdings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn scan_rows_belong_to_their_batch() {
        let db = ScanDb::new("sqlite::memory:").await.unwrap();

        let scan_id = db.create_scan("burry", 2).await.unwrap();
        let first = db
            .insert_stock(scan_id, &snapshot("NVDA"), 4, "RSI, Volume, Price, MCap")
            .await
            .unwrap();
        let second = db
            .insert_stock(scan_id, &snapshot("TSLA"), 5, "RSI, Volume, Price, MCap, Momentum")
            .await
            .unwrap();
        assert!(second > first);

        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, symbol FROM stocks WHERE scan_id = ? ORDER BY id")
                .bind(scan_id)
                .fetch_all(db.pool())
                .await
                .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1, "NVDA");
    }

    #[tokio::test]
    async fn verdict_attaches_to_the_named_row_only() {
        let db = ScanDb::new("sqlite::memory:").await.unwrap();

        let scan_id = db.create_scan("custom", 2).await.unwrap();
        let first = db
            .insert_stock(scan_id, &snapshot("NVDA"), 4, "RSI")
            .await
            .unwrap();
        let second = db
            .insert_stock(scan_id, &snapshot("NVDA"), 4, "RSI")
            .await
            .unwrap();

        db.attach_verdict(first, "HOLD - no setup.").await.unwrap();

        let rows: Vec<(i64, i64, Option<String>)> =
            sqlx::query_as("SELECT id, ai_verified, ai_verdict FROM stocks WHERE scan_id = ? ORDER BY id")
                .bind(scan_id)
                .fetch_all(db.pool())
                .await
                .unwrap();
        assert_eq!(rows[0], (first, 1, Some("HOLD - no setup.".to_string())));
        assert_eq!(rows[1], (second, 0, None));
    }

    #[tokio::test]
    async fn advisory_log_is_append_only_and_ordered() {
        let db = ScanDb::new("sqlite::memory:").await.unwrap();

        for i in 0..4 {
            db.insert_advisory_log("NVDA", 100.0 + i as f64, &format!("verdict {}", i), None)
                .await
                .unwrap();
        }
        db.insert_advisory_log("TSLA", 200.0, "other symbol", None)
            .await
            .unwrap();

        let history = db.verdict_history("NVDA", 3).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].verdict, "verdict 3");

        let logs = db.recent_logs(100).await.unwrap();
        assert_eq!(logs.len(), 5);
        assert_eq!(logs[0].symbol, "TSLA");

        let limited = db.recent_logs(2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn advisory_log_records_the_annotated_row() {
        let db = ScanDb::new("sqlite::memory:").await.unwrap();

        let scan_id = db.create_scan("custom", 1).await.unwrap();
        let stock_id = db
            .insert_stock(scan_id, &snapshot("NVDA"), 4, "RSI")
            .await
            .unwrap();

        db.insert_advisory_log("NVDA", 100.0, "SHORT at $100", Some(stock_id))
            .await
            .unwrap();

        let logs = db.recent_logs(1).await.unwrap();
        assert_eq!(logs[0].stock_id, Some(stock_id));
    }
}
