use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use scout_core::{Quote, QuoteProvider, ScoutError};

const BASE_URL: &str = "https://finnhub.io/api/v1";

/// Spacing between successive quote requests on the free tier
/// (~30 calls/min safe zone).
pub const DEFAULT_PACE: Duration = Duration::from_millis(50);

/// Minimum-interval pacer: each request waits until at least `min_interval`
/// has passed since the previous one.
#[derive(Clone)]
struct RequestPacer {
    last: Arc<Mutex<Option<Instant>>>,
    min_interval: Duration,
}

impl RequestPacer {
    fn new(min_interval: Duration) -> Self {
        Self {
            last: Arc::new(Mutex::new(None)),
            min_interval,
        }
    }

    async fn acquire(&self) {
        // Lock held across the sleep so concurrent callers queue in order.
        let mut last = self.last.lock().await;
        let now = Instant::now();
        if let Some(prev) = *last {
            let ready_at = prev + self.min_interval;
            if ready_at > now {
                tokio::time::sleep(ready_at - now).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Raw `/quote` payload. Finnhub guarantees nothing outside market hours,
/// so every field is optional.
#[derive(Debug, Clone, Deserialize)]
struct QuoteResponse {
    c: Option<f64>,
    dp: Option<f64>,
    h: Option<f64>,
    l: Option<f64>,
    o: Option<f64>,
    pc: Option<f64>,
    v: Option<f64>,
}

fn quote_from_payload(payload: QuoteResponse) -> Option<Quote> {
    let price = payload.c.filter(|p| p.is_finite())?;
    Some(Quote {
        price,
        percent_change: payload.dp,
        high: payload.h,
        low: payload.l,
        open: payload.o,
        prev_close: payload.pc,
        volume: payload.v,
    })
}

#[derive(Clone)]
pub struct FinnhubClient {
    api_key: String,
    client: Client,
    pacer: RequestPacer,
}

impl FinnhubClient {
    pub fn new(api_key: String) -> Self {
        Self::with_pacing(api_key, DEFAULT_PACE)
    }

    pub fn with_pacing(api_key: String, min_interval: Duration) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            client,
            pacer: RequestPacer::new(min_interval),
        }
    }

    /// Fetch the current quote for a symbol.
    ///
    /// `Ok(None)` when the payload carries no usable price; transport and
    /// decode failures map to `ScoutError`. Callers treat both as "drop the
    /// candidate"; nothing is retried.
    pub async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>, ScoutError> {
        self.pacer.acquire().await;

        let url = format!("{}/quote", BASE_URL);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ScoutError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScoutError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let payload: QuoteResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::InvalidData(e.to_string()))?;

        let quote = quote_from_payload(payload);
        if quote.is_none() {
            tracing::debug!("No usable price for {}, dropping", symbol);
        }
        Ok(quote)
    }
}

#[async_trait]
impl QuoteProvider for FinnhubClient {
    async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>, ScoutError> {
        FinnhubClient::get_quote(self, symbol).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> QuoteResponse {
        QuoteResponse {
            c: Some(182.5),
            dp: Some(1.2),
            h: Some(184.0),
            l: Some(180.1),
            o: Some(181.0),
            pc: Some(180.3),
            v: Some(52_000_000.0),
        }
    }

    #[test]
    fn payload_with_price_maps_all_fields() {
        let quote = quote_from_payload(full_payload()).unwrap();
        assert_eq!(quote.price, 182.5);
        assert_eq!(quote.percent_change, Some(1.2));
        assert_eq!(quote.open, Some(181.0));
        assert_eq!(quote.prev_close, Some(180.3));
        assert_eq!(quote.volume, Some(52_000_000.0));
    }

    #[test]
    fn payload_without_price_is_dropped() {
        let mut payload = full_payload();
        payload.c = None;
        assert!(quote_from_payload(payload).is_none());
    }

    #[test]
    fn zero_price_is_kept() {
        // Finnhub reports c = 0 after hours for some symbols; the original
        // dashboard kept those rows.
        let mut payload = full_payload();
        payload.c = Some(0.0);
        assert!(quote_from_payload(payload).is_some());
    }

    #[tokio::test]
    async fn pacer_spaces_out_requests() {
        let pacer = RequestPacer::new(Duration::from_millis(20));
        let start = Instant::now();
        pacer.acquire().await;
        pacer.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
