//! Candidate Universe
//!
//! The fixed market pool the scanner samples from, and the smaller
//! watchlist the best-pick selector walks in full.

use rand::seq::SliceRandom;

use scout_core::TickerInfo;

/// Symbols sampled per scan, sized for the upstream free-tier rate limit.
pub const SCAN_BATCH_SIZE: usize = 28;

/// Scanner market pool (symbol, display name), grouped by flavor.
pub const MARKET_POOL: &[(&str, &str)] = &[
    // Mag 7 / big tech
    ("AAPL", "Apple"),
    ("MSFT", "Microsoft"),
    ("GOOGL", "Google"),
    ("AMZN", "Amazon"),
    ("NVDA", "Nvidia"),
    ("META", "Meta"),
    ("TSLA", "Tesla"),
    ("AMD", "AMD"),
    ("NFLX", "Netflix"),
    ("AVGO", "Broadcom"),
    // Crypto / miners (high volatility)
    ("COIN", "Coinbase"),
    ("MSTR", "MicroStrategy"),
    ("MARA", "Marathon Digital"),
    ("RIOT", "Riot Platforms"),
    ("CLSK", "CleanSpark"),
    ("HUT", "Hut 8"),
    ("BITF", "Bitfarms"),
    ("CORZ", "Core Scientific"),
    ("IREN", "Iris Energy"),
    ("WULF", "Terawulf"),
    // Meme / retail
    ("GME", "GameStop"),
    ("AMC", "AMC Ent"),
    ("HOOD", "Robinhood"),
    ("DKNG", "DraftKings"),
    ("PLTR", "Palantir"),
    ("SOFI", "SoFi"),
    ("OPEN", "Opendoor"),
    ("CVNA", "Carvana"),
    ("UPST", "Upstart"),
    ("AI", "C3.ai"),
    ("RIVN", "Rivian"),
    ("LCID", "Lucid"),
    ("CHPT", "ChargePoint"),
    ("SPCE", "Virgin Galactic"),
    // Growth / SaaS
    ("SNOW", "Snowflake"),
    ("CRM", "Salesforce"),
    ("SHOP", "Shopify"),
    ("UBER", "Uber"),
    ("ABNB", "Airbnb"),
    ("DASH", "DoorDash"),
    ("SQ", "Block"),
    ("PYPL", "PayPal"),
    ("ROKU", "Roku"),
    ("TTD", "Trade Desk"),
    ("NET", "Cloudflare"),
    ("DDOG", "Datadog"),
    ("CRWD", "CrowdStrike"),
    ("ZS", "Zscaler"),
    // Semiconductors
    ("INTC", "Intel"),
    ("MU", "Micron"),
    ("QCOM", "Qualcomm"),
    ("TSM", "TSMC"),
    ("ARM", "Arm Holdings"),
    ("SMCI", "Super Micro"),
    ("TXN", "Texas Instruments"),
    ("LRCX", "Lam Research"),
    // Blue chip / Dow
    ("JPM", "JPMorgan"),
    ("BAC", "Bank of America"),
    ("WMT", "Walmart"),
    ("PG", "Procter & Gamble"),
    ("JNJ", "Johnson & Johnson"),
    ("XOM", "Exxon Mobil"),
    ("CVX", "Chevron"),
    ("KO", "Coca-Cola"),
    ("DIS", "Disney"),
    ("BA", "Boeing"),
    ("CAT", "Caterpillar"),
    ("DE", "Deere"),
    ("F", "Ford"),
    ("GM", "GM"),
    ("COST", "Costco"),
    ("TGT", "Target"),
];

/// Best-pick watchlist, walked in full on every magic-pick request.
pub const MAGIC_CANDIDATES: &[&str] = &[
    "NVDA", "TSLA", "AMD", "COIN", "MSTR", "AAPL", "MSFT", "GOOGL", "AMZN", "META", "PLTR",
    "MARA", "RIOT", "HOOD", "DKNG", "UBER", "ABNB", "SNOW", "CRM", "NFLX", "INTC", "PYPL", "SQ",
];

/// Random sample of the market pool, in post-shuffle order. Variety on every
/// scan without tripping the quote API rate limit.
pub fn sample_batch(size: usize) -> Vec<TickerInfo> {
    let mut pool: Vec<&(&str, &str)> = MARKET_POOL.iter().collect();
    pool.shuffle(&mut rand::thread_rng());
    pool.into_iter()
        .take(size)
        .map(|&(symbol, name)| TickerInfo {
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_is_bounded_and_duplicate_free() {
        let batch = sample_batch(SCAN_BATCH_SIZE);
        assert_eq!(batch.len(), SCAN_BATCH_SIZE);

        let symbols: HashSet<&str> = batch.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols.len(), batch.len());

        let pool: HashSet<&str> = MARKET_POOL.iter().map(|&(s, _)| s).collect();
        assert!(symbols.is_subset(&pool));
    }

    #[test]
    fn oversized_request_returns_whole_pool() {
        let batch = sample_batch(MARKET_POOL.len() + 10);
        assert_eq!(batch.len(), MARKET_POOL.len());
    }

    #[test]
    fn magic_candidates_are_in_the_market_pool() {
        let pool: HashSet<&str> = MARKET_POOL.iter().map(|&(s, _)| s).collect();
        for symbol in MAGIC_CANDIDATES {
            assert!(pool.contains(symbol), "{} missing from pool", symbol);
        }
    }
}
