//! Best-Pick Selector
//!
//! Walks a fixed watchlist with no filters and keeps the single
//! highest-scoring candidate. Comparison is strict `>` so the first
//! candidate reaching the maximum wins ties.

use serde::Serialize;

/// Quote-derived inputs for one watchlist symbol.
#[derive(Debug, Clone)]
pub struct PickCandidate {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub rsi: f64,
}

/// The winning candidate with its score and derived action label.
#[derive(Debug, Clone, Serialize)]
pub struct BestPick {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub rsi: f64,
    pub score: i32,
    pub action: &'static str,
}

/// RSI-reversion plus momentum score.
///
/// The RSI buckets are mutually exclusive by construction: extreme
/// overbought/oversold earns 3, moderately stretched earns 1.
pub fn score_candidate(rsi: f64, change: f64) -> i32 {
    let mut score = 0;

    if rsi > 80.0 {
        score += 3;
    } else if rsi > 70.0 {
        score += 1;
    } else if rsi < 20.0 {
        score += 3;
    } else if rsi < 30.0 {
        score += 1;
    }

    if change.abs() > 10.0 {
        score += 2;
    } else if change.abs() > 5.0 {
        score += 1;
    }

    score
}

/// Action label from the winner's RSI bucket.
pub fn action_label(rsi: f64) -> &'static str {
    if rsi > 70.0 {
        "SHORT / SELL (Overextended)"
    } else if rsi < 30.0 {
        "LONG / BUY (Oversold)"
    } else {
        "WATCH (Momentum)"
    }
}

/// Select the best candidate in iteration order.
pub fn select_best(candidates: impl IntoIterator<Item = PickCandidate>) -> Option<BestPick> {
    let mut best: Option<BestPick> = None;

    for candidate in candidates {
        let score = score_candidate(candidate.rsi, candidate.change);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(BestPick {
                action: action_label(candidate.rsi),
                symbol: candidate.symbol,
                price: candidate.price,
                change: candidate.change,
                rsi: candidate.rsi,
                score,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(symbol: &str, rsi: f64, change: f64) -> PickCandidate {
        PickCandidate {
            symbol: symbol.to_string(),
            price: 100.0,
            change,
            rsi,
        }
    }

    #[test]
    fn rsi_buckets_are_mutually_exclusive() {
        assert_eq!(score_candidate(85.0, 0.0), 3);
        assert_eq!(score_candidate(75.0, 0.0), 1);
        assert_eq!(score_candidate(15.0, 0.0), 3);
        assert_eq!(score_candidate(25.0, 0.0), 1);
        assert_eq!(score_candidate(50.0, 0.0), 0);
    }

    #[test]
    fn momentum_buckets_add_on_top() {
        assert_eq!(score_candidate(50.0, 12.0), 2);
        assert_eq!(score_candidate(50.0, -7.0), 1);
        assert_eq!(score_candidate(85.0, 12.0), 5);
    }

    #[test]
    fn selection_is_deterministic_for_fixed_input() {
        let run = || {
            select_best(vec![
                candidate("AAPL", 50.0, 1.0),
                candidate("NVDA", 85.0, 12.0),
                candidate("TSLA", 25.0, 3.0),
            ])
            .unwrap()
        };
        let first = run();
        let second = run();
        assert_eq!(first.symbol, "NVDA");
        assert_eq!(first.score, 5);
        assert_eq!(second.symbol, first.symbol);
    }

    #[test]
    fn first_seen_wins_ties() {
        let pick = select_best(vec![
            candidate("AAPL", 85.0, 0.0),
            candidate("NVDA", 15.0, 0.0),
        ])
        .unwrap();
        // Both score 3; AAPL was seen first.
        assert_eq!(pick.symbol, "AAPL");
    }

    #[test]
    fn zero_score_candidate_still_picked_when_alone() {
        let pick = select_best(vec![candidate("KO", 50.0, 0.5)]).unwrap();
        assert_eq!(pick.score, 0);
        assert_eq!(pick.action, "WATCH (Momentum)");
    }

    #[test]
    fn empty_input_yields_none() {
        assert!(select_best(Vec::new()).is_none());
    }

    #[test]
    fn action_labels_follow_rsi_buckets() {
        assert_eq!(action_label(75.0), "SHORT / SELL (Overextended)");
        assert_eq!(action_label(25.0), "LONG / BUY (Oversold)");
        assert_eq!(action_label(50.0), "WATCH (Momentum)");
    }
}
