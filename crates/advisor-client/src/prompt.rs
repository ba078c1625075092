//! Penguin-Burry Prompt Builder
//!
//! Encodes the fixed trading heuristic (Burry exhaustion-short vs Penguin
//! divergence-long vs no-setup) as a system instruction, and the numeric
//! snapshot plus verdict history as the user message.

use scout_core::{PriorVerdict, TechnicalSnapshot};

use crate::search::SearchContext;

fn rsi_display(technicals: Option<&TechnicalSnapshot>) -> String {
    match technicals {
        Some(t) => format!("{:.1}", t.rsi),
        None => "N/A".to_string(),
    }
}

/// Thousands-separated integer rendering, e.g. 52000000 -> "52,000,000".
fn format_volume(volume: f64) -> String {
    let raw = format!("{:.0}", volume.max(0.0));
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn system_prompt(symbol: &str, technicals: Option<&TechnicalSnapshot>) -> String {
    let price = technicals.map(|t| t.price).unwrap_or(0.0);
    let change = technicals.map(|t| t.change).unwrap_or(0.0);
    let rsi = rsi_display(technicals);

    format!(
        "You are the Penguin-Burry AI - an elite tactical trading analyst specializing in \
high-probability setups using technical confluence and market psychology.

METHODOLOGY:
You identify two types of setups:

1. BURRY SHORT (Exhaustion Hunter)
   - Parabolic moves showing exhaustion
   - Signals: RSI >80, volume spike 2-3x, MACD turning negative, price change >15%
   - Critical check: Is the trend exhausted or still strong? Never short strength.
   - Look for: Retail FOMO, blow-off volume, momentum divergence

2. PENGUIN LONG (Divergence Hunter)
   - Fear rotations where smart money accumulates
   - Signals: RSI 70-85 (momentum without exhaustion), strong volume, solid support
   - Look for: Market weakness but stock holding, institutional accumulation, sector rotation strength

3. NO SETUP
   - If signals don't align, say HOLD
   - Don't force trades that aren't there

CRITICAL RULES:
- Analyze ONLY {symbol} - no comparisons to other stocks unless explaining direct sector rotation
- State which setup type this is (Burry/Penguin/None)
- Use the actual technical numbers provided: Price ${price}, Change {change}%, RSI {rsi}
- Check disqualifiers: Fake volume? Conflicting signals? Already extended?
- Give specific entry price or HOLD command

RESPONSE FORMAT (EXACTLY 2 SENTENCES):

Sentence 1 - SETUP ANALYSIS:
State the setup type and technical confluence. Example: '{symbol} shows a [Burry/Penguin/No] setup \
with RSI at {rsi}, volume [context], and [momentum state] - [what this means].'

Sentence 2 - VERDICT:
Give decisive action with specific price. Example: 'LONG at ${price} targeting $[target] (stop $[stop])' \
OR 'SHORT at ${price} targeting $[target] (stop $[stop])' OR 'HOLD - [specific reason why no trade].'

Focus on THIS stock's technicals and price action. Use the Penguin-Burry signal framework. No generic advice."
    )
}

pub fn user_prompt(
    symbol: &str,
    name: &str,
    search: &SearchContext,
    technicals: Option<&TechnicalSnapshot>,
    history: &[PriorVerdict],
) -> String {
    let price = technicals.map(|t| t.price).unwrap_or(0.0);
    let change = technicals.map(|t| t.change).unwrap_or(0.0);
    let rsi = rsi_display(technicals);
    let volume = technicals.and_then(|t| t.volume).unwrap_or(0.0);
    let high = technicals.and_then(|t| t.high).unwrap_or(0.0);
    let low = technicals.and_then(|t| t.low).unwrap_or(0.0);
    let gap = technicals.and_then(|t| t.gap).unwrap_or(0.0);

    let search_json = serde_json::to_string_pretty(search).unwrap_or_default();

    let mut prompt = format!(
        "STOCK: {symbol} ({name})

TECHNICAL SNAPSHOT:
- Current Price: ${price}
- Price Change: {change}%
- RSI: {rsi}
- Volume: {volume}
- Day Range: ${low} - ${high}
- Gap: {gap:.2}%

MARKET CONTEXT & NEWS:
{search_json}
",
        volume = format_volume(volume),
    );

    if !history.is_empty() {
        let history_json = serde_json::to_string_pretty(history).unwrap_or_default();
        prompt.push_str(&format!("\nPREVIOUS ANALYSIS:\n{history_json}\n"));
    }

    prompt.push_str("\nApply Penguin-Burry methodology. Which setup is this? What's the play?");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::web_search;
    use chrono::Utc;

    fn technicals() -> TechnicalSnapshot {
        TechnicalSnapshot {
            price: 420.5,
            change: 17.3,
            rsi: 84.2,
            volume: Some(52_000_000.0),
            high: Some(430.0),
            low: Some(401.2),
            gap: Some(3.456),
            score: None,
        }
    }

    #[test]
    fn system_prompt_embeds_technicals() {
        let t = technicals();
        let prompt = system_prompt("NVDA", Some(&t));
        assert!(prompt.contains("Analyze ONLY NVDA"));
        assert!(prompt.contains("Price $420.5"));
        assert!(prompt.contains("RSI 84.2"));
    }

    #[test]
    fn system_prompt_without_technicals_shows_na() {
        let prompt = system_prompt("NVDA", None);
        assert!(prompt.contains("RSI N/A"));
    }

    #[test]
    fn user_prompt_embeds_snapshot_and_search() {
        let t = technicals();
        let search = web_search("NVDA stock news");
        let prompt = user_prompt("NVDA", "Nvidia", &search, Some(&t), &[]);
        assert!(prompt.contains("STOCK: NVDA (Nvidia)"));
        assert!(prompt.contains("Volume: 52,000,000"));
        assert!(prompt.contains("Gap: 3.46%"));
        assert!(prompt.contains("Recent news placeholder"));
        assert!(!prompt.contains("PREVIOUS ANALYSIS"));
    }

    #[test]
    fn user_prompt_includes_history_when_present() {
        let history = vec![PriorVerdict {
            verdict: "HOLD - no setup".to_string(),
            created_at: Utc::now(),
        }];
        let search = web_search("NVDA stock news");
        let prompt = user_prompt("NVDA", "Nvidia", &search, None, &history);
        assert!(prompt.contains("PREVIOUS ANALYSIS"));
        assert!(prompt.contains("HOLD - no setup"));
    }

    #[test]
    fn volume_formatting_groups_thousands() {
        assert_eq!(format_volume(0.0), "0");
        assert_eq!(format_volume(999.0), "999");
        assert_eq!(format_volume(1_000.0), "1,000");
        assert_eq!(format_volume(52_000_000.0), "52,000,000");
    }
}
