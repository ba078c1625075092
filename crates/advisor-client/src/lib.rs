pub mod error;
pub mod prompt;
pub mod search;

pub use error::{AdvisorError, AdvisorResult};
pub use search::{web_search, SearchContext, SearchResult};

use serde::{Deserialize, Serialize};

use scout_core::{PriorVerdict, TechnicalSnapshot};

/// Substituted whenever the model call fails or the payload has no text.
pub const FALLBACK_VERDICT: &str = "Unable to verify. Check manually.";

/// Configuration for the advisory model endpoint.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl AdvisorConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 250,
        }
    }
}

/// One advisory invocation: symbol, display name, search context, and
/// whatever numeric context and history the caller has on hand.
#[derive(Debug, Clone)]
pub struct AdvisoryRequest {
    pub symbol: String,
    pub name: String,
    pub search: SearchContext,
    pub technicals: Option<TechnicalSnapshot>,
    pub history: Vec<PriorVerdict>,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

fn first_text(payload: MessagesResponse) -> Option<String> {
    payload.content.into_iter().find_map(|b| b.text)
}

#[derive(Clone)]
pub struct AdvisorClient {
    client: reqwest::Client,
    config: AdvisorConfig,
}

impl AdvisorClient {
    /// The transport keeps its default timeout; the advisory path has no
    /// retry or backoff, so a slow upstream stalls the whole request.
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Ask for a verdict, substituting `FALLBACK_VERDICT` on any failure.
    /// The fallback is persisted downstream as if genuine.
    pub async fn verdict(&self, request: &AdvisoryRequest) -> String {
        match self.request_verdict(request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Advisory call failed for {}: {}", request.symbol, e);
                FALLBACK_VERDICT.to_string()
            }
        }
    }

    async fn request_verdict(&self, request: &AdvisoryRequest) -> AdvisorResult<String> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: prompt::system_prompt(&request.symbol, request.technicals.as_ref()),
            messages: vec![Message {
                role: "user",
                content: prompt::user_prompt(
                    &request.symbol,
                    &request.name,
                    &request.search,
                    request.technicals.as_ref(),
                    &request.history,
                ),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdvisorError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        let payload: MessagesResponse = response.json().await?;
        first_text(payload).ok_or_else(|| AdvisorError::InvalidResponse("no text content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_picks_first_text_block() {
        let payload = MessagesResponse {
            content: vec![
                ContentBlock { text: None },
                ContentBlock {
                    text: Some("NVDA shows a Burry setup.".to_string()),
                },
            ],
        };
        assert_eq!(
            first_text(payload).as_deref(),
            Some("NVDA shows a Burry setup.")
        );
    }

    #[test]
    fn empty_content_yields_none() {
        let payload = MessagesResponse { content: vec![] };
        assert!(first_text(payload).is_none());
    }

    #[test]
    fn response_payload_decodes() {
        let payload: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"HOLD - no setup."}],"model":"m","role":"assistant"}"#,
        )
        .unwrap();
        assert_eq!(first_text(payload).as_deref(), Some("HOLD - no setup."));
    }
}
