//! Web Search Stub
//!
//! Returns a fixed placeholder structure. A production build would call a
//! real search API here; the advisory prompt only needs the shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchContext {
    pub query: String,
    pub results: Vec<SearchResult>,
}

pub fn web_search(query: &str) -> SearchContext {
    SearchContext {
        query: query.to_string(),
        results: vec![SearchResult {
            title: "Recent news placeholder".to_string(),
            snippet: "Search results would appear here".to_string(),
        }],
    }
}
