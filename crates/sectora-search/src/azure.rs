use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sectora_core::error::{Result, SearchError, SectoraError};

use crate::gateway::SearchGateway;
use crate::types::SearchResult;

pub const DEFAULT_SEARCH_API_VERSION: &str = "2023-11-01";

/// Azure AI Search index queried through the REST API.
pub struct AzureSearchClient {
    client: Client,
    endpoint: String,
    index_name: String,
    api_key: String,
    api_version: String,
}

impl AzureSearchClient {
    pub fn new(
        endpoint: impl Into<String>,
        index_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            index_name: index_name.into(),
            api_key: api_key.into(),
            api_version: DEFAULT_SEARCH_API_VERSION.into(),
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.index_name,
            self.api_version
        )
    }
}

#[derive(Debug, Serialize)]
pub struct AzureSearchRequest<'a> {
    pub search: &'a str,
    pub top: usize,
}

#[derive(Debug, Deserialize)]
pub struct AzureSearchResponse {
    #[serde(default)]
    pub value: Vec<AzureSearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct AzureSearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub chunk: Option<String>,
}

/// Convert index hits to results, filling in missing titles by rank.
pub fn hits_to_results(hits: Vec<AzureSearchHit>, limit: usize) -> Vec<SearchResult> {
    hits.into_iter()
        .take(limit)
        .enumerate()
        .map(|(rank, hit)| SearchResult {
            title: hit
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| SearchResult::fallback_title(rank)),
            chunk: hit.chunk.unwrap_or_default(),
        })
        .collect()
}

#[async_trait]
impl SearchGateway for AzureSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let body = AzureSearchRequest {
            search: query,
            top: limit,
        };

        let resp = self
            .client
            .post(self.search_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SectoraError::Search(SearchError::Transport(e.to_string())))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(index = %self.index_name, %status, "Search request rejected");
            return Err(match status.as_u16() {
                401 | 403 => SearchError::Auth(body),
                _ => SearchError::Transport(format!("HTTP {status}: {body}")),
            }
            .into());
        }

        let response: AzureSearchResponse = resp
            .json()
            .await
            .map_err(|e| SectoraError::Search(SearchError::InvalidResponse(e.to_string())))?;

        let results = hits_to_results(response.value, limit);
        info!(index = %self.index_name, query, hits = results.len(), "Search completed");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_includes_index_and_version() {
        let client = AzureSearchClient::new("https://svc.search.windows.net/", "reports", "key");
        assert_eq!(
            client.search_url(),
            "https://svc.search.windows.net/indexes/reports/docs/search?api-version=2023-11-01"
        );
        let client = client.with_api_version("2024-07-01");
        assert!(client.search_url().ends_with("api-version=2024-07-01"));
    }

    #[test]
    fn request_body_shape() {
        let body = AzureSearchRequest {
            search: "electric vehicles",
            top: 5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"search": "electric vehicles", "top": 5}));
    }

    #[test]
    fn parse_response_with_missing_fields() {
        let json = r#"{
            "@odata.context": "ignored",
            "value": [
                {"@search.score": 3.1, "title": "배터리 동향", "chunk": "리튬 가격 하락"},
                {"@search.score": 2.0, "chunk": "충전소 확대"},
                {"@search.score": 1.0, "title": "  ", "chunk": "자율주행"}
            ]
        }"#;
        let resp: AzureSearchResponse = serde_json::from_str(json).unwrap();
        let results = hits_to_results(resp.value, 5);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "배터리 동향");
        assert_eq!(results[1].title, "문서 2");
        assert_eq!(results[1].chunk, "충전소 확대");
        assert_eq!(results[2].title, "문서 3");
    }

    #[test]
    fn hits_truncated_to_limit() {
        let hits = (0..8)
            .map(|i| AzureSearchHit {
                title: Some(format!("doc {i}")),
                chunk: None,
            })
            .collect();
        let results = hits_to_results(hits, 5);
        assert_eq!(results.len(), 5);
        assert_eq!(results[4].title, "doc 4");
        assert_eq!(results[4].chunk, "");
    }

    #[test]
    fn empty_value_is_empty_results() {
        let resp: AzureSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(hits_to_results(resp.value, 5).is_empty());
    }
}
