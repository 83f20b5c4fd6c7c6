use async_trait::async_trait;

use sectora_core::error::Result;

use crate::types::SearchResult;

/// A hosted search index queried by keyword.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Return up to `limit` documents in rank order. An empty vector means no
    /// matches and is not an error.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;
}
