use async_trait::async_trait;
use tokio::sync::RwLock;

use sectora_core::error::Result;

use crate::gateway::SearchGateway;
use crate::types::SearchResult;

/// An in-memory keyword index. Documents are scored by how many query terms
/// appear in their title or chunk (case-insensitive); ties keep insertion order.
pub struct InMemorySearchIndex {
    docs: RwLock<Vec<SearchResult>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }

    pub fn with_documents(docs: Vec<SearchResult>) -> Self {
        Self {
            docs: RwLock::new(docs),
        }
    }

    pub async fn add(&self, doc: SearchResult) {
        self.docs.write().await.push(doc);
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

impl Default for InMemorySearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn score(doc: &SearchResult, terms: &[String]) -> usize {
    let haystack = format!("{} {}", doc.title, doc.chunk).to_lowercase();
    terms.iter().filter(|t| haystack.contains(t.as_str())).count()
}

#[async_trait]
impl SearchGateway for InMemorySearchIndex {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let docs = self.docs.read().await;
        let mut scored: Vec<(usize, &SearchResult)> = docs
            .iter()
            .map(|d| (score(d, &terms), d))
            .filter(|(s, _)| *s > 0)
            .collect();

        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, d)| d.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> InMemorySearchIndex {
        InMemorySearchIndex::with_documents(vec![
            SearchResult::new("Battery outlook", "Electric vehicles drive lithium demand"),
            SearchResult::new("Charging", "Public chargers for electric cars"),
            SearchResult::new("Semiconductors", "Foundry capacity"),
        ])
    }

    #[tokio::test]
    async fn ranks_by_term_hits() {
        let results = index().search("electric vehicles", 5).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Battery outlook");
        assert_eq!(results[1].title, "Charging");
    }

    #[tokio::test]
    async fn respects_limit() {
        let results = index().search("electric", 1).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn no_match_is_empty_not_error() {
        let results = index().search("agriculture", 5).await.unwrap();
        assert!(results.is_empty());
        let results = index().search("   ", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn add_documents() {
        let idx = InMemorySearchIndex::new();
        assert!(idx.is_empty().await);
        idx.add(SearchResult::new("a", "b")).await;
        assert_eq!(idx.len().await, 1);
    }
}
