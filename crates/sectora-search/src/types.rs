use serde::{Deserialize, Serialize};

/// Number of documents fetched per keyword.
pub const DEFAULT_TOP_K: usize = 5;

/// One matching document, in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub chunk: String,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, chunk: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            chunk: chunk.into(),
        }
    }

    /// Placeholder title for the document at `rank` (0-based) when the index
    /// returns none.
    pub fn fallback_title(rank: usize) -> String {
        format!("문서 {}", rank + 1)
    }

    /// `title\nchunk`, the form documents are fed to the model in.
    pub fn as_prompt_text(&self) -> String {
        format!("{}\n{}", self.title, self.chunk)
    }
}
