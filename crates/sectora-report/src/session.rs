use serde::Serialize;

use sectora_core::error::WorkflowError;
use sectora_search::types::SearchResult;

use crate::types::{ChatTurn, report_title};
use crate::workflow::ReportWorkflow;

/// Everything one user session has accumulated.
///
/// The keyword is the root of the derived state: changing it discards search
/// results, recommendations, the selected industry and chat history. The
/// report workflow survives a keyword change and is only cleared by
/// [`SessionState::reset_all`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub keyword: String,
    pub search_results: Vec<SearchResult>,
    pub recommendations_raw: String,
    pub recommendations: Vec<String>,
    pub selected_industry: Option<String>,
    pub chat_history: Vec<ChatTurn>,
    pub workflow: ReportWorkflow,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyword. Returns whether it changed; a change clears every
    /// field derived from the previous keyword. A blank keyword, or a new
    /// keyword once the report is finalized, is rejected without touching
    /// the state.
    pub fn set_keyword(&mut self, keyword: &str) -> Result<bool, WorkflowError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(WorkflowError::MissingKeyword);
        }
        if keyword == self.keyword {
            return Ok(false);
        }
        if self.workflow.is_completed() {
            return Err(WorkflowError::AlreadyFinalized);
        }
        self.keyword = keyword.to_string();
        self.search_results.clear();
        self.recommendations_raw.clear();
        self.recommendations.clear();
        self.selected_industry = None;
        self.chat_history.clear();
        Ok(true)
    }

    /// Select one of the recommended industries. Switching to a different
    /// industry drops the chat history unless `keep_history` is set.
    pub fn select_industry(&mut self, name: &str, keep_history: bool) -> Result<(), WorkflowError> {
        if self.recommendations.is_empty() {
            return Err(WorkflowError::NoRecommendations);
        }
        let name = name.trim();
        if !self.recommendations.iter().any(|r| r == name) {
            return Err(WorkflowError::UnknownIndustry(name.to_string()));
        }
        if self.selected_industry.as_deref() == Some(name) {
            return Ok(());
        }
        if self.workflow.is_completed() {
            return Err(WorkflowError::AlreadyFinalized);
        }
        self.selected_industry = Some(name.to_string());
        if !keep_history {
            self.chat_history.clear();
        }
        Ok(())
    }

    pub fn selected_industry(&self) -> Result<&str, WorkflowError> {
        self.selected_industry
            .as_deref()
            .ok_or(WorkflowError::NoIndustrySelected)
    }

    pub fn clear_chat_history(&mut self) {
        self.chat_history.clear();
    }

    /// Whether a search is due: a keyword is set and nothing was found yet.
    pub fn needs_search(&self) -> bool {
        !self.keyword.is_empty() && self.search_results.is_empty()
    }

    /// Report authoring opens once an industry is chosen and at least one
    /// question has been answered.
    pub fn report_available(&self) -> bool {
        self.selected_industry.is_some() && !self.chat_history.is_empty()
    }

    pub fn report_title(&self) -> Option<String> {
        self.selected_industry.as_deref().map(report_title)
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}
