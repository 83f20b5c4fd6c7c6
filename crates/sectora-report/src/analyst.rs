use std::sync::Arc;

use tracing::{info, warn};

use sectora_core::error::{Result, WorkflowError};
use sectora_core::model::{CallOptions, ChatModel};
use sectora_export::exporter::DocumentExporter;
use sectora_export::format::ExportFormat;
use sectora_search::gateway::SearchGateway;
use sectora_search::types::{DEFAULT_TOP_K, SearchResult};

use crate::prompt;
use crate::recommend::extract_recommendations;
use crate::session::SessionState;
use crate::types::{ChatTurn, ReportSection, report_title};
use crate::workflow::{AuthoringContext, ReportWorkflow};

/// A rendered report ready for download.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Drives a [`SessionState`] through search, recommendation, Q&A and report
/// authoring using the configured gateways.
///
/// Every operation either commits its result to the session or leaves it
/// exactly as it was.
#[derive(Clone)]
pub struct Analyst {
    model: Arc<dyn ChatModel>,
    search: Arc<dyn SearchGateway>,
    exporter: Arc<dyn DocumentExporter>,
    options: CallOptions,
    top_k: usize,
}

impl Analyst {
    pub fn new(
        model: Arc<dyn ChatModel>,
        search: Arc<dyn SearchGateway>,
        exporter: Arc<dyn DocumentExporter>,
    ) -> Self {
        Self {
            model,
            search,
            exporter,
            options: CallOptions::analyst(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the keyword and search for it. A rejected keyword leaves the
    /// session untouched.
    pub async fn submit_keyword(&self, state: &mut SessionState, keyword: &str) -> Result<usize> {
        state.set_keyword(keyword)?;
        self.run_search(state).await
    }

    /// Search once per keyword. Stored results are reused; an empty result
    /// set is not an error but stores nothing, so a later call searches again.
    pub async fn run_search(&self, state: &mut SessionState) -> Result<usize> {
        if state.keyword.is_empty() {
            return Err(WorkflowError::MissingKeyword.into());
        }
        if !state.needs_search() {
            return Ok(state.search_results.len());
        }

        let results: Vec<SearchResult> = self.search.search(&state.keyword, self.top_k).await?;
        if results.is_empty() {
            warn!(keyword = %state.keyword, "Search returned no documents");
            return Ok(0);
        }
        info!(keyword = %state.keyword, count = results.len(), "Search completed");
        state.search_results = results;
        Ok(state.search_results.len())
    }

    /// Ask the model for industries grounded in the search results. Skipped
    /// when a usable recommendation list already exists.
    pub async fn recommend<'s>(&self, state: &'s mut SessionState) -> Result<&'s [String]> {
        if state.search_results.is_empty() {
            return Err(WorkflowError::NoSearchResults.into());
        }
        if !state.recommendations.is_empty() {
            return Ok(state.recommendations.as_slice());
        }

        let messages = prompt::recommendation_messages(&state.keyword, &state.search_results);
        let raw = self.model.complete(&messages, &self.options).await?;
        let list = extract_recommendations(&raw);
        if list.is_empty() {
            warn!(keyword = %state.keyword, "No industries could be parsed from the response");
        } else {
            info!(keyword = %state.keyword, industries = ?list, "Industries recommended");
        }
        state.recommendations_raw = raw;
        state.recommendations = list;
        Ok(state.recommendations.as_slice())
    }

    /// Answer a question about the selected industry and record the turn.
    pub async fn ask<'s>(&self, state: &'s mut SessionState, question: &str) -> Result<&'s ChatTurn> {
        let industry = state.selected_industry()?;
        let question = question.trim();
        if question.is_empty() {
            return Err(WorkflowError::EmptyQuestion.into());
        }

        let messages = prompt::chat_messages(industry, &state.chat_history, question);
        let answer = self.model.complete(&messages, &self.options).await?;
        info!(industry, turn = state.chat_history.len() + 1, "Question answered");
        state.chat_history.push(ChatTurn::new(question, answer));
        Ok(&state.chat_history[state.chat_history.len() - 1])
    }

    /// Authoring opens once an industry is selected and a question answered.
    fn authoring_parts(
        state: &mut SessionState,
    ) -> Result<(AuthoringContext<'_>, &mut ReportWorkflow)> {
        if !state.report_available() {
            state.selected_industry()?;
            return Err(WorkflowError::NoChatHistory.into());
        }
        let SessionState {
            selected_industry,
            chat_history,
            workflow,
            ..
        } = state;
        let industry = selected_industry
            .as_deref()
            .ok_or(WorkflowError::NoIndustrySelected)?;
        let ctx = AuthoringContext {
            industry,
            history: chat_history.as_slice(),
        };
        Ok((ctx, workflow))
    }

    pub async fn author_next_section<'s>(
        &self,
        state: &'s mut SessionState,
    ) -> Result<&'s ReportSection> {
        let (ctx, workflow) = Self::authoring_parts(state)?;
        workflow
            .author_next_section(self.model.as_ref(), &self.options, ctx)
            .await
    }

    pub async fn rewrite_section<'s>(
        &self,
        state: &'s mut SessionState,
        index: usize,
    ) -> Result<&'s ReportSection> {
        let (ctx, workflow) = Self::authoring_parts(state)?;
        workflow
            .rewrite_section(index, self.model.as_ref(), &self.options, ctx)
            .await
    }

    pub fn finalize<'s>(&self, state: &'s mut SessionState) -> Result<&'s str> {
        let SessionState {
            selected_industry,
            workflow,
            ..
        } = state;
        let industry = selected_industry
            .as_deref()
            .ok_or(WorkflowError::NoIndustrySelected)?;
        workflow.finalize(industry)
    }

    /// Render the finalized report.
    pub fn export(&self, state: &SessionState, format: ExportFormat) -> Result<ExportedReport> {
        let body = state
            .workflow
            .final_text()
            .ok_or(WorkflowError::NotFinalized)?;
        let industry = state.selected_industry()?;
        let title = report_title(industry);

        let bytes = self.exporter.render(format, &title, body)?;
        Ok(ExportedReport {
            file_name: format.file_name(industry, &state.keyword),
            mime_type: format.mime_type(),
            bytes,
        })
    }
}
