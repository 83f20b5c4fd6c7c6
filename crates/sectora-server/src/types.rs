use serde::{Deserialize, Serialize};

use sectora_report::session::SessionState;
use sectora_report::types::{ChatTurn, ReportSection};
use sectora_report::workflow::Progress;
use sectora_search::types::SearchResult;

// --- Sessions ---

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// Full view of one session, as returned by `GET /sessions/{id}`.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub keyword: String,
    pub search_results: Vec<SearchResult>,
    pub recommendations: Vec<String>,
    pub selected_industry: Option<String>,
    pub chat_history: Vec<ChatTurn>,
    pub report: ReportView,
}

impl SessionSnapshot {
    pub fn new(session_id: String, state: &SessionState) -> Self {
        Self {
            session_id,
            keyword: state.keyword.clone(),
            search_results: state.search_results.clone(),
            recommendations: state.recommendations.clone(),
            selected_industry: state.selected_industry.clone(),
            chat_history: state.chat_history.clone(),
            report: ReportView::new(state),
        }
    }
}

// --- Search & recommendations ---

#[derive(Debug, Deserialize)]
pub struct KeywordRequest {
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub industries: Vec<String>,
    pub raw: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectIndustryRequest {
    pub industry: String,
    #[serde(default)]
    pub keep_history: bool,
}

#[derive(Debug, Serialize)]
pub struct SelectIndustryResponse {
    pub selected_industry: String,
    pub chat_turns: usize,
}

// --- Chat ---

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub turn: ChatTurn,
    pub history_len: usize,
}

// --- Report ---

#[derive(Debug, Serialize)]
pub struct ReportView {
    pub progress: Progress,
    pub sections: Vec<ReportSection>,
    /// Assembled markdown of what has been authored so far. Absent until an
    /// industry is selected.
    pub preview: Option<String>,
    pub final_text: Option<String>,
}

impl ReportView {
    pub fn new(state: &SessionState) -> Self {
        let workflow = &state.workflow;
        Self {
            progress: workflow.progress(),
            sections: workflow.sections().to_vec(),
            preview: state
                .selected_industry
                .as_deref()
                .map(|industry| workflow.preview(industry)),
            final_text: workflow.final_text().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub index: usize,
    pub section: ReportSection,
    pub progress: Progress,
}

#[derive(Debug, Serialize)]
pub struct FinalizeResponse {
    pub title: String,
    pub final_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: String,
}
