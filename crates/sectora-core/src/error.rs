use thiserror::Error;

/// Top-level error type for the Sectora workspace.
#[derive(Debug, Error)]
pub enum SectoraError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API request failed: {0}")]
    ApiRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited: retry after {retry_after_secs:?}s")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Model returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Transport(String),

    #[error("Search authentication failed: {0}")]
    Auth(String),

    #[error("Invalid search response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to render {format} document: {reason}")]
    Render { format: String, reason: String },

    #[error("Font error: {0}")]
    Font(String),
}

impl ExportError {
    pub fn render(format: impl Into<String>, reason: impl ToString) -> Self {
        ExportError::Render {
            format: format.into(),
            reason: reason.to_string(),
        }
    }
}

/// Transition guards of the session and report state machines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("No keyword has been entered")]
    MissingKeyword,

    #[error("No search results are available for the current keyword")]
    NoSearchResults,

    #[error("No recommendations are available yet")]
    NoRecommendations,

    #[error("'{0}' is not one of the recommended industries")]
    UnknownIndustry(String),

    #[error("No industry has been selected")]
    NoIndustrySelected,

    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error("The report requires at least one chat turn")]
    NoChatHistory,

    #[error("All {total} sections have already been authored")]
    AllSectionsAuthored { total: usize },

    #[error("Section index {index} is out of range (authored: {len})")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("Report cannot be finalized: {authored}/{total} sections authored")]
    NotReadyToFinalize { authored: usize, total: usize },

    #[error("Report has not been finalized")]
    NotFinalized,

    #[error("Report has already been finalized")]
    AlreadyFinalized,
}

/// Coarse classification used by callers to tell "nothing to show" apart from
/// "something broke".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Auth,
    EmptyResponse,
    RenderFailure,
    InvalidState,
}

impl SectoraError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SectoraError::Model(ModelError::Auth(_)) | SectoraError::Search(SearchError::Auth(_)) => {
                ErrorKind::Auth
            }
            SectoraError::Model(ModelError::EmptyResponse) => ErrorKind::EmptyResponse,
            SectoraError::Model(_) | SectoraError::Search(_) => ErrorKind::Transport,
            SectoraError::Export(_) => ErrorKind::RenderFailure,
            SectoraError::Workflow(_) => ErrorKind::InvalidState,
            SectoraError::Serialization(_) | SectoraError::Other(_) => ErrorKind::Transport,
        }
    }
}

pub type Result<T> = std::result::Result<T, SectoraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_display() {
        let err = ModelError::ApiRequest("timeout".into());
        assert_eq!(err.to_string(), "API request failed: timeout");
    }

    #[test]
    fn model_error_rate_limited_display() {
        let err = ModelError::RateLimited {
            retry_after_secs: Some(30),
        };
        assert_eq!(err.to_string(), "Rate limited: retry after Some(30)s");
    }

    #[test]
    fn workflow_error_display() {
        let err = WorkflowError::SectionOutOfRange { index: 9, len: 3 };
        assert_eq!(
            err.to_string(),
            "Section index 9 is out of range (authored: 3)"
        );
        let err = WorkflowError::NotReadyToFinalize {
            authored: 2,
            total: 8,
        };
        assert!(err.to_string().contains("2/8"));
    }

    #[test]
    fn export_error_render_helper() {
        let err = ExportError::render("pdf", "bad font table");
        assert_eq!(
            err.to_string(),
            "Failed to render pdf document: bad font table"
        );
    }

    #[test]
    fn sectora_error_from_variants() {
        let err: SectoraError = ModelError::Auth("bad key".into()).into();
        assert!(matches!(err, SectoraError::Model(ModelError::Auth(_))));
        assert!(err.to_string().contains("bad key"));

        let err: SectoraError = SearchError::Transport("dns".into()).into();
        assert!(matches!(err, SectoraError::Search(_)));

        let err: SectoraError = WorkflowError::NoChatHistory.into();
        assert!(matches!(
            err,
            SectoraError::Workflow(WorkflowError::NoChatHistory)
        ));
    }

    #[test]
    fn kind_classification() {
        let cases: Vec<(SectoraError, ErrorKind)> = vec![
            (ModelError::ApiRequest("x".into()).into(), ErrorKind::Transport),
            (
                ModelError::RateLimited {
                    retry_after_secs: None,
                }
                .into(),
                ErrorKind::Transport,
            ),
            (ModelError::Auth("x".into()).into(), ErrorKind::Auth),
            (SearchError::Auth("x".into()).into(), ErrorKind::Auth),
            (ModelError::EmptyResponse.into(), ErrorKind::EmptyResponse),
            (
                ExportError::render("docx", "zip").into(),
                ErrorKind::RenderFailure,
            ),
            (
                WorkflowError::NotFinalized.into(),
                ErrorKind::InvalidState,
            ),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }
}
