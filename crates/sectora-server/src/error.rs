use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sectora_core::error::{ErrorKind, ModelError, SectoraError, WorkflowError};

/// Application error type that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Sectora(SectoraError),
    Internal(String),
}

impl AppError {
    pub fn session_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Session not found: {id}"))
    }
}

impl From<SectoraError> for AppError {
    fn from(err: SectoraError) -> Self {
        AppError::Sectora(err)
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        AppError::Sectora(err.into())
    }
}

fn status_for(err: &SectoraError) -> StatusCode {
    match err {
        SectoraError::Model(ModelError::RateLimited { .. }) => StatusCode::TOO_MANY_REQUESTS,
        SectoraError::Workflow(
            WorkflowError::UnknownIndustry(_)
            | WorkflowError::EmptyQuestion
            | WorkflowError::MissingKeyword
            | WorkflowError::SectionOutOfRange { .. },
        ) => StatusCode::BAD_REQUEST,
        other => match other.kind() {
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::Transport | ErrorKind::EmptyResponse => StatusCode::BAD_GATEWAY,
            ErrorKind::RenderFailure => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::InvalidState => StatusCode::CONFLICT,
        },
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Sectora(err) => (status_for(err), err.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use sectora_core::error::{ExportError, SearchError};

    use super::*;

    fn status(err: impl Into<SectoraError>) -> StatusCode {
        AppError::Sectora(err.into()).into_response().status()
    }

    #[test]
    fn auth_error_returns_401() {
        assert_eq!(
            status(ModelError::Auth("bad key".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(SearchError::Auth("forbidden".into())),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn rate_limited_returns_429() {
        let err = ModelError::RateLimited {
            retry_after_secs: None,
        };
        assert_eq!(status(err), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn gateway_failures_return_502() {
        assert_eq!(
            status(ModelError::ApiRequest("timeout".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status(ModelError::EmptyResponse), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status(SearchError::Transport("dns".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn render_failure_returns_500() {
        assert_eq!(
            status(ExportError::render("pdf", "broken")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn workflow_guards() {
        assert_eq!(status(WorkflowError::NoChatHistory), StatusCode::CONFLICT);
        assert_eq!(
            status(WorkflowError::NotReadyToFinalize {
                authored: 3,
                total: 8
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(WorkflowError::UnknownIndustry("조선".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::session_not_found("abc").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
