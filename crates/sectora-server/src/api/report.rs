use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use sectora_export::format::ExportFormat;
use sectora_report::types::report_title;

use crate::api::find_session;
use crate::error::AppError;
use crate::state::AppState;
use crate::types::{ExportQuery, FinalizeResponse, ReportView, SectionResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions/{id}/report", get(get_report))
        .route("/sessions/{id}/report/next", post(author_next))
        .route(
            "/sessions/{id}/report/sections/{index}/rewrite",
            post(rewrite_section),
        )
        .route("/sessions/{id}/report/finalize", post(finalize))
        .route("/sessions/{id}/report/export", get(export))
}

async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportView>, AppError> {
    let session = find_session(&state, &id).await?;
    let guard = session.lock().await;
    Ok(Json(ReportView::new(&guard)))
}

async fn author_next(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SectionResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    let mut guard = session.lock().await;
    let section = state.analyst.author_next_section(&mut guard).await?.clone();
    let progress = guard.workflow.progress();
    Ok(Json(SectionResponse {
        index: progress.authored - 1,
        section,
        progress,
    }))
}

async fn rewrite_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<SectionResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    let mut guard = session.lock().await;
    let section = state.analyst.rewrite_section(&mut guard, index).await?.clone();
    Ok(Json(SectionResponse {
        index,
        section,
        progress: guard.workflow.progress(),
    }))
}

async fn finalize(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FinalizeResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    let mut guard = session.lock().await;
    let final_text = state.analyst.finalize(&mut guard)?.to_string();
    let title = report_title(guard.selected_industry()?);
    Ok(Json(FinalizeResponse { title, final_text }))
}

async fn export(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let format: ExportFormat = query.format.parse().map_err(AppError::BadRequest)?;
    let session = find_session(&state, &id).await?;
    let report = {
        let guard = session.lock().await;
        state.analyst.export(&guard, format)?
    };

    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        encode_filename(&report.file_name)
    );
    let disposition =
        HeaderValue::from_str(&disposition).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(report.mime_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

/// Percent-encode a file name for an RFC 5987 `filename*` parameter.
fn encode_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len() * 3);
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
