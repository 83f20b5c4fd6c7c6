use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::find_session;
use crate::error::AppError;
use crate::state::AppState;
use crate::types::{CreateSessionResponse, SessionSnapshot};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/reset", post(reset_session))
}

async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    tracing::info!(%session_id, "Session created");
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, &id).await?;
    let guard = session.lock().await;
    Ok(Json(SessionSnapshot::new(id, &guard)))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.delete(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::session_not_found(&id))
    }
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, &id).await?;
    let mut guard = session.lock().await;
    guard.reset_all();
    tracing::info!(session_id = %id, "Session reset");
    Ok(Json(SessionSnapshot::new(id, &guard)))
}
