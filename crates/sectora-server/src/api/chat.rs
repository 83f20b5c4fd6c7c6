use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};

use crate::api::find_session;
use crate::error::AppError;
use crate::state::AppState;
use crate::types::{AskRequest, ChatResponse};

pub fn routes() -> Router<AppState> {
    Router::new().route("/sessions/{id}/chat", post(ask).delete(clear_history))
}

async fn ask(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AskRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    let mut guard = session.lock().await;
    let turn = state.analyst.ask(&mut guard, &req.question).await?.clone();
    Ok(Json(ChatResponse {
        turn,
        history_len: guard.chat_history.len(),
    }))
}

async fn clear_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let session = find_session(&state, &id).await?;
    session.lock().await.clear_chat_history();
    Ok(StatusCode::NO_CONTENT)
}
