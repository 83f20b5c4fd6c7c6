use axum::extract::{Path, State};
use axum::{Json, Router, routing::post};

use crate::api::find_session;
use crate::error::AppError;
use crate::state::AppState;
use crate::types::{
    KeywordRequest, RecommendationsResponse, SearchResponse, SelectIndustryRequest,
    SelectIndustryResponse,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions/{id}/keyword", post(submit_keyword))
        .route("/sessions/{id}/recommendations", post(recommend))
        .route("/sessions/{id}/industry", post(select_industry))
}

async fn submit_keyword(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<KeywordRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    let mut guard = session.lock().await;
    state.analyst.submit_keyword(&mut guard, &req.keyword).await?;
    Ok(Json(SearchResponse {
        keyword: guard.keyword.clone(),
        results: guard.search_results.clone(),
    }))
}

async fn recommend(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    let mut guard = session.lock().await;
    let industries = state.analyst.recommend(&mut guard).await?.to_vec();
    Ok(Json(RecommendationsResponse {
        industries,
        raw: guard.recommendations_raw.clone(),
    }))
}

async fn select_industry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SelectIndustryRequest>,
) -> Result<Json<SelectIndustryResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    let mut guard = session.lock().await;
    guard.select_industry(&req.industry, req.keep_history)?;
    let selected_industry = guard.selected_industry()?.to_string();
    tracing::info!(session_id = %id, industry = %selected_industry, "Industry selected");
    Ok(Json(SelectIndustryResponse {
        selected_industry,
        chat_turns: guard.chat_history.len(),
    }))
}
