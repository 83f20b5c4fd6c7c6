pub mod chat;
pub mod report;
pub mod search;
pub mod sessions;

use axum::{Router, routing::get};

use crate::error::AppError;
use crate::session::SharedSession;
use crate::state::AppState;

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api",
            Router::new()
                .route("/health", get(|| async { "ok" }))
                .merge(sessions::routes())
                .merge(search::routes())
                .merge(chat::routes())
                .merge(report::routes())
                .with_state(state),
        )
}

/// Look up a session or fail with 404.
pub(crate) async fn find_session(state: &AppState, id: &str) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::session_not_found(id))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use http_body_util::BodyExt;

    use sectora_export::exporter::Exporter;
    use sectora_llm::mock::ScriptedChatModel;
    use sectora_report::analyst::Analyst;
    use sectora_search::memory::InMemorySearchIndex;
    use sectora_search::types::SearchResult;

    use crate::state::AppState;

    pub const RECOMMENDATIONS: &str =
        "- 배터리: 수요 급증\n- 자율주행: 기술 고도화\n- 충전인프라: 보급 확대";

    pub fn test_state(model: Arc<ScriptedChatModel>) -> AppState {
        let index = InMemorySearchIndex::with_documents(vec![
            SearchResult::new("EV 판매", "electric vehicles 판매량 증가"),
            SearchResult::new("배터리 공급망", "electric vehicles 배터리 수요"),
        ]);
        let analyst = Analyst::new(model, Arc::new(index), Arc::new(Exporter::default()));
        AppState::new(analyst)
    }

    pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub async fn json_body(resp: Response<Body>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
