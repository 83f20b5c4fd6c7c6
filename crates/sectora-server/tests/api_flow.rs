//! Drives the full HTTP surface with a scripted model and an in-memory index.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use sectora_export::exporter::Exporter;
use sectora_llm::mock::{Reply, ScriptedChatModel};
use sectora_report::analyst::Analyst;
use sectora_search::memory::InMemorySearchIndex;
use sectora_search::types::SearchResult;
use sectora_server::state::AppState;

fn app(model: Arc<ScriptedChatModel>) -> axum::Router {
    let index = InMemorySearchIndex::with_documents(vec![
        SearchResult::new("반도체 수출", "semiconductor exports hit record high"),
        SearchResult::new("파운드리", "semiconductor foundry capacity expands"),
        SearchResult::new("날씨", "sunny with light wind"),
    ]);
    let analyst = Analyst::new(model, Arc::new(index), Arc::new(Exporter::default()));
    sectora_server::app_router(AppState::new(analyst))
}

async fn call(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_endpoints() {
    let app = app(Arc::new(ScriptedChatModel::always("x")));
    for uri in ["/health", "/api/health"] {
        let resp = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");
    }
}

#[tokio::test]
async fn keyword_to_exported_report() {
    let model = Arc::new(
        ScriptedChatModel::new(vec![
            Reply::text("추천 산업군\n- 메모리: 고대역폭 수요\n- 파운드리: 미세공정 경쟁"),
            Reply::text("HBM 수요가 견조합니다."),
        ])
        .with_fallback(Reply::text("섹션 본문")),
    );
    let app = app(model.clone());

    let (status, body) = call(&app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["session_id"].as_str().unwrap().to_string();
    let base = format!("/api/sessions/{id}");

    let (status, body) = call(
        &app,
        "POST",
        &format!("{base}/keyword"),
        Some(json!({"keyword": "semiconductor"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    let (_, body) = call(&app, "POST", &format!("{base}/recommendations"), None).await;
    assert_eq!(body["industries"], json!(["메모리", "파운드리"]));

    let (status, _) = call(
        &app,
        "POST",
        &format!("{base}/industry"),
        Some(json!({"industry": "메모리"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        "POST",
        &format!("{base}/chat"),
        Some(json!({"question": "수요 전망은?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["turn"]["answer"], "HBM 수요가 견조합니다.");

    for i in 0..8 {
        let (status, body) = call(&app, "POST", &format!("{base}/report/next"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["index"], i);
    }

    let (_, body) = call(&app, "GET", &format!("{base}/report"), None).await;
    assert_eq!(body["progress"]["phase"], "all_sections_authored");
    assert!(body["progress"]["next_section"].is_null());

    let (status, body) = call(&app, "POST", &format!("{base}/report/finalize"), None).await;
    assert_eq!(status, StatusCode::OK);
    let final_text = body["final_text"].as_str().unwrap();
    assert!(final_text.starts_with("# 메모리 시장 분석 및 사업 제안 보고서\n\n## 산업 개요 및 시장 동향"));

    let (_, body) = call(&app, "GET", &base, None).await;
    assert_eq!(body["report"]["progress"]["phase"], "completed");

    for format in ["pdf", "word", "powerpoint"] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("{base}/report/export?format={format}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{format}");
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(!bytes.is_empty());
    }

    // A finalized report stays exportable; a new keyword is refused.
    let (status, _) = call(
        &app,
        "POST",
        &format!("{base}/keyword"),
        Some(json!({"keyword": "foundry"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = call(
        &app,
        "POST",
        &format!("{base}/industry"),
        Some(json!({"industry": "파운드리"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("{base}/report/export?format=pdf"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // recommendation, chat, 8 sections
    assert_eq!(model.call_count(), 10);
}

#[tokio::test]
async fn keyword_change_keeps_report_until_reset() {
    let model = Arc::new(
        ScriptedChatModel::new(vec![Reply::text("- 메모리: 설명")])
            .with_fallback(Reply::text("본문")),
    );
    let app = app(model);

    let (_, body) = call(&app, "POST", "/api/sessions", None).await;
    let base = format!("/api/sessions/{}", body["session_id"].as_str().unwrap());

    call(&app, "POST", &format!("{base}/keyword"), Some(json!({"keyword": "semiconductor"}))).await;
    call(&app, "POST", &format!("{base}/recommendations"), None).await;
    call(&app, "POST", &format!("{base}/industry"), Some(json!({"industry": "메모리"}))).await;
    call(&app, "POST", &format!("{base}/chat"), Some(json!({"question": "q"}))).await;
    let (status, _) = call(&app, "POST", &format!("{base}/report/next"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, "POST", &format!("{base}/keyword"), Some(json!({"keyword": "foundry"}))).await;
    assert_eq!(body["keyword"], "foundry");

    let (_, body) = call(&app, "GET", &base, None).await;
    assert!(body["selected_industry"].is_null());
    assert!(body["chat_history"].as_array().unwrap().is_empty());
    assert_eq!(body["report"]["progress"]["authored"], 1);

    let (status, body) = call(&app, "POST", &format!("{base}/reset"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keyword"], "");
    assert_eq!(body["report"]["progress"]["authored"], 0);
}
