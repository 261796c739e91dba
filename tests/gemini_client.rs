use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use goaltrack::{GeminiClient, GenerativeModel};
use serde_json::{json, Value};

const KEY: &str = "test-key";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        == Some(KEY)
}

async fn generate(
    Path(action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}})),
        );
    }

    match action.as_str() {
        "gemini-2.0-flash:generateContent" => {
            let prompt = body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap_or_default();
            (
                StatusCode::OK,
                Json(json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "echo: "}, {"text": prompt}]},
                        "finishReason": "STOP"
                    }]
                })),
            )
        }
        "blocked:generateContent" => (
            StatusCode::OK,
            Json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": 404, "message": "not found"}})),
        ),
    }
}

async fn list_models(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::FORBIDDEN, Json(json!({"error": {"message": "denied"}})));
    }

    let page = match query.get("pageToken").map(String::as_str) {
        None => json!({
            "models": [
                {"name": "models/gemini-2.0-flash", "supportedGenerationMethods": ["generateContent", "countTokens"]},
                {"name": "models/text-embedding-004", "supportedGenerationMethods": ["embedContent"]}
            ],
            "nextPageToken": "page2"
        }),
        Some(_) => json!({
            "models": [
                {"name": "models/gemini-1.5-pro", "displayName": "Gemini 1.5 Pro", "supportedGenerationMethods": ["generateContent"]}
            ]
        }),
    };
    (StatusCode::OK, Json(page))
}

async fn start_fake_api() -> (String, tokio::sync::oneshot::Sender<()>) {
    let app = Router::new()
        .route("/v1beta/models", get(list_models))
        .route("/v1beta/models/{action}", post(generate));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    (format!("http://{}/v1beta", addr), shutdown_tx)
}

#[tokio::test]
async fn generate_returns_candidate_text() {
    let (base, _shutdown) = start_fake_api().await;
    let client = GeminiClient::new(&base, "gemini-2.0-flash", KEY.to_string(), 10).unwrap();

    let text = client.generate("How much left?").await.unwrap();
    assert_eq!(text, "echo: How much left?");
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let (base, _shutdown) = start_fake_api().await;
    let client = GeminiClient::new(&base, "gemini-2.0-flash", "wrong".to_string(), 10).unwrap();

    let err = client.generate("hi").await.unwrap_err();
    assert!(format!("{:#}", err).contains("API key not valid"));
}

#[tokio::test]
async fn unknown_model_is_not_found() {
    let (base, _shutdown) = start_fake_api().await;
    let client = GeminiClient::new(&base, "nope", KEY.to_string(), 10).unwrap();

    let err = client.generate("hi").await.unwrap_err();
    assert!(err.to_string().contains("'nope' not found"));
}

#[tokio::test]
async fn blocked_prompt_is_error() {
    let (base, _shutdown) = start_fake_api().await;
    let client = GeminiClient::new(&base, "blocked", KEY.to_string(), 10).unwrap();

    let err = client.generate("hi").await.unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn list_models_follows_pages_and_filters() {
    let (base, _shutdown) = start_fake_api().await;
    let client = GeminiClient::new(&base, "gemini-2.0-flash", KEY.to_string(), 10).unwrap();

    let names: Vec<String> = client
        .list_models()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, ["models/gemini-2.0-flash", "models/gemini-1.5-pro"]);
}
