use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use groundrag_core::traits::Generator;
use groundrag_core::types::GenerationRequest;
use groundrag_llm::OpenAiCompatibleGenerator;
use serde_json::{json, Value};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}/v1")
}

fn request() -> GenerationRequest {
    GenerationRequest { system_prompt: "sys".into(), user_prompt: "KONTEKS".into(), temperature: 0.0, max_tokens: 400 }
}

#[tokio::test]
async fn posts_chat_completion_with_bearer_auth() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
            let reply = format!("{}|{}|{}", auth, body["model"], body["max_tokens"]);
            Json(json!({ "choices": [ { "message": { "role": "assistant", "content": reply } } ] }))
        }),
    );
    let base = spawn(router).await;
    let generator =
        OpenAiCompatibleGenerator::new(&base, "llama-test", Some("secret".into()), Duration::from_secs(5)).unwrap();

    let out = generator.generate(&request()).await.expect("completion");
    assert_eq!(out, "Bearer secret|\"llama-test\"|400");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
    );
    let base = spawn(router).await;
    let generator = OpenAiCompatibleGenerator::new(&base, "m", None, Duration::from_secs(5)).unwrap();

    let err = generator.generate(&request()).await.expect_err("429");
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn unreachable_endpoint_is_an_error() {
    let generator = OpenAiCompatibleGenerator::new("http://127.0.0.1:9/v1", "m", None, Duration::from_secs(2)).unwrap();
    assert!(generator.generate(&request()).await.is_err());
}
