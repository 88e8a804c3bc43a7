use futures_util::StreamExt;
use ollama_structured::{
    from_ollama, Error, GenerateClient, GenerateOptions, GenerateRequest, Model, OllamaClient,
    OutputType,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(schemars::JsonSchema)]
#[allow(dead_code)]
struct Weather {
    city: String,
    celsius: f64,
}

fn ndjson(lines: &[serde_json::Value]) -> String {
    lines
        .iter()
        .map(|line| format!("{line}\n"))
        .collect::<String>()
}

#[tokio::test]
async fn test_generate_posts_format_and_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3.2",
            "prompt": "Weather in Lyon?",
            "stream": false,
            "format": {"type": "object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2",
            "created_at": "2024-01-01T00:00:00Z",
            "response": "{\"city\":\"Lyon\",\"celsius\":21.5}",
            "done": true,
            "done_reason": "stop"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(OllamaClient::new(server.uri()).unwrap());
    let model = from_ollama(client, Some("llama3.2".to_string()));

    let text = model
        .generate(
            "Weather in Lyon?".into(),
            Some(&OutputType::record::<Weather>()),
            GenerateOptions::new(),
        )
        .await
        .unwrap();

    assert_eq!(text, "{\"city\":\"Lyon\",\"celsius\":21.5}");
}

#[tokio::test]
async fn test_generate_stream_reads_ndjson() {
    let server = MockServer::start().await;

    let body = ndjson(&[
        json!({"model": "llama3.2", "response": "Hel", "done": false}),
        json!({"model": "llama3.2", "response": "lo", "done": false}),
        json!({"model": "llama3.2", "response": "", "done": true, "eval_count": 2}),
    ]);

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
        .expect(2)
        .mount(&server)
        .await;

    let client = Arc::new(OllamaClient::new(server.uri()).unwrap());
    let model = from_ollama(client, Some("llama3.2".to_string()));

    let stream = model
        .generate_stream("Hello?".into(), None, GenerateOptions::new())
        .await
        .unwrap();
    let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;
    assert_eq!(fragments, ["Hel", "lo", ""]);

    let text = model
        .generate_stream("Hello?".into(), None, GenerateOptions::new())
        .await
        .unwrap()
        .into_text()
        .await
        .unwrap();
    assert_eq!(text, "Hello");
}

#[tokio::test]
async fn test_error_status_becomes_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "model 'missing' not found"})),
        )
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri()).unwrap();
    let request = GenerateRequest::new("hi", None, false, GenerateOptions::new().model("missing"));

    match client.generate(&request).await {
        Err(Error::Provider { provider, message }) => {
            assert_eq!(provider, "Ollama");
            assert!(message.contains("404"));
            assert!(message.contains("model 'missing' not found"));
        }
        other => panic!("Expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_mid_stream_error_line() {
    let server = MockServer::start().await;

    let body = ndjson(&[
        json!({"response": "par", "done": false}),
        json!({"error": "out of memory"}),
    ]);

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri()).unwrap();
    let request = GenerateRequest::new("hi", None, true, GenerateOptions::new().model("llama3.2"));
    let mut chunks = client.generate_stream(&request).await.unwrap();

    assert_eq!(chunks.next().await.unwrap().unwrap().response, "par");
    match chunks.next().await.unwrap() {
        Err(Error::Provider { message, .. }) => assert_eq!(message, "out of memory"),
        other => panic!("Expected provider error, got {other:?}"),
    }
    assert!(chunks.next().await.is_none());
}

#[tokio::test]
async fn test_non_string_error_line_is_not_dropped() {
    let server = MockServer::start().await;

    let body = ndjson(&[
        json!({"response": "par", "done": false}),
        json!({"error": 5}),
        json!({"response": "", "done": true}),
    ]);

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri()).unwrap();
    let request = GenerateRequest::new("hi", None, true, GenerateOptions::new().model("llama3.2"));
    let mut chunks = client.generate_stream(&request).await.unwrap();

    assert_eq!(chunks.next().await.unwrap().unwrap().response, "par");
    match chunks.next().await.unwrap() {
        Err(Error::Provider { message, .. }) => assert_eq!(message, "5"),
        other => panic!("Expected provider error, got {other:?}"),
    }
    assert!(chunks.next().await.unwrap().unwrap().done);
    assert!(chunks.next().await.is_none());
}
