use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yt_tldr::ai::InferenceClient;
use yt_tldr::ai::client::build_request_body;
use yt_tldr::core::config::AppConfig;
use yt_tldr::errors::SummaryError;
use yt_tldr::summarize::Summarizer;

fn client_for(server: &MockServer, token: Option<&str>, retries: &str) -> InferenceClient {
    let uri = server.uri();
    let token = token.map(ToString::to_string);
    let retries = retries.to_string();
    let config = AppConfig::from_lookup(move |key| match key {
        "SUMMARIZER_API_URL" => Some(uri.clone()),
        "SUMMARIZER_MODEL" => Some("org/model".to_string()),
        "HF_API_TOKEN" => token.clone(),
        "UPSTREAM_MAX_RETRIES" => Some(retries.clone()),
        _ => None,
    })
    .unwrap();
    InferenceClient::new(&config)
}

#[tokio::test]
async fn test_summary_request_carries_token_and_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/org/model"))
        .and(header("authorization", "Bearer hf_test"))
        .and(body_json(build_request_body("a transcript chunk", 64)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "summary_text": "a summary" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("hf_test"), "0");
    let summary = client.summarize("a transcript chunk", 64).await.unwrap();

    assert_eq!(summary, "a summary");
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/org/model"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad input"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None, "3");
    let err = client.summarize("text", 150).await.unwrap_err();

    match err {
        SummaryError::ModelError(msg) => assert!(msg.contains("bad input")),
        other => panic!("expected ModelError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_model_loading_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/org/model"))
        .respond_with(ResponseTemplate::new(503).set_body_string("loading"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/org/model"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "summary_text": "ready now" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None, "2");
    assert_eq!(client.summarize("text", 150).await.unwrap(), "ready now");
}

#[tokio::test]
async fn test_exhausted_retries_surface_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/org/model"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, None, "1");
    let err = client.summarize("text", 150).await.unwrap_err();

    assert!(matches!(err, SummaryError::HttpError(_)));
    assert_eq!(err.status_code(), 502);
}

#[tokio::test]
async fn test_unexpected_body_is_model_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/org/model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "odd" })))
        .mount(&server)
        .await;

    let client = client_for(&server, None, "0");
    let err = client.summarize("text", 150).await.unwrap_err();

    assert!(matches!(err, SummaryError::ModelError(_)));
}
