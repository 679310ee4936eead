use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pixi::{Config, GenerationTransport, HttpClient, PromptSubmitter, RequestState, SubmissionError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: Value,
    received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn generate_handler(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    stub.received.lock().unwrap().push((content_type, body));

    (stub.status, Json(stub.body.clone())).into_response()
}

async fn health_handler(State(stub): State<Stub>) -> Response {
    (stub.status, Json(stub.body.clone())).into_response()
}

/// Serves the stub on an ephemeral port and returns a config pointing at it.
async fn spawn_stub(status: StatusCode, body: Value) -> (Config, Stub) {
    let stub = Stub {
        status,
        body,
        received: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/generate-image", post(generate_handler))
        .route("/health", get(health_handler))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config::new().with_endpoint(format!("http://{}/generate-image", addr));
    (config, stub)
}

#[tokio::test]
async fn test_successful_generation() {
    let (config, stub) = spawn_stub(
        StatusCode::OK,
        json!({ "status": "success", "image_url": "http://x/y.png", "prompt": "a cat" }),
    )
    .await;
    let submitter = PromptSubmitter::from_config(&config).unwrap();

    let result = submitter.submit("a cat").await.unwrap();

    assert_eq!(result.image_url, "http://x/y.png");
    assert!(!submitter.is_in_flight());

    let received = stub.received.lock().unwrap().clone();
    assert_eq!(
        received,
        vec![(Some("application/json".to_string()), json!({ "prompt": "a cat" }))]
    );
}

#[tokio::test]
async fn test_server_error_is_request_failed() {
    let (config, stub) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "detail": "Error generating image: out of memory" }),
    )
    .await;
    let submitter = PromptSubmitter::from_config(&config).unwrap();

    assert_eq!(
        submitter.submit("a cat").await,
        Err(SubmissionError::RequestFailed)
    );
    assert_eq!(submitter.state(), RequestState::Failed);
    assert_eq!(stub.received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_status_error_carries_service_detail() {
    let (config, _stub) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "detail": "Error generating image: out of memory" }),
    )
    .await;
    let client = HttpClient::new(&config).unwrap();
    let request = pixi::GenerationRequest::new(pixi::PromptText::parse("a cat").unwrap());

    match client.generate(&request).await {
        Err(pixi::PixiError::Status { status, detail }) => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Error generating image: out of memory");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unexpected_body_is_request_failed() {
    let (config, _stub) = spawn_stub(StatusCode::OK, json!({ "unexpected": true })).await;
    let submitter = PromptSubmitter::from_config(&config).unwrap();

    assert_eq!(
        submitter.submit("a cat").await,
        Err(SubmissionError::RequestFailed)
    );
    assert!(!submitter.is_in_flight());
}

#[tokio::test]
async fn test_camel_case_field_is_not_accepted() {
    let (config, _stub) = spawn_stub(StatusCode::OK, json!({ "imageUrl": "http://x/y.png" })).await;
    let submitter = PromptSubmitter::from_config(&config).unwrap();

    assert_eq!(
        submitter.submit("a cat").await,
        Err(SubmissionError::RequestFailed)
    );
}

#[tokio::test]
async fn test_blank_prompt_sends_nothing() {
    let (config, stub) = spawn_stub(StatusCode::OK, json!({ "image_url": "http://x/y.png" })).await;
    let submitter = PromptSubmitter::from_config(&config).unwrap();

    assert_eq!(
        submitter.submit("  ").await,
        Err(SubmissionError::EmptyPrompt)
    );
    assert!(stub.received.lock().unwrap().is_empty());
    assert!(!submitter.is_in_flight());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_request_failed() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = Config::new().with_endpoint(format!("http://{}/generate-image", addr));
    let submitter = PromptSubmitter::from_config(&config).unwrap();

    assert_eq!(
        submitter.submit("a cat").await,
        Err(SubmissionError::RequestFailed)
    );
    assert_eq!(submitter.state(), RequestState::Failed);
}

#[tokio::test]
async fn test_health_check() {
    let (config, _stub) = spawn_stub(StatusCode::OK, json!({ "status": "healthy" })).await;
    let submitter = PromptSubmitter::from_config(&config).unwrap();

    assert!(submitter.health_check().await.unwrap().is_healthy());
}

#[tokio::test]
async fn test_missing_endpoint_is_a_config_error() {
    assert!(matches!(
        PromptSubmitter::from_config(&Config::new()),
        Err(pixi::PixiError::Config(_))
    ));
}
