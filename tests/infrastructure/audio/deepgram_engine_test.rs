use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::Query;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use medrelay::application::ports::{TranscriptionEngine, TranscriptionError};
use medrelay::domain::AudioChunk;
use medrelay::infrastructure::audio::{DeepgramEngine, ListenResponse, extract_transcript};

async fn start_mock_deepgram_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/v1/listen",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

#[derive(Clone)]
struct CapturedRequest {
    params: HashMap<String, String>,
    authorization: String,
    content_type: String,
    body_len: usize,
}

async fn start_capturing_deepgram_server() -> (
    String,
    oneshot::Sender<()>,
    Arc<Mutex<Option<CapturedRequest>>>,
) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let captured: Arc<Mutex<Option<CapturedRequest>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&captured);

    let app = Router::new().route(
        "/v1/listen",
        post(
            move |Query(params): Query<HashMap<String, String>>,
                  headers: HeaderMap,
                  body: Bytes| {
                let sink = Arc::clone(&sink);
                async move {
                    let header = |name: &str| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                            .to_string()
                    };
                    *sink.lock().unwrap() = Some(CapturedRequest {
                        params,
                        authorization: header("authorization"),
                        content_type: header("content-type"),
                        body_len: body.len(),
                    });
                    axum::Json(serde_json::json!({
                        "results": {
                            "channels": [{"alternatives": [{"transcript": "Hello doctor"}]}]
                        }
                    }))
                }
            },
        ),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx, captured)
}

fn audio_chunk() -> AudioChunk {
    AudioChunk::new(b"fake audio bytes".to_vec(), Some("audio/webm".to_string()))
}

#[tokio::test]
async fn given_valid_audio_when_transcribing_then_returns_transcript() {
    let response_body =
        r#"{"results": {"channels": [{"alternatives": [{"transcript": "Take 500mg ibuprofen"}]}]}}"#;
    let (base_url, shutdown_tx) = start_mock_deepgram_server(200, response_body).await;

    let engine = DeepgramEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(&audio_chunk(), "en").await;

    assert_eq!(result.unwrap(), "Take 500mg ibuprofen");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_bad_request_when_transcribing_then_returns_invalid_audio() {
    let response_body = r#"{"err_code": "Bad Request", "err_msg": "failed to process audio"}"#;
    let (base_url, shutdown_tx) = start_mock_deepgram_server(400, response_body).await;

    let engine = DeepgramEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(&audio_chunk(), "en").await;

    assert!(matches!(result, Err(TranscriptionError::InvalidAudio(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_transcribing_then_returns_api_error() {
    let (base_url, shutdown_tx) = start_mock_deepgram_server(500, "internal error").await;

    let engine = DeepgramEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(&audio_chunk(), "en").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_channels_when_transcribing_then_returns_empty_transcript() {
    let response_body = r#"{"results": {"channels": []}}"#;
    let (base_url, shutdown_tx) = start_mock_deepgram_server(200, response_body).await;

    let engine = DeepgramEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(&audio_chunk(), "en").await;

    assert_eq!(result.unwrap(), "");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_non_json_body_when_transcribing_then_returns_invalid_response() {
    let (base_url, shutdown_tx) = start_mock_deepgram_server(200, "not json at all").await;

    let engine = DeepgramEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(&audio_chunk(), "en").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::InvalidResponse(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_request_when_transcribing_then_sends_model_language_and_auth() {
    let (base_url, shutdown_tx, captured) = start_capturing_deepgram_server().await;

    let engine = DeepgramEngine::new("test-key".to_string(), Some(base_url), None);
    let chunk = audio_chunk();

    let result = engine.transcribe(&chunk, "en").await;
    assert_eq!(result.unwrap(), "Hello doctor");

    let captured = captured.lock().unwrap().clone().unwrap();
    assert_eq!(captured.params.get("model").map(String::as_str), Some("nova-3"));
    assert_eq!(captured.params.get("language").map(String::as_str), Some("en"));
    assert_eq!(captured.authorization, "Token test-key");
    assert_eq!(captured.content_type, "audio/webm");
    assert_eq!(captured.body_len, chunk.len());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_custom_model_when_transcribing_then_query_uses_it() {
    let (base_url, shutdown_tx, captured) = start_capturing_deepgram_server().await;

    let engine = DeepgramEngine::new(
        "test-key".to_string(),
        Some(base_url),
        Some("nova-2".to_string()),
    );

    engine.transcribe(&audio_chunk(), "hi").await.unwrap();

    let captured = captured.lock().unwrap().clone().unwrap();
    assert_eq!(captured.params.get("model").map(String::as_str), Some("nova-2"));
    assert_eq!(captured.params.get("language").map(String::as_str), Some("hi"));
    shutdown_tx.send(()).ok();
}

#[test]
fn given_populated_response_when_extracting_then_returns_first_alternative() {
    let response: ListenResponse = serde_json::from_str(
        r#"{"results": {"channels": [{"alternatives": [{"transcript": "first"}, {"transcript": "second"}]}]}}"#,
    )
    .unwrap();

    assert_eq!(extract_transcript(&response).as_deref(), Some("first"));
}

#[test]
fn given_missing_results_when_extracting_then_returns_none() {
    let response: ListenResponse = serde_json::from_str("{}").unwrap();

    assert_eq!(extract_transcript(&response), None);
}

#[test]
fn given_empty_channels_when_extracting_then_returns_none() {
    let response: ListenResponse =
        serde_json::from_str(r#"{"results": {"channels": []}}"#).unwrap();

    assert_eq!(extract_transcript(&response), None);
}

#[test]
fn given_empty_alternatives_when_extracting_then_returns_none() {
    let response: ListenResponse =
        serde_json::from_str(r#"{"results": {"channels": [{"alternatives": []}]}}"#).unwrap();

    assert_eq!(extract_transcript(&response), None);
}
