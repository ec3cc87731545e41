use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use audiorecap::application::ports::{
    AudioTranscriber, SummarizeError, Summarizer, TranscriptionError,
};
use audiorecap::infrastructure::clients::{ChatGptClient, WhisperClient};

const TEST_TIMEOUT_MS: u64 = 5_000;

async fn start_mock_server(
    path: &'static str,
    response_status: u16,
    response_body: String,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        path,
        post(move || {
            let body = response_body.clone();
            async move {
                let status = StatusCode::from_u16(response_status).unwrap();
                (status, [("content-type", "application/json")], body).into_response()
            }
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

fn whisper_client(base_url: String) -> WhisperClient {
    WhisperClient::new(
        base_url,
        "test-key".to_string(),
        "whisper-1".to_string(),
        TEST_TIMEOUT_MS,
    )
}

fn chatgpt_client(base_url: String) -> ChatGptClient {
    ChatGptClient::new(
        base_url,
        "test-key".to_string(),
        "gpt-4o".to_string(),
        TEST_TIMEOUT_MS,
    )
}

#[tokio::test]
async fn given_valid_audio_when_whisper_transcribes_then_text_is_returned() {
    let (base_url, shutdown_tx) = start_mock_server(
        "/v1/audio/transcriptions",
        200,
        r#"{"text": "result text transcribed"}"#.to_string(),
    )
    .await;

    let result = whisper_client(base_url).transcribe(b"audio bytes").await;

    assert_eq!(result.unwrap(), "result text transcribed");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_whisper_transcribes_then_api_error_is_returned() {
    let (base_url, shutdown_tx) =
        start_mock_server("/v1/audio/transcriptions", 500, String::new()).await;

    let result = whisper_client(base_url).transcribe(b"audio bytes").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_undecodable_body_when_whisper_transcribes_then_invalid_response() {
    let (base_url, shutdown_tx) = start_mock_server(
        "/v1/audio/transcriptions",
        200,
        r#"[{"unexpected": "shape"}]"#.to_string(),
    )
    .await;

    let result = whisper_client(base_url).transcribe(b"audio bytes").await;

    assert!(matches!(result, Err(TranscriptionError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_transcript_when_whisper_transcribes_then_empty_response() {
    let (base_url, shutdown_tx) = start_mock_server(
        "/v1/audio/transcriptions",
        200,
        r#"{"text": ""}"#.to_string(),
    )
    .await;

    let result = whisper_client(base_url).transcribe(b"silent audio").await;

    assert!(matches!(result, Err(TranscriptionError::EmptyResponse)));
    shutdown_tx.send(()).ok();
}

fn resume_completion_body(arguments: &str) -> String {
    serde_json::json!({
        "choices": [{
            "message": {
                "tool_calls": [{
                    "function": { "name": "register_resume", "arguments": arguments }
                }]
            }
        }]
    })
    .to_string()
}

#[tokio::test]
async fn given_tool_call_arguments_when_resuming_then_structured_output_is_returned() {
    let arguments = serde_json::json!({
        "title": "title test",
        "description": "description test.",
        "brief_resume": "brief test",
        "medium_resume": "medium test"
    })
    .to_string();
    let (base_url, shutdown_tx) = start_mock_server(
        "/v1/chat/completions",
        200,
        resume_completion_body(&arguments),
    )
    .await;

    let result = chatgpt_client(base_url).resume("xpto").await.unwrap();

    assert_eq!(result.title, "title test");
    assert_eq!(result.description, "description test.");
    assert_eq!(result.brief_resume, "brief test");
    assert_eq!(result.medium_resume, "medium test");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_choices_when_resuming_then_empty_response() {
    let (base_url, shutdown_tx) = start_mock_server(
        "/v1/chat/completions",
        200,
        r#"{"choices": []}"#.to_string(),
    )
    .await;

    let result = chatgpt_client(base_url).resume("xpto").await;

    assert!(matches!(result, Err(SummarizeError::EmptyResponse)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_undecodable_arguments_when_resuming_then_invalid_response() {
    let (base_url, shutdown_tx) = start_mock_server(
        "/v1/chat/completions",
        200,
        resume_completion_body("xpto"),
    )
    .await;

    let result = chatgpt_client(base_url).resume("xpto").await;

    assert!(matches!(result, Err(SummarizeError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_resuming_then_api_error_is_returned() {
    let (base_url, shutdown_tx) =
        start_mock_server("/v1/chat/completions", 500, String::new()).await;

    let result = chatgpt_client(base_url).resume("xpto").await;

    assert!(matches!(result, Err(SummarizeError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_completion_content_when_organizing_then_text_is_returned() {
    let (base_url, shutdown_tx) = start_mock_server(
        "/v1/chat/completions",
        200,
        r#"{"choices": [{"message": {"content": "full text"}}]}"#.to_string(),
    )
    .await;

    let result = chatgpt_client(base_url)
        .full_text_organize("xpto")
        .await
        .unwrap();

    assert_eq!(result, "full text");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_choices_when_organizing_then_empty_response() {
    let (base_url, shutdown_tx) = start_mock_server(
        "/v1/chat/completions",
        200,
        r#"{"choices": []}"#.to_string(),
    )
    .await;

    let result = chatgpt_client(base_url).full_text_organize("xpto").await;

    assert!(matches!(result, Err(SummarizeError::EmptyResponse)));
    shutdown_tx.send(()).ok();
}
