use std::path::Path;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::presentation::handlers::models::{ErrorResponse, SummarySimpleResponse};
use crate::presentation::state::AppState;

const ALLOWED_EXTENSIONS: &[&str] = &["mp3", "mp4", "mpeg", "mpga", "m4a", "wav", "webm"];

fn has_allowed_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Accepts a multipart audio upload, creates the summary record and kicks
/// off the background pipeline. Responds 201 with the initial snapshot
/// without waiting for any pipeline progress.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let data = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Upload request without a file field");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "missing file to upload".to_string(),
                    }),
                )
                    .into_response();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart request");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "missing file to upload".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !has_allowed_extension(&filename) {
            tracing::warn!(filename = %filename, "Rejected upload with disallowed extension");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "invalid file".to_string(),
                }),
            )
                .into_response();
        }

        match field.bytes().await {
            Ok(data) => {
                tracing::debug!(filename = %filename, bytes = data.len(), "Audio upload received");
                break data;
            }
            Err(e) => {
                tracing::error!(error = %e, filename = %filename, "Failed to read uploaded file");
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ErrorResponse {
                        error: "fail to read uploaded file".to_string(),
                    }),
                )
                    .into_response();
            }
        }
    };

    match state.summary_service.create_from_audio(data.to_vec()).await {
        Ok(summary) => (
            StatusCode::CREATED,
            Json(SummarySimpleResponse::from(&summary)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create summary");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal server error".to_string(),
                }),
            )
                .into_response()
        }
    }
}
