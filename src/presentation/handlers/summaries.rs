use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::services::SummaryServiceError;
use crate::domain::SummaryId;
use crate::presentation::handlers::models::{
    ErrorResponse, MessageResponse, SummaryDetailedResponse, SummaryListResponse,
    SummarySimpleResponse,
};
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn list_summaries_handler(State(state): State<AppState>) -> Response {
    match state.summary_service.list().await {
        Ok(summaries) => {
            let data = summaries.iter().map(SummarySimpleResponse::from).collect();
            (StatusCode::OK, Json(SummaryListResponse { data })).into_response()
        }
        Err(_) => internal_error(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_summary_handler(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Response {
    let external_id = match parse_external_id(&external_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.summary_service.get_by_external_id(external_id).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(SummaryDetailedResponse::from(&summary)),
        )
            .into_response(),
        Err(SummaryServiceError::NotFound) => not_found(external_id),
        Err(_) => internal_error(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_summary_handler(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Response {
    let external_id = match parse_external_id(&external_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state
        .summary_service
        .delete_by_external_id(external_id)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "summary has been removed".to_string(),
            }),
        )
            .into_response(),
        Err(SummaryServiceError::NotFound) => not_found(external_id),
        Err(_) => internal_error(),
    }
}

fn parse_external_id(raw: &str) -> Result<SummaryId, Response> {
    match Uuid::parse_str(raw) {
        Ok(uuid) => Ok(SummaryId::from_uuid(uuid)),
        Err(_) => {
            tracing::warn!(external_id = %raw, "Malformed external id");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("invalid external id: {}", raw),
                }),
            )
                .into_response())
        }
    }
}

fn not_found(external_id: SummaryId) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("summary not found: {}", external_id),
        }),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal server error".to_string(),
        }),
    )
        .into_response()
}
