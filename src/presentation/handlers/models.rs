use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Summary;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySimpleResponse {
    pub external_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub progress: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Summary> for SummarySimpleResponse {
    fn from(summary: &Summary) -> Self {
        Self {
            external_id: summary.external_id.to_string(),
            status: summary.status.as_str().to_string(),
            created_at: summary.created_at,
            updated_at: summary.updated_at,
            progress: summary.status.progress(),
            title: summary.texts.as_ref().map(|t| t.title.clone()),
            description: summary.texts.as_ref().map(|t| t.description.clone()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetailedResponse {
    pub external_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub progress: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief_resume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_resume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

impl From<&Summary> for SummaryDetailedResponse {
    fn from(summary: &Summary) -> Self {
        let texts = summary.texts.as_ref();
        Self {
            external_id: summary.external_id.to_string(),
            status: summary.status.as_str().to_string(),
            created_at: summary.created_at,
            updated_at: summary.updated_at,
            progress: summary.status.progress(),
            title: texts.map(|t| t.title.clone()),
            description: texts.map(|t| t.description.clone()),
            brief_resume: texts.map(|t| t.brief_resume.clone()),
            medium_resume: texts.map(|t| t.medium_resume.clone()),
            full_text: texts.map(|t| t.full_text.clone()),
        }
    }
}

#[derive(Serialize)]
pub struct SummaryListResponse {
    pub data: Vec<SummarySimpleResponse>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
