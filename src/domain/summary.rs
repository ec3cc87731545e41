use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{SummaryId, SummaryStatus};

/// One uploaded audio file tracked through the pipeline.
///
/// Progress is not stored here; it is derived from `status` via
/// [`SummaryStatus::progress`]. The text payload is all-or-nothing: it is
/// `Some` only after both summarization calls succeeded.
#[derive(Debug, Clone)]
pub struct Summary {
    pub external_id: SummaryId,
    pub status: SummaryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub texts: Option<SummaryTexts>,
}

/// Text fields produced by the final pipeline stage, persisted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTexts {
    pub title: String,
    pub description: String,
    pub brief_resume: String,
    pub medium_resume: String,
    pub full_text: String,
}

impl SummaryTexts {
    pub fn from_parts(resume: ResumeOutput, full_text: String) -> Self {
        Self {
            title: resume.title,
            description: resume.description,
            brief_resume: resume.brief_resume,
            medium_resume: resume.medium_resume,
            full_text,
        }
    }
}

/// Structured output of the resume summarization call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResumeOutput {
    pub title: String,
    pub description: String,
    pub brief_resume: String,
    pub medium_resume: String,
}
