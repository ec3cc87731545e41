use async_trait::async_trait;

use crate::domain::ResumeOutput;

/// Text summarization capability backing the pipeline's fan-out stage.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Condenses a transcription into title, description and two resumes of
    /// increasing length.
    async fn resume(&self, transcription: &str) -> Result<ResumeOutput, SummarizeError>;

    /// Rewrites the raw transcription as organized, readable full text.
    async fn full_text_organize(&self, transcription: &str) -> Result<String, SummarizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("empty response")]
    EmptyResponse,
}
