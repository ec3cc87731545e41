use async_trait::async_trait;

#[async_trait]
pub trait AudioTranscriber: Send + Sync {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("empty transcript")]
    EmptyResponse,
}
