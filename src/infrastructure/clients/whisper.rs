use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{AudioTranscriber, TranscriptionError};

/// OpenAI Whisper transcription client.
pub struct WhisperClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl WhisperClient {
    pub fn new(base_url: String, api_key: String, model: String, timeout_ms: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[async_trait]
impl AudioTranscriber for WhisperClient {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError> {
        let url = format!("{}/v1/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name("audio.mp3")
            .mime_str("audio/mpeg")
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .part("file", file_part);

        tracing::debug!(model = %self.model, bytes = audio_data.len(), "Sending audio to Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        let text = transcription.text.trim().to_string();
        if text.is_empty() {
            return Err(TranscriptionError::EmptyResponse);
        }

        tracing::info!(chars = text.len(), "Whisper transcription completed");

        Ok(text)
    }
}
