use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{SummarizeError, Summarizer};
use crate::domain::ResumeOutput;

const RESUME_FUNCTION_NAME: &str = "register_resume";

const RESUME_SYSTEM_PROMPT: &str = "You summarize audio transcriptions. Given a raw \
     transcription, produce a short title, a one-sentence description, a brief resume of at \
     most three sentences and a medium resume of one or two paragraphs, all in the language \
     of the transcription.";

const FULL_TEXT_SYSTEM_PROMPT: &str = "You reorganize raw audio transcriptions into clean, \
     readable text. Fix punctuation, split into paragraphs and remove filler words without \
     changing the meaning or dropping content. Answer with the reorganized text only.";

/// ChatGPT summarization client. The structured resume is obtained through a
/// forced function call so the four fields come back as JSON arguments; the
/// full-text reorganization is a plain completion.
pub struct ChatGptClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    arguments: String,
}

impl ChatGptClient {
    pub fn new(base_url: String, api_key: String, model: String, timeout_ms: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    async fn chat_completion(
        &self,
        body: serde_json::Value,
    ) -> Result<ChatCompletionResponse, SummarizeError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| SummarizeError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SummarizeError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SummarizeError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl Summarizer for ChatGptClient {
    async fn resume(&self, transcription: &str) -> Result<ResumeOutput, SummarizeError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": RESUME_SYSTEM_PROMPT},
                {"role": "user", "content": transcription},
            ],
            "tools": [{
                "type": "function",
                "function": {
                    "name": RESUME_FUNCTION_NAME,
                    "description": "Registers the structured resume of a transcription.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string", "description": "Short title for the content"},
                            "description": {"type": "string", "description": "One-sentence description"},
                            "brief_resume": {"type": "string", "description": "Resume of at most three sentences"},
                            "medium_resume": {"type": "string", "description": "Resume of one or two paragraphs"},
                        },
                        "required": ["title", "description", "brief_resume", "medium_resume"],
                    },
                },
            }],
            "tool_choice": {"type": "function", "function": {"name": RESUME_FUNCTION_NAME}},
        });

        tracing::debug!(model = %self.model, "Requesting resume summarization");

        let completion = self.chat_completion(body).await?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(SummarizeError::EmptyResponse)?;

        let call = choice
            .message
            .tool_calls
            .into_iter()
            .next()
            .ok_or_else(|| SummarizeError::InvalidResponse("missing tool call".to_string()))?;

        let resume: ResumeOutput = serde_json::from_str(&call.function.arguments)
            .map_err(|e| SummarizeError::InvalidResponse(format!("arguments: {}", e)))?;

        tracing::info!("Resume summarization completed");

        Ok(resume)
    }

    async fn full_text_organize(&self, transcription: &str) -> Result<String, SummarizeError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": FULL_TEXT_SYSTEM_PROMPT},
                {"role": "user", "content": transcription},
            ],
        });

        tracing::debug!(model = %self.model, "Requesting full text reorganization");

        let completion = self.chat_completion(body).await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(SummarizeError::EmptyResponse);
        }

        tracing::info!(chars = content.len(), "Full text reorganization completed");

        Ok(content)
    }
}
