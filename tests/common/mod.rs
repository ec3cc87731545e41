#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use audiorecap::application::ports::{
    AudioTranscriber, RepositoryError, SummarizeError, Summarizer, SummaryRepository,
    TranscriptionError,
};
use audiorecap::domain::{ResumeOutput, Summary, SummaryId, SummaryStatus, SummaryTexts};

pub fn sample_resume() -> ResumeOutput {
    ResumeOutput {
        title: "title".to_string(),
        description: "description".to_string(),
        brief_resume: "brief resume".to_string(),
        medium_resume: "medium resume".to_string(),
    }
}

/// In-memory stand-in for the Postgres repository.
pub struct InMemorySummaryRepository {
    records: Mutex<HashMap<Uuid, Summary>>,
    fixed_id: Option<Uuid>,
    fail_update_transcribed: bool,
}

impl InMemorySummaryRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fixed_id: None,
            fail_update_transcribed: false,
        }
    }

    /// Creates records under a known id so tests can assert against it.
    pub fn with_fixed_id(id: Uuid) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fixed_id: Some(id),
            fail_update_transcribed: false,
        }
    }

    /// Simulates a store failure on the transcription checkpoint write.
    pub fn failing_transcribed_checkpoint(id: Uuid) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fixed_id: Some(id),
            fail_update_transcribed: true,
        }
    }
}

#[async_trait]
impl SummaryRepository for InMemorySummaryRepository {
    async fn create(&self, status: SummaryStatus) -> Result<Summary, RepositoryError> {
        let id = self.fixed_id.unwrap_or_else(Uuid::new_v4);
        let now = Utc::now();
        let summary = Summary {
            external_id: SummaryId::from_uuid(id),
            status,
            created_at: now,
            updated_at: now,
            texts: None,
        };
        self.records.lock().await.insert(id, summary.clone());
        Ok(summary)
    }

    async fn update_transcribed(
        &self,
        id: SummaryId,
        status: SummaryStatus,
    ) -> Result<(), RepositoryError> {
        if self.fail_update_transcribed {
            return Err(RepositoryError::QueryFailed(
                "simulated write failure".to_string(),
            ));
        }

        let mut records = self.records.lock().await;
        let record = records
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        record.status = status;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn update_summarized(
        &self,
        id: SummaryId,
        status: SummaryStatus,
        texts: Option<&SummaryTexts>,
    ) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        record.status = status;
        record.updated_at = Utc::now();
        record.texts = texts.cloned();
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Summary>, RepositoryError> {
        let records = self.records.lock().await;
        let mut summaries: Vec<Summary> = records.values().cloned().collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn get_by_id(&self, id: SummaryId) -> Result<Summary, RepositoryError> {
        self.records
            .lock()
            .await
            .get(&id.as_uuid())
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: SummaryId) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .await
            .remove(&id.as_uuid())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

pub struct MockTranscriber {
    transcription: Option<String>,
    pub calls: AtomicUsize,
}

impl MockTranscriber {
    pub fn returning(text: &str) -> Self {
        Self {
            transcription: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            transcription: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioTranscriber for MockTranscriber {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.transcription {
            Some(text) => Ok(text.clone()),
            None => Err(TranscriptionError::ApiRequestFailed(
                "mock transcription failure".to_string(),
            )),
        }
    }
}

pub struct MockSummarizer {
    resume: Option<ResumeOutput>,
    full_text: Option<String>,
    pub resume_calls: AtomicUsize,
    pub organize_calls: AtomicUsize,
}

impl MockSummarizer {
    pub fn succeeding(resume: ResumeOutput, full_text: &str) -> Self {
        Self {
            resume: Some(resume),
            full_text: Some(full_text.to_string()),
            resume_calls: AtomicUsize::new(0),
            organize_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_failing_resume(full_text: &str) -> Self {
        Self {
            resume: None,
            full_text: Some(full_text.to_string()),
            resume_calls: AtomicUsize::new(0),
            organize_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_failing_organize(resume: ResumeOutput) -> Self {
        Self {
            resume: Some(resume),
            full_text: None,
            resume_calls: AtomicUsize::new(0),
            organize_calls: AtomicUsize::new(0),
        }
    }

    pub fn resume_call_count(&self) -> usize {
        self.resume_calls.load(Ordering::SeqCst)
    }

    pub fn organize_call_count(&self) -> usize {
        self.organize_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn resume(&self, _transcription: &str) -> Result<ResumeOutput, SummarizeError> {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        match &self.resume {
            Some(resume) => Ok(resume.clone()),
            None => Err(SummarizeError::ApiRequestFailed(
                "mock resume failure".to_string(),
            )),
        }
    }

    async fn full_text_organize(&self, _transcription: &str) -> Result<String, SummarizeError> {
        self.organize_calls.fetch_add(1, Ordering::SeqCst);
        match &self.full_text {
            Some(text) => Ok(text.clone()),
            None => Err(SummarizeError::ApiRequestFailed(
                "mock full text failure".to_string(),
            )),
        }
    }
}
