use std::sync::Arc;

use tracing::Instrument;

use crate::application::ports::{
    AudioTranscriber, RepositoryError, SummarizeError, Summarizer, SummaryRepository,
};
use crate::domain::{ResumeOutput, Summary, SummaryId, SummaryStatus, SummaryTexts};

/// Drives uploaded audio through the summarization pipeline and serves the
/// read/delete operations on summary records.
///
/// The pipeline for one record runs as a single detached task: transcription
/// first, then the two summarization calls concurrently. Each record is owned
/// by exactly one task, so no locking is needed around the checkpoints.
#[derive(Clone)]
pub struct SummaryService {
    transcriber: Arc<dyn AudioTranscriber>,
    summarizer: Arc<dyn Summarizer>,
    repository: Arc<dyn SummaryRepository>,
}

impl SummaryService {
    pub fn new(
        transcriber: Arc<dyn AudioTranscriber>,
        summarizer: Arc<dyn Summarizer>,
        repository: Arc<dyn SummaryRepository>,
    ) -> Self {
        Self {
            transcriber,
            summarizer,
            repository,
        }
    }

    /// Creates the record in `Received` state, launches the pipeline in the
    /// background and returns the created snapshot without waiting.
    ///
    /// The spawned task is detached from the caller's lifetime: the HTTP
    /// request completing does not cancel it. The returned snapshot races
    /// with the pipeline by design; callers poll the read endpoint for
    /// up-to-date status.
    pub async fn create_from_audio(
        &self,
        audio: Vec<u8>,
    ) -> Result<Summary, SummaryServiceError> {
        let summary = self
            .repository
            .create(SummaryStatus::Received)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create summary record");
                SummaryServiceError::from_repository(e)
            })?;

        let external_id = summary.external_id;
        let service = self.clone();
        let span = tracing::info_span!("summary_pipeline", external_id = %external_id);
        tokio::spawn(
            async move {
                service.run_pipeline(external_id, audio).await;
            }
            .instrument(span),
        );

        Ok(summary)
    }

    /// Runs the full pipeline for one record to a terminal state.
    ///
    /// Stage 1 must complete before stage 2 starts. Stage 2 joins both
    /// summarization calls: neither is cancelled because the other failed,
    /// and on any failure the surviving result is discarded rather than
    /// persisted partially.
    pub async fn run_pipeline(&self, external_id: SummaryId, audio: Vec<u8>) {
        let transcription = match self.transcribe_stage(external_id, &audio).await {
            Some(text) => text,
            None => return,
        };

        let (resume, full_text) = tokio::join!(
            self.resume_stage(external_id, &transcription),
            self.organize_stage(external_id, &transcription),
        );

        match (resume, full_text) {
            (Ok(resume), Ok(full_text)) => {
                let texts = SummaryTexts::from_parts(resume, full_text);
                self.checkpoint_summarized(external_id, SummaryStatus::Summarized, Some(&texts))
                    .await;
                tracing::info!("Summarization completed");
            }
            _ => {
                self.checkpoint_summarized(external_id, SummaryStatus::SummarizedFailed, None)
                    .await;
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Summary>, SummaryServiceError> {
        self.repository.list().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list summaries");
            SummaryServiceError::from_repository(e)
        })
    }

    pub async fn get_by_external_id(
        &self,
        external_id: SummaryId,
    ) -> Result<Summary, SummaryServiceError> {
        self.repository.get_by_id(external_id).await.map_err(|e| {
            if !matches!(e, RepositoryError::NotFound(_)) {
                tracing::error!(error = %e, "Failed to fetch summary");
            }
            SummaryServiceError::from_repository(e)
        })
    }

    pub async fn delete_by_external_id(
        &self,
        external_id: SummaryId,
    ) -> Result<(), SummaryServiceError> {
        self.repository.delete(external_id).await.map_err(|e| {
            if !matches!(e, RepositoryError::NotFound(_)) {
                tracing::error!(error = %e, "Failed to delete summary");
            }
            SummaryServiceError::from_repository(e)
        })
    }

    async fn transcribe_stage(&self, external_id: SummaryId, audio: &[u8]) -> Option<String> {
        tracing::info!("Starting audio transcription");

        match self.transcriber.transcribe(audio).await {
            Ok(text) => {
                self.checkpoint_transcribed(external_id, SummaryStatus::Transcribed)
                    .await;
                tracing::info!(chars = text.len(), "Transcription completed");
                Some(text)
            }
            Err(e) => {
                tracing::error!(error = %e, "Transcription failed");
                self.checkpoint_transcribed(external_id, SummaryStatus::TranscribedFailed)
                    .await;
                None
            }
        }
    }

    async fn resume_stage(
        &self,
        external_id: SummaryId,
        transcription: &str,
    ) -> Result<ResumeOutput, SummarizeError> {
        tracing::debug!("Starting resume summarization");
        self.summarizer.resume(transcription).await.map_err(|e| {
            tracing::error!(error = %e, external_id = %external_id, "Resume summarization failed");
            e
        })
    }

    async fn organize_stage(
        &self,
        external_id: SummaryId,
        transcription: &str,
    ) -> Result<String, SummarizeError> {
        tracing::debug!("Starting full text reorganization");
        self.summarizer
            .full_text_organize(transcription)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, external_id = %external_id, "Full text reorganization failed");
                e
            })
    }

    // Checkpoint writes are best-effort: a failed write is logged and the
    // pipeline still terminates per the stage's own outcome. Never retried.
    async fn checkpoint_transcribed(&self, external_id: SummaryId, status: SummaryStatus) {
        tracing::debug!(status = %status, "Summary status transition");
        if let Err(e) = self
            .repository
            .update_transcribed(external_id, status)
            .await
        {
            tracing::error!(error = %e, status = %status, "Failed to persist transcription checkpoint");
        }
    }

    async fn checkpoint_summarized(
        &self,
        external_id: SummaryId,
        status: SummaryStatus,
        texts: Option<&SummaryTexts>,
    ) {
        tracing::debug!(status = %status, "Summary status transition");
        if let Err(e) = self
            .repository
            .update_summarized(external_id, status, texts)
            .await
        {
            tracing::error!(error = %e, status = %status, "Failed to persist summarization checkpoint");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryServiceError {
    #[error("summary not found")]
    NotFound,
    #[error("repository: {0}")]
    Repository(RepositoryError),
}

impl SummaryServiceError {
    fn from_repository(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(_) => SummaryServiceError::NotFound,
            other => SummaryServiceError::Repository(other),
        }
    }
}
