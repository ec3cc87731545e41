use async_trait::async_trait;

use crate::domain::{Summary, SummaryId, SummaryStatus, SummaryTexts};

use super::RepositoryError;

/// Store for summary records, keyed by the external id assigned at creation.
///
/// `update_*` operations report `RepositoryError::NotFound` when no record
/// matches; any other failure is surfaced to the caller, never swallowed.
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Creates a record with a fresh id and timestamps, deriving the stored
    /// progress from `status`.
    async fn create(&self, status: SummaryStatus) -> Result<Summary, RepositoryError>;

    /// Persists the transcription checkpoint (`Transcribed` or
    /// `TranscribedFailed`).
    async fn update_transcribed(
        &self,
        id: SummaryId,
        status: SummaryStatus,
    ) -> Result<(), RepositoryError>;

    /// Persists the final checkpoint. `texts` is `Some` only for
    /// `Summarized`; on failure all text fields stay absent.
    async fn update_summarized(
        &self,
        id: SummaryId,
        status: SummaryStatus,
        texts: Option<&SummaryTexts>,
    ) -> Result<(), RepositoryError>;

    /// All records, most recently updated first.
    async fn list(&self) -> Result<Vec<Summary>, RepositoryError>;

    async fn get_by_id(&self, id: SummaryId) -> Result<Summary, RepositoryError>;

    async fn delete(&self, id: SummaryId) -> Result<(), RepositoryError>;
}
