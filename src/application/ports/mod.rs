mod audio_transcriber;
mod repository_error;
mod summarizer;
mod summary_repository;

pub use audio_transcriber::{AudioTranscriber, TranscriptionError};
pub use repository_error::RepositoryError;
pub use summarizer::{SummarizeError, Summarizer};
pub use summary_repository::SummaryRepository;
