mod summary_service;

pub use summary_service::{SummaryService, SummaryServiceError};
