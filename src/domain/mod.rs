mod summary;
mod summary_id;
mod summary_status;

pub use summary::{ResumeOutput, Summary, SummaryTexts};
pub use summary_id::SummaryId;
pub use summary_status::SummaryStatus;
