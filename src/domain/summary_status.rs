use std::fmt;
use std::str::FromStr;

/// Lifecycle of a summary record. A record starts at `Received` and is moved
/// by the pipeline to exactly one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryStatus {
    Received,
    Transcribed,
    TranscribedFailed,
    Summarized,
    SummarizedFailed,
}

impl SummaryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStatus::Received => "RECEIVED_FILE",
            SummaryStatus::Transcribed => "TRANSCRIBED",
            SummaryStatus::TranscribedFailed => "TRANSCRIBED_FAILED",
            SummaryStatus::Summarized => "SUMMARIZED",
            SummaryStatus::SummarizedFailed => "SUMMARIZED_FAILED",
        }
    }

    /// Completion percentage shown to clients. Fully determined by the
    /// status; there is no independently settable progress value.
    pub fn progress(&self) -> i32 {
        match self {
            SummaryStatus::Received => 33,
            SummaryStatus::TranscribedFailed => 33,
            SummaryStatus::Transcribed => 66,
            SummaryStatus::SummarizedFailed => 66,
            SummaryStatus::Summarized => 100,
        }
    }

    /// Terminal states receive no further pipeline writes.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SummaryStatus::TranscribedFailed
                | SummaryStatus::Summarized
                | SummaryStatus::SummarizedFailed
        )
    }

    pub fn can_transition_to(&self, next: SummaryStatus) -> bool {
        matches!(
            (self, next),
            (
                SummaryStatus::Received,
                SummaryStatus::Transcribed | SummaryStatus::TranscribedFailed
            ) | (
                SummaryStatus::Transcribed,
                SummaryStatus::Summarized | SummaryStatus::SummarizedFailed
            )
        )
    }
}

impl FromStr for SummaryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECEIVED_FILE" => Ok(SummaryStatus::Received),
            "TRANSCRIBED" => Ok(SummaryStatus::Transcribed),
            "TRANSCRIBED_FAILED" => Ok(SummaryStatus::TranscribedFailed),
            "SUMMARIZED" => Ok(SummaryStatus::Summarized),
            "SUMMARIZED_FAILED" => Ok(SummaryStatus::SummarizedFailed),
            _ => Err(format!("Invalid summary status: {}", s)),
        }
    }
}

impl fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
