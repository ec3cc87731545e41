mod health;
mod models;
mod summaries;
mod upload;

pub use health::health_handler;
pub use models::{
    ErrorResponse, MessageResponse, SummaryDetailedResponse, SummaryListResponse,
    SummarySimpleResponse,
};
pub use summaries::{delete_summary_handler, get_summary_handler, list_summaries_handler};
pub use upload::upload_handler;
