use std::sync::Arc;

use crate::application::services::SummaryService;

#[derive(Clone)]
pub struct AppState {
    pub summary_service: Arc<SummaryService>,
}
