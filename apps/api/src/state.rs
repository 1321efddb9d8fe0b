use std::sync::Arc;

use crate::config::Config;
use crate::interview::service::InterviewService;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Accounts, credentials and completed interview records.
    pub records: Arc<dyn RecordStore>,
    /// Candidate interview flow; owns the session store and completion gateway.
    pub interviews: InterviewService,
    pub config: Arc<Config>,
}
