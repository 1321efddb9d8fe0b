use axum::{extract::State, Json};
use tracing::debug;

use crate::admin::aggregation::{build_overview, AdminOverview};
use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/admin/overview
///
/// Reads every stored interview on each call; there is no caching.
pub async fn handle_overview(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
) -> Result<Json<AdminOverview>, AppError> {
    let records = state.records.list_interview_records().await?;
    debug!(
        "Admin {} loaded {} interview records",
        user.account.id,
        records.len()
    );
    Ok(Json(build_overview(&records)))
}
