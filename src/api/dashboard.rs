//! Dashboard home page

use axum::{extract::State, Json};

use crate::{error::AppResult, lifecycle::DashboardSummary, models::Envelope, AppState};

use super::SessionToken;

/// Counters for the dashboard home page
#[utoipa::path(
    get,
    path = "/dashboard/summary",
    tag = "dashboard",
    responses(
        (status = 200, description = "Summary counters (envelope `data`)", body = DashboardSummary),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn summary(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> AppResult<Json<Envelope<DashboardSummary>>> {
    let summary = state.services.sanctions.summary(&token).await?;
    Ok(Json(Envelope::ok(summary)))
}
