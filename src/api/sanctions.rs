//! Sanction follow-up endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    lifecycle::Sanction,
    models::Envelope,
    services::sanctions::{BulkResolution, ResolveSanctionsRequest},
    AppState,
};

use super::SessionToken;

/// Open sanctions, most urgent first
#[utoipa::path(
    get,
    path = "/sanctions",
    tag = "sanctions",
    responses(
        (status = 200, description = "Overdue borrows and rejected returns (envelope `data`)", body = Vec<Sanction>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_sanctions(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> AppResult<Json<Envelope<Vec<Sanction>>>> {
    let sanctions = state.services.sanctions.list(&token).await?;
    Ok(Json(Envelope::ok(sanctions)))
}

/// Mark a sanction as handled so it leaves the view
#[utoipa::path(
    post,
    path = "/sanctions/{id}/resolve",
    tag = "sanctions",
    params(("id" = String, Path, description = "Transaction ID of the sanction")),
    responses(
        (status = 200, description = "Sanction resolved (envelope `data`)", body = Sanction),
        (status = 404, description = "No open sanction for this transaction", body = crate::error::ErrorResponse)
    )
)]
pub async fn resolve_sanction(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Sanction>>> {
    let sanction = state.services.sanctions.resolve(&token, &id).await?;
    Ok(Json(Envelope::ok(sanction).with_message("Sanction resolved")))
}

/// Resolve several sanctions at once; ids without an open sanction are reported back
#[utoipa::path(
    post,
    path = "/sanctions/resolve",
    tag = "sanctions",
    request_body = ResolveSanctionsRequest,
    responses(
        (status = 200, description = "Resolved sanctions and unmatched ids (envelope `data`)", body = BulkResolution),
        (status = 400, description = "No ids given", body = crate::error::ErrorResponse)
    )
)]
pub async fn resolve_sanctions(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    WithRejection(Json(request), _): WithRejection<Json<ResolveSanctionsRequest>, AppError>,
) -> AppResult<Json<Envelope<BulkResolution>>> {
    let outcome = state
        .services
        .sanctions
        .resolve_many(&token, &request.ids)
        .await?;
    let message = format!("{} sanction(s) resolved", outcome.resolved.len());
    Ok(Json(Envelope::ok(outcome).with_message(message)))
}
