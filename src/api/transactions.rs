//! Borrow and return endpoints, and the operator's status list

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::{Multipart, WithRejection};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    lifecycle::{ListView, StatusFilter, TransactionRow},
    models::{
        return_request::ReturnRequestForm, transaction::parse_flexible_date, Attachment, Decision,
        Envelope, Leg, ReturnRequest, Transaction,
    },
    services::transactions::DecisionOutcome,
    AppState,
};

use super::{PageQuery, SessionToken};

/// Operator decision on a pending request
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// `approved` or `rejected`
    pub status: Option<String>,
}

impl StatusUpdateRequest {
    fn decision(&self) -> AppResult<Decision> {
        self.status
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(AppError::Validation)
    }
}

/// Status list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusViewQuery {
    /// Search in requester name, email, NIM, item id and item name
    pub q: Option<String>,
    /// One status (e.g. `borrow-pending`) or `all`
    pub status: Option<String>,
    /// Include rejected and completed requests (default: false)
    pub show_completed: Option<bool>,
}

impl TryFrom<StatusViewQuery> for ListView {
    type Error = AppError;

    fn try_from(query: StatusViewQuery) -> Result<Self, Self::Error> {
        let status = match query.status.as_deref() {
            Some(raw) => raw.parse::<StatusFilter>().map_err(AppError::Validation)?,
            None => StatusFilter::All,
        };
        Ok(ListView {
            search: query.q.unwrap_or_default(),
            status,
            show_completed: query.show_completed.unwrap_or(false),
        })
    }
}

/// Fields of a return request form
#[derive(Debug, Default)]
struct ReturnForm {
    item_id: Option<String>,
    borrow_date: Option<String>,
    return_date: Option<String>,
    damaged_item: Option<Attachment>,
}

async fn read_return_form(mut multipart: Multipart) -> AppResult<ReturnForm> {
    let mut form = ReturnForm::default();
    let bad_form = |e: axum_extra::extract::multipart::MultipartError| {
        AppError::BadRequest(format!("Invalid form data: {}", e))
    };

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "itemId" => form.item_id = Some(field.text().await.map_err(bad_form)?),
            "borrowDate" => form.borrow_date = Some(field.text().await.map_err(bad_form)?),
            "returnDate" => form.return_date = Some(field.text().await.map_err(bad_form)?),
            "damagedItem" => {
                let file_name = field.file_name().unwrap_or("damaged-item").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(bad_form)?;
                // Browsers send an empty part when no file was picked
                if !bytes.is_empty() {
                    form.damaged_item = Some(Attachment {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => tracing::debug!("Ignoring unexpected form field '{}'", other),
        }
    }

    Ok(form)
}

impl TryFrom<ReturnForm> for ReturnRequest {
    type Error = AppError;

    fn try_from(form: ReturnForm) -> Result<Self, Self::Error> {
        let required = |value: Option<String>| {
            value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
                AppError::Validation("itemId, borrowDate, and returnDate are required".to_string())
            })
        };
        let date = |field: &str, value: String| {
            parse_flexible_date(&value)
                .ok_or_else(|| AppError::Validation(format!("Invalid {}: '{}'", field, value)))
        };

        let item_id = required(form.item_id)?;
        let borrow_date = date("borrowDate", required(form.borrow_date)?)?;
        let return_date = date("returnDate", required(form.return_date)?)?;

        Ok(ReturnRequest {
            item_id,
            borrow_date,
            return_date,
            damaged_item: form.damaged_item,
        })
    }
}

async fn list_leg(
    state: &AppState,
    token: &str,
    leg: Leg,
    query: PageQuery,
) -> AppResult<Json<Envelope<Vec<Transaction>>>> {
    let transactions = state
        .services
        .transactions
        .list_leg(token, leg, query.page, query.limit)
        .await?;
    Ok(Json(Envelope::ok(transactions)))
}

async fn update_status(
    state: &AppState,
    token: &str,
    leg: Leg,
    id: &str,
    request: StatusUpdateRequest,
) -> AppResult<Json<Envelope<DecisionOutcome>>> {
    let decision = request.decision()?;
    let (outcome, message) = state
        .services
        .transactions
        .decide(token, leg, id, decision)
        .await?;

    let message = message.unwrap_or_else(|| {
        let verb = match decision {
            Decision::Approved => "approved",
            Decision::Rejected => "rejected",
        };
        format!("{} request {}", leg, verb)
    });
    Ok(Json(Envelope::ok(outcome).with_message(message)))
}

/// List borrow requests
#[utoipa::path(
    get,
    path = "/borrow",
    tag = "transactions",
    params(PageQuery),
    responses(
        (status = 200, description = "Borrow requests (envelope `data`)", body = Vec<Transaction>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_borrows(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Envelope<Vec<Transaction>>>> {
    list_leg(&state, &token, Leg::Borrow, query).await
}

/// List return requests
#[utoipa::path(
    get,
    path = "/return",
    tag = "transactions",
    params(PageQuery),
    responses(
        (status = 200, description = "Return requests (envelope `data`)", body = Vec<Transaction>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_returns(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Envelope<Vec<Transaction>>>> {
    list_leg(&state, &token, Leg::Return, query).await
}

/// Approve or reject a borrow request
#[utoipa::path(
    post,
    path = "/borrow/{id}/status",
    tag = "transactions",
    params(("id" = String, Path, description = "Borrow request ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Decision applied (envelope `data`)", body = DecisionOutcome),
        (status = 400, description = "Status is not approved/rejected", body = crate::error::ErrorResponse),
        (status = 404, description = "Borrow request not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Request is no longer pending", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_borrow_status(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<StatusUpdateRequest>, AppError>,
) -> AppResult<Json<Envelope<DecisionOutcome>>> {
    update_status(&state, &token, Leg::Borrow, &id, request).await
}

/// Approve or reject a return request
#[utoipa::path(
    post,
    path = "/return/{id}/status",
    tag = "transactions",
    params(("id" = String, Path, description = "Return request ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Decision applied (envelope `data`)", body = DecisionOutcome),
        (status = 400, description = "Status is not approved/rejected", body = crate::error::ErrorResponse),
        (status = 404, description = "Return request not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Request is no longer pending", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_return_status(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<StatusUpdateRequest>, AppError>,
) -> AppResult<Json<Envelope<DecisionOutcome>>> {
    update_status(&state, &token, Leg::Return, &id, request).await
}

/// Submit a return request
#[utoipa::path(
    post,
    path = "/return",
    tag = "transactions",
    request_body(content = ReturnRequestForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Return request created (envelope `data`)", body = Transaction),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_return(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Envelope<Transaction>>)> {
    let request = ReturnRequest::try_from(read_return_form(multipart).await?)?;
    let (created, message) = state
        .services
        .transactions
        .submit_return(&token, &request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope {
            success: true,
            message: Some(message.unwrap_or_else(|| "Return request created".to_string())),
            data: created,
        }),
    ))
}

/// Open the return leg of an approved borrow, with an optional damage report
#[utoipa::path(
    post,
    path = "/borrow/{id}/return",
    tag = "transactions",
    params(("id" = String, Path, description = "Approved borrow request ID")),
    request_body(content = ReturnRequestForm, content_type = "multipart/form-data", description = "Only `damagedItem` is read"),
    responses(
        (status = 201, description = "Return request created (envelope `data`)", body = Transaction),
        (status = 404, description = "Borrow request not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Borrow is not approved", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_borrow(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Envelope<Transaction>>)> {
    let form = read_return_form(multipart).await?;
    let (created, message) = state
        .services
        .transactions
        .return_borrow(&token, &id, form.damaged_item)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope {
            success: true,
            message: Some(message.unwrap_or_else(|| "Return request created".to_string())),
            data: created,
        }),
    ))
}

/// Operator status list over both legs
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    params(StatusViewQuery),
    responses(
        (status = 200, description = "Filtered and sorted rows (envelope `data`)", body = Vec<TransactionRow>),
        (status = 400, description = "Unknown status filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn status_view(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Query(query): Query<StatusViewQuery>,
) -> AppResult<Json<Envelope<Vec<TransactionRow>>>> {
    let view = ListView::try_from(query)?;
    let rows = state.services.transactions.status_view(&token, &view).await?;
    Ok(Json(Envelope::ok(rows)))
}
