//! Return request submitted for a borrowed item

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Damage report uploaded with a return request
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Request opening the return leg of a borrow
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "check_return_request"))]
pub struct ReturnRequest {
    #[validate(length(min = 1, message = "itemId, borrowDate, and returnDate are required"))]
    pub item_id: String,
    pub borrow_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub damaged_item: Option<Attachment>,
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Rules spanning several fields: blank item ids and returns dated before the borrow
fn check_return_request(request: &ReturnRequest) -> Result<(), ValidationError> {
    if request.item_id.trim().is_empty() {
        return Err(validation_error(
            "required",
            "itemId, borrowDate, and returnDate are required",
        ));
    }
    if request.return_date < request.borrow_date {
        return Err(validation_error(
            "date_order",
            "returnDate cannot be before borrowDate",
        ));
    }
    Ok(())
}

/// Multipart form accepted by `POST /return` (documentation only)
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequestForm {
    pub item_id: String,
    /// ISO 8601 date or timestamp
    pub borrow_date: String,
    /// ISO 8601 date or timestamp
    pub return_date: String,
    /// Optional photo or document of the damage
    #[schema(value_type = Option<String>, format = Binary)]
    pub damaged_item: Option<Vec<u8>>,
}
