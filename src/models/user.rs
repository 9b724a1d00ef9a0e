//! Authentication payloads exchanged with the backend

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request; absent fields decode as empty and fail validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// Student identification number
    #[validate(length(min = 1, message = "NIM and password are required"))]
    pub nim: String,
    #[validate(length(min = 1, message = "NIM and password are required"))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "All fields are required"),
        email(message = "Email address is invalid")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub nim: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
}

/// Credentials issued by the backend at login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
