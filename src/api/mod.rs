//! API handlers for the dashboard gateway

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod items;
pub mod openapi;
pub mod sanctions;
pub mod transactions;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::IntoParams;

use crate::{error::AppError, AppState};

/// Backend access token of the current session.
///
/// Read from the session cookie set at login, or from an `Authorization: Bearer`
/// header for non-browser clients.
pub struct SessionToken(pub String);

#[async_trait]
impl FromRequestParts<AppState> for SessionToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get(&state.config.session.access_cookie) {
            if !cookie.value().is_empty() {
                return Ok(SessionToken(cookie.value().to_string()));
            }
        }

        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| SessionToken(token.to_string()))
            .ok_or_else(|| AppError::Authentication("Authentication token not found".to_string()))
    }
}

/// Pagination forwarded to the backend
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (default: 1)
    pub page: Option<u32>,
    /// Page size (default: configured backend limit)
    pub limit: Option<u32>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", post(auth::logout))
        // Items
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        // Borrow leg
        .route("/borrow", get(transactions::list_borrows))
        .route("/borrow/:id/status", post(transactions::update_borrow_status))
        .route("/borrow/:id/return", post(transactions::return_borrow))
        // Return leg
        .route(
            "/return",
            get(transactions::list_returns).post(transactions::create_return),
        )
        .route("/return/:id/status", post(transactions::update_return_status))
        // Operator views
        .route("/transactions", get(transactions::status_view))
        .route("/sanctions", get(sanctions::list_sanctions))
        .route("/sanctions/resolve", post(sanctions::resolve_sanctions))
        .route("/sanctions/:id/resolve", post(sanctions::resolve_sanction))
        .route("/dashboard/summary", get(dashboard::summary))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}
