//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, dashboard, health, items, sanctions, transactions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Dashboard API",
        version = "0.3.0",
        description = "Operator gateway for the inventory borrow/return backend. \
                       Every success body is wrapped as `{success, message, data}`."
    ),
    servers(
        (url = "/api", description = "Dashboard API")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::logout,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        // Transactions
        transactions::list_borrows,
        transactions::list_returns,
        transactions::update_borrow_status,
        transactions::update_return_status,
        transactions::create_return,
        transactions::return_borrow,
        transactions::status_view,
        // Sanctions
        sanctions::list_sanctions,
        sanctions::resolve_sanction,
        sanctions::resolve_sanctions,
        // Dashboard
        dashboard::summary,
    ),
    components(
        schemas(
            // Auth
            crate::models::LoginRequest,
            crate::models::RegisterRequest,
            crate::models::TokenPair,
            // Items
            crate::models::Item,
            crate::models::ItemPayload,
            // Transactions
            crate::models::Transaction,
            crate::models::TransactionStatus,
            crate::models::Leg,
            crate::models::Decision,
            crate::models::TransitionAction,
            crate::models::return_request::ReturnRequestForm,
            transactions::StatusUpdateRequest,
            crate::services::transactions::DecisionOutcome,
            crate::lifecycle::StatusIntent,
            crate::lifecycle::TransactionRow,
            crate::lifecycle::DueInfo,
            // Sanctions
            crate::lifecycle::Sanction,
            crate::lifecycle::SanctionReason,
            crate::services::sanctions::ResolveSanctionsRequest,
            crate::services::sanctions::BulkResolution,
            // Dashboard
            crate::lifecycle::DashboardSummary,
            crate::lifecycle::summary::StatusCount,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "auth", description = "Session login, registration and logout"),
        (name = "items", description = "Inventory item management"),
        (name = "transactions", description = "Borrow and return requests"),
        (name = "sanctions", description = "Overdue and rejected-return follow-up"),
        (name = "dashboard", description = "Home page counters")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
