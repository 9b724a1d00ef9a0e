//! Inventory item endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{Envelope, Item, ItemPayload, ItemQuery},
    AppState,
};

use super::SessionToken;

/// List items with optional search
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(ItemQuery),
    responses(
        (status = 200, description = "Items (envelope `data`)", body = Vec<Item>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<Envelope<Vec<Item>>>> {
    let items = state.services.items.list(&token, &query).await?;
    Ok(Json(Envelope::ok(items)))
}

/// Get item details by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item (envelope `data`)", body = Item),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Item>>> {
    let item = state.services.items.get(&token, &id).await?;
    Ok(Json(Envelope::ok(item)))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = ItemPayload,
    responses(
        (status = 201, description = "Item created (envelope `data`)", body = Item),
        (status = 400, description = "Name or quantity missing or invalid", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    WithRejection(Json(item), _): WithRejection<Json<ItemPayload>, AppError>,
) -> AppResult<(StatusCode, Json<Envelope<Item>>)> {
    let created = state.services.items.create(&token, &item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an item's name and quantity
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Item updated (envelope `data`)", body = Item),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(id): Path<String>,
    WithRejection(Json(item), _): WithRejection<Json<ItemPayload>, AppError>,
) -> AppResult<Json<Envelope<Item>>> {
    let updated = state.services.items.update(&token, &id, &item).await?;
    Ok(Json(updated))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Value>>> {
    let deleted = state.services.items.delete(&token, &id).await?;
    Ok(Json(deleted))
}
