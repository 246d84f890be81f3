//! Item catalog endpoints, including comments

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::comment::{CommentDetails, CreateComment},
    models::item::{CreateItem, Item, ItemDetails, UpdateItem},
};

use super::{check_page_bounds, SharerUserId};

/// Pagination parameters for item listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct ItemListQuery {
    /// Row offset into the result set
    pub from: Option<i64>,
    /// Maximum number of rows to return
    pub size: Option<i64>,
}

impl ItemListQuery {
    fn unpack(self) -> AppResult<(i64, i64)> {
        let from = self.from.unwrap_or(0);
        let size = self.size.unwrap_or(10);
        check_page_bounds(from, size)?;
        Ok((from, size))
    }
}

/// Search parameters for the renter-facing item search
#[derive(Debug, Deserialize, IntoParams)]
pub struct ItemSearchQuery {
    pub text: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid item fields"),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(request): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let item = state.services.items.create(user_id, request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an item (owner only)
#[utoipa::path(
    patch,
    path = "/items/{item_id}",
    tag = "items",
    request_body = UpdateItem,
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 404, description = "Item not found or caller is not the owner")
    )
)]
pub async fn update(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i64>,
    Json(request): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    let item = state.services.items.update(user_id, item_id, request).await?;
    Ok(Json(item))
}

/// Get an item by ID; the owner additionally sees adjacent bookings
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    tag = "items",
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "The item", body = ItemDetails),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_by_id(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i64>,
) -> AppResult<Json<ItemDetails>> {
    let item = state.services.items.get_by_id(item_id, user_id).await?;
    Ok(Json(item))
}

/// List the caller's items
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID"),
        ItemListQuery
    ),
    responses(
        (status = 200, description = "The caller's items", body = Vec<ItemDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_by_owner(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<ItemListQuery>,
) -> AppResult<Json<Vec<ItemDetails>>> {
    let (from, size) = query.unpack()?;
    let items = state.services.items.list_by_owner(user_id, from, size).await?;
    Ok(Json(items))
}

/// Search available items by text
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(ItemSearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>)
    )
)]
pub async fn search(
    State(state): State<crate::AppState>,
    Query(query): Query<ItemSearchQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let from = query.from.unwrap_or(0);
    let size = query.size.unwrap_or(10);
    check_page_bounds(from, size)?;
    let items = state.services.items.search(&query.text, from, size).await?;
    Ok(Json(items))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{item_id}",
    tag = "items",
    params(
        ("item_id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted")
    )
)]
pub async fn delete_by_id(
    State(state): State<crate::AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.items.delete_by_id(item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Leave a review on an item after a completed booking
#[utoipa::path(
    post,
    path = "/items/{item_id}/comment",
    tag = "items",
    request_body = CreateComment,
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Comment saved", body = CommentDetails),
        (status = 400, description = "No completed booking for this user and item"),
        (status = 404, description = "Item or user not found")
    )
)]
pub async fn save_comment(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i64>,
    Json(request): Json<CreateComment>,
) -> AppResult<Json<CommentDetails>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let comment = state
        .services
        .items
        .save_comment(user_id, item_id, request)
        .await?;
    Ok(Json(comment))
}
