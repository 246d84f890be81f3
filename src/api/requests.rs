//! Item request (wish-list) endpoints

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
    models::request::{CreateItemRequest, ItemRequest, ItemRequestDetails},
};

use super::{check_page_bounds, SharerUserId};

/// Pagination parameters for listing other users' requests
#[derive(Debug, Deserialize, IntoParams)]
pub struct RequestListQuery {
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Create a new item request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateItemRequest,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 201, description = "Request created", body = ItemRequest),
        (status = 400, description = "Blank description"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(request): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ItemRequest>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let created = state.services.requests.create(user_id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get an item request with the items offered in response
#[utoipa::path(
    get,
    path = "/requests/{request_id}",
    tag = "requests",
    params(
        ("request_id" = i64, Path, description = "Request ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "The request", body = ItemRequestDetails),
        (status = 404, description = "Request or user not found")
    )
)]
pub async fn get_by_id(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(request_id): Path<i64>,
) -> AppResult<Json<ItemRequestDetails>> {
    let request = state.services.requests.get_by_id(user_id, request_id).await?;
    Ok(Json(request))
}

/// List the caller's own requests with their answers
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "The caller's requests", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_own(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.list_own(user_id).await?;
    Ok(Json(requests))
}

/// List requests created by other users
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID"),
        RequestListQuery
    ),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_others(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<RequestListQuery>,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let from = query.from.unwrap_or(0);
    let size = query.size.unwrap_or(10);
    check_page_bounds(from, size)?;
    let requests = state.services.requests.list_others(user_id, from, size).await?;
    Ok(Json(requests))
}

/// Delete an item request
#[utoipa::path(
    delete,
    path = "/requests/{request_id}",
    tag = "requests",
    params(
        ("request_id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 204, description = "Request deleted")
    )
)]
pub async fn delete_by_id(
    State(state): State<crate::AppState>,
    Path(request_id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.requests.delete_by_id(request_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
