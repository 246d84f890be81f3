//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::booking::{BookingDetails, CreateBooking},
};

use super::{check_page_bounds, SharerUserId};

/// Query parameters for the booking list endpoints
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingListQuery {
    /// State filter: ALL, CURRENT, PAST, FUTURE, WAITING or REJECTED
    pub state: Option<String>,
    /// Row offset into the result set
    pub from: Option<i64>,
    /// Maximum number of rows to return
    pub size: Option<i64>,
}

impl BookingListQuery {
    fn unpack(self) -> AppResult<(String, i64, i64)> {
        let state = self.state.unwrap_or_else(|| "ALL".to_string());
        let from = self.from.unwrap_or(0);
        let size = self.size.unwrap_or(10);
        check_page_bounds(from, size)?;
        Ok((state, from, size))
    }
}

/// Query parameter for the status decision
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApprovedQuery {
    pub approved: bool,
}

/// Create a new booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 201, description = "Booking created", body = BookingDetails),
        (status = 400, description = "Item unavailable or invalid period"),
        (status = 404, description = "Item or user not found, or item booked by its owner")
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state.services.bookings.create(user_id, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve or reject a waiting booking
#[utoipa::path(
    patch,
    path = "/bookings/{booking_id}",
    tag = "bookings",
    params(
        ("booking_id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID"),
        ApprovedQuery
    ),
    responses(
        (status = 200, description = "Status changed", body = BookingDetails),
        (status = 400, description = "Booking already decided"),
        (status = 404, description = "Booking not found or caller is not the owner")
    )
)]
pub async fn change_status(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<i64>,
    Query(query): Query<ApprovedQuery>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state
        .services
        .bookings
        .change_status(user_id, booking_id, query.approved)
        .await?;
    Ok(Json(booking))
}

/// Get a booking by ID (participants only)
#[utoipa::path(
    get,
    path = "/bookings/{booking_id}",
    tag = "bookings",
    params(
        ("booking_id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "The booking", body = BookingDetails),
        (status = 404, description = "Booking not found or caller is not a participant")
    )
)]
pub async fn get_by_id(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<i64>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get_by_id(user_id, booking_id).await?;
    Ok(Json(booking))
}

/// List the caller's bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings, newest start first", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state filter or invalid pagination"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_for_booker(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let (filter, from, size) = query.unpack()?;
    let bookings = state
        .services
        .bookings
        .list_for_booker(user_id, &filter, from, size)
        .await?;
    Ok(Json(bookings))
}

/// List bookings of the caller's items
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings, newest start first", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state filter or invalid pagination"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_for_owner(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let (filter, from, size) = query.unpack()?;
    let bookings = state
        .services
        .bookings
        .list_for_owner(user_id, &filter, from, size)
        .await?;
    Ok(Json(bookings))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/bookings/{booking_id}",
    tag = "bookings",
    params(
        ("booking_id" = i64, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Booking deleted")
    )
)]
pub async fn delete_by_id(
    State(state): State<crate::AppState>,
    Path(booking_id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete_by_id(booking_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
