//! API handlers for ShareIt REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, AppState};

/// Name of the header carrying the caller's user id.
///
/// The system trusts this header; there is no further authentication.
pub const SHARER_USER_HEADER: &str = "X-Sharer-User-Id";

/// Extractor for the calling user's id from the `X-Sharer-User-Id` header
pub struct SharerUserId(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for SharerUserId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::BadRequest(format!("Missing {} header", SHARER_USER_HEADER))
            })?;

        let user_id = value.parse::<i64>().map_err(|_| {
            AppError::BadRequest(format!("Invalid {} header", SHARER_USER_HEADER))
        })?;

        Ok(SharerUserId(user_id))
    }
}

/// Pagination bounds shared by the list endpoints: `from` is a row offset
/// and must be non-negative, `size` a positive page size.
pub fn check_page_bounds(from: i64, size: i64) -> Result<(), AppError> {
    if from < 0 {
        return Err(AppError::BadRequest("from must be >= 0".to_string()));
    }
    if size <= 0 {
        return Err(AppError::BadRequest("size must be > 0".to_string()));
    }
    Ok(())
}
