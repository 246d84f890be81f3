//! Item model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::booking::BookingRef;
use super::comment::CommentDetails;

/// Item record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[sqlx(rename = "is_available")]
    pub available: bool,
    pub owner_id: i64,
    /// Wish-list request this item was created in response to, if any
    pub request_id: Option<i64>,
}

/// Item with comments and, for the owner, adjacent bookings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingRef>,
    pub next_booking: Option<BookingRef>,
    pub comments: Vec<CommentDetails>,
}

impl ItemDetails {
    pub fn new(item: Item, comments: Vec<CommentDetails>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking: None,
            next_booking: None,
            comments,
        }
    }
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "name must not be blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be blank"))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// Partial item update
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}
