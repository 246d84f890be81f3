//! Item request (wish-list) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::item::Item;

/// Item request record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requester_id: i64,
    pub created: DateTime<Utc>,
}

/// Item request with the items offered in response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemRequestDetails {
    pub id: i64,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<Item>,
}

impl ItemRequestDetails {
    pub fn new(request: ItemRequest, items: Vec<Item>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items,
        }
    }
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, message = "description must not be blank"))]
    pub description: String,
}
