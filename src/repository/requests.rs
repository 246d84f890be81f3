//! Item requests repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::request::ItemRequest,
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item request by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<ItemRequest> {
        sqlx::query_as::<_, ItemRequest>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item request with id {} not found", id)))
    }

    /// Insert a new item request
    pub async fn create(
        &self,
        requester_id: i64,
        description: &str,
        created: DateTime<Utc>,
    ) -> AppResult<ItemRequest> {
        let request = sqlx::query_as::<_, ItemRequest>(
            r#"
            INSERT INTO requests (description, requester_id, created)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(description)
        .bind(requester_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    /// A user's own requests, newest first
    pub async fn list_by_requester(&self, requester_id: i64) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            r#"
            SELECT * FROM requests
            WHERE requester_id = $1
            ORDER BY created DESC
            "#,
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Requests created by other users, newest first, with pagination
    pub async fn list_by_others(
        &self,
        requester_id: i64,
        size: i64,
        from: i64,
    ) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            r#"
            SELECT * FROM requests
            WHERE requester_id != $1
            ORDER BY created DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(requester_id)
        .bind(size)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Delete an item request
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
