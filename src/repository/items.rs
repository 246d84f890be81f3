//! Items repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::item::{CreateItem, Item, UpdateItem},
};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Item> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Create a new item
    pub async fn create(&self, owner_id: i64, item: &CreateItem) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, is_available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(owner_id)
        .bind(item.request_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Apply a partial update, keeping untouched fields
    pub async fn update(&self, id: i64, update: &UpdateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                is_available = COALESCE($3, is_available)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(update.name.as_deref())
        .bind(update.description.as_deref())
        .bind(update.available)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Delete an item
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// List an owner's items with pagination
    pub async fn list_by_owner(&self, owner_id: i64, size: i64, from: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE owner_id = $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(size)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Free-text search over name and description; available items only
    pub async fn search(&self, text: &str, size: i64, from: i64) -> AppResult<Vec<Item>> {
        let pattern = format!("%{}%", text);
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE is_available = true
              AND (name ILIKE $1 OR description ILIKE $1)
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern)
        .bind(size)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Items created in response to a wish-list request
    pub async fn find_by_request_id(&self, request_id: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE request_id = $1 ORDER BY id ASC",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
