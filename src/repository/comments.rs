//! Comments repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::comment::{Comment, CommentDetails},
};

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new comment
    pub async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: &str,
        created: DateTime<Utc>,
    ) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (text, item_id, author_id, created)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(text)
        .bind(item_id)
        .bind(author_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// All comments on an item with the author's display name, oldest first
    pub async fn list_by_item(&self, item_id: i64) -> AppResult<Vec<CommentDetails>> {
        let comments = sqlx::query_as::<_, CommentDetails>(
            r#"
            SELECT c.id, c.text, u.name AS author_name, c.created
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.item_id = $1
            ORDER BY c.created ASC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
