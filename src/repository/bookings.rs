//! Bookings repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingState, BookingStatus},
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Insert a new booking, always in WAITING status
    pub async fn create(
        &self,
        item_id: i64,
        booker_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(item_id)
        .bind(booker_id)
        .bind(BookingStatus::Waiting)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Persist a status change
    pub async fn update_status(&self, id: i64, status: BookingStatus) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Delete a booking
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// List a booker's bookings, newest start first
    pub async fn list_for_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        size: i64,
        from: i64,
    ) -> AppResult<Vec<Booking>> {
        let bookings = match state {
            BookingState::All => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT * FROM bookings
                    WHERE booker_id = $1
                    ORDER BY start_date DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(booker_id)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Past => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT * FROM bookings
                    WHERE booker_id = $1 AND end_date < $2
                    ORDER BY start_date DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id)
                .bind(now)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Future => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT * FROM bookings
                    WHERE booker_id = $1 AND start_date > $2
                    ORDER BY start_date DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id)
                .bind(now)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Current => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT * FROM bookings
                    WHERE booker_id = $1 AND $2 BETWEEN start_date AND end_date
                    ORDER BY start_date DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id)
                .bind(now)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Waiting | BookingState::Rejected => {
                let status = if state == BookingState::Waiting {
                    BookingStatus::Waiting
                } else {
                    BookingStatus::Rejected
                };
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT * FROM bookings
                    WHERE booker_id = $1 AND status = $2
                    ORDER BY start_date DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id)
                .bind(status)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(bookings)
    }

    /// List bookings of all items belonging to an owner, newest start first
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        size: i64,
        from: i64,
    ) -> AppResult<Vec<Booking>> {
        let bookings = match state {
            BookingState::All => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT b.* FROM bookings b
                    JOIN items i ON b.item_id = i.id
                    WHERE i.owner_id = $1
                    ORDER BY b.start_date DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(owner_id)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Past => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT b.* FROM bookings b
                    JOIN items i ON b.item_id = i.id
                    WHERE i.owner_id = $1 AND b.end_date < $2
                    ORDER BY b.start_date DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(owner_id)
                .bind(now)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Future => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT b.* FROM bookings b
                    JOIN items i ON b.item_id = i.id
                    WHERE i.owner_id = $1 AND b.start_date > $2
                    ORDER BY b.start_date DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(owner_id)
                .bind(now)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Current => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT b.* FROM bookings b
                    JOIN items i ON b.item_id = i.id
                    WHERE i.owner_id = $1 AND $2 BETWEEN b.start_date AND b.end_date
                    ORDER BY b.start_date DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(owner_id)
                .bind(now)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Waiting | BookingState::Rejected => {
                let status = if state == BookingState::Waiting {
                    BookingStatus::Waiting
                } else {
                    BookingStatus::Rejected
                };
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT b.* FROM bookings b
                    JOIN items i ON b.item_id = i.id
                    WHERE i.owner_id = $1 AND b.status = $2
                    ORDER BY b.start_date DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(owner_id)
                .bind(status)
                .bind(size)
                .bind(from)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(bookings)
    }

    /// Most recent booking of an item that has already ended
    pub async fn find_last_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE item_id = $1 AND end_date < $2
            ORDER BY end_date DESC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Soonest upcoming booking of an item
    pub async fn find_next_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE item_id = $1 AND start_date > $2
            ORDER BY start_date ASC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// An approved booking of the item by this user that has already ended.
    /// This is the eligibility gate for leaving a comment.
    pub async fn find_completed(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE booker_id = $1 AND item_id = $2 AND end_date < $3 AND status = $4
            LIMIT 1
            "#,
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(now)
        .bind(BookingStatus::Approved)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }
}
