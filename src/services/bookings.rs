//! Booking lifecycle service
//!
//! Owns the availability and authorization rules around bookings: creation
//! checks, the WAITING -> APPROVED/REJECTED state machine, participant-only
//! visibility and the time-windowed list queries.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingAction, BookingDetails, BookingState, CreateBooking},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a booking for an item. The booking always starts WAITING.
    ///
    /// Fails when the item or user does not exist, when the owner tries to
    /// book their own item, when the item is unavailable, or when the end
    /// is not strictly after the start.
    pub async fn create(&self, user_id: i64, request: CreateBooking) -> AppResult<BookingDetails> {
        let item = self.repository.items.get_by_id(request.item_id).await?;
        let user = self.repository.users.get_by_id(user_id).await?;

        if user.id == item.owner_id {
            return Err(AppError::Authorization(format!(
                "Booking of item {} requested by its owner",
                item.id
            )));
        }
        if !item.available {
            return Err(AppError::Validation(format!(
                "Item {} is not available for booking",
                item.id
            )));
        }
        if request.end <= request.start {
            return Err(AppError::Validation(
                "Booking end must be after its start".to_string(),
            ));
        }

        let booking = self
            .repository
            .bookings
            .create(item.id, user.id, request.start, request.end)
            .await?;

        tracing::info!("Booking {} created for item {} by user {}", booking.id, item.id, user.id);

        Ok(BookingDetails::new(booking, item, user))
    }

    /// Approve or reject a waiting booking. Only the item's owner may act,
    /// and a terminal booking cannot be decided again.
    pub async fn change_status(
        &self,
        user_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;

        if user_id != item.owner_id {
            return Err(AppError::Authorization(format!(
                "Insufficient rights to change the booking status of item {}",
                item.id
            )));
        }

        let status = booking
            .status
            .apply(BookingAction::from(approved))
            .map_err(|msg| AppError::State(msg.to_string()))?;

        let booking = self.repository.bookings.update_status(booking_id, status).await?;
        let booker = self.repository.users.get_by_id(booking.booker_id).await?;

        tracing::info!("Booking {} moved to {}", booking.id, status);

        Ok(BookingDetails::new(booking, item, booker))
    }

    /// Get a booking by id; visible only to the booker and the item owner
    pub async fn get_by_id(&self, user_id: i64, booking_id: i64) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;

        if user_id != item.owner_id && user_id != booking.booker_id {
            return Err(AppError::Authorization(format!(
                "Insufficient rights to view booking {}",
                booking_id
            )));
        }

        let booker = self.repository.users.get_by_id(booking.booker_id).await?;
        Ok(BookingDetails::new(booking, item, booker))
    }

    /// List the caller's own bookings, filtered and newest start first
    pub async fn list_for_booker(
        &self,
        user_id: i64,
        state: &str,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        let state = parse_state(state)?;

        let bookings = self
            .repository
            .bookings
            .list_for_booker(user_id, state, Utc::now(), size, from)
            .await?;

        self.resolve_details(bookings).await
    }

    /// List bookings of the caller's items, filtered and newest start first
    pub async fn list_for_owner(
        &self,
        user_id: i64,
        state: &str,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        let state = parse_state(state)?;

        let bookings = self
            .repository
            .bookings
            .list_for_owner(user_id, state, Utc::now(), size, from)
            .await?;

        self.resolve_details(bookings).await
    }

    /// Delete a booking
    pub async fn delete_by_id(&self, booking_id: i64) -> AppResult<()> {
        self.repository.bookings.delete_by_id(booking_id).await?;
        tracing::info!("Booking {} deleted", booking_id);
        Ok(())
    }

    /// Most recent booking of an item that has already ended
    pub async fn find_last_booking(&self, item_id: i64) -> AppResult<Option<Booking>> {
        self.repository.bookings.find_last_for_item(item_id, Utc::now()).await
    }

    /// Soonest upcoming booking of an item
    pub async fn find_next_booking(&self, item_id: i64) -> AppResult<Option<Booking>> {
        self.repository.bookings.find_next_for_item(item_id, Utc::now()).await
    }

    async fn resolve_details(&self, bookings: Vec<Booking>) -> AppResult<Vec<BookingDetails>> {
        let mut result = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let item = self.repository.items.get_by_id(booking.item_id).await?;
            let booker = self.repository.users.get_by_id(booking.booker_id).await?;
            result.push(BookingDetails::new(booking, item, booker));
        }
        Ok(result)
    }
}

/// Parse the state query parameter. The failure message is part of the
/// external contract and must stay byte-for-byte stable.
fn parse_state(state: &str) -> AppResult<BookingState> {
    BookingState::parse(state)
        .ok_or_else(|| AppError::State("Unknown state: UNSUPPORTED_STATUS".to_string()))
}
