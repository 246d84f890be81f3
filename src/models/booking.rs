//! Booking model, status lifecycle and list filters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::item::Item;
use super::user::User;

/// Approval status of a booking.
///
/// `Waiting` is the only initial state; `Approved` and `Rejected` are both
/// terminal. Stored as text in the `bookings` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

/// Decision taken by the item owner on a waiting booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Approve,
    Reject,
}

impl From<bool> for BookingAction {
    fn from(approved: bool) -> Self {
        if approved {
            BookingAction::Approve
        } else {
            BookingAction::Reject
        }
    }
}

impl BookingStatus {
    /// Transition table for the booking lifecycle.
    ///
    /// A terminal booking cannot be decided again; the error names which
    /// terminal state blocked the transition.
    pub fn apply(self, action: BookingAction) -> Result<BookingStatus, &'static str> {
        match (self, action) {
            (BookingStatus::Waiting, BookingAction::Approve) => Ok(BookingStatus::Approved),
            (BookingStatus::Waiting, BookingAction::Reject) => Ok(BookingStatus::Rejected),
            (BookingStatus::Approved, _) => Err("Booking has already been approved"),
            (BookingStatus::Rejected, _) => Err("Booking has already been rejected"),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        };
        write!(f, "{}", label)
    }
}

/// Filter applied when listing a booker's or owner's bookings.
///
/// Note: `APPROVED` is deliberately absent; the external contract only
/// exposes status filtering for WAITING and REJECTED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// Parse a state query parameter, case-insensitively.
    pub fn parse(s: &str) -> Option<BookingState> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Some(BookingState::All),
            "CURRENT" => Some(BookingState::Current),
            "PAST" => Some(BookingState::Past),
            "FUTURE" => Some(BookingState::Future),
            "WAITING" => Some(BookingState::Waiting),
            "REJECTED" => Some(BookingState::Rejected),
            _ => None,
        }
    }
}

/// Booking row from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

/// Booking with resolved item and booker for API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: Item,
    pub booker: User,
}

impl BookingDetails {
    pub fn new(booking: Booking, item: Item, booker: User) -> Self {
        Self {
            id: booking.id,
            start: booking.start_date,
            end: booking.end_date,
            status: booking.status,
            item,
            booker,
        }
    }
}

/// Compact booking reference used to decorate item views for the owner
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingRef {
    pub id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<Booking> for BookingRef {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            booker_id: b.booker_id,
            start: b.start_date,
            end: b.end_date,
        }
    }
}

/// Create booking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
