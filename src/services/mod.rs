//! Business logic services

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub items: items::ItemsService,
    pub bookings: bookings::BookingsService,
    pub requests: requests::RequestsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository. The item catalog
    /// consults the booking engine for the adjacent-booking decoration.
    pub fn new(repository: Repository) -> Self {
        let bookings = bookings::BookingsService::new(repository.clone());
        Self {
            users: users::UsersService::new(repository.clone()),
            items: items::ItemsService::new(repository.clone(), bookings.clone()),
            bookings,
            requests: requests::RequestsService::new(repository.clone()),
            repository,
        }
    }

    /// Round trip to the database, used by the readiness check
    pub async fn ping_database(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.repository.pool).await?;
        Ok(())
    }
}
