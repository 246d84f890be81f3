//! ShareIt Server
//!
//! A peer-to-peer item-rental backend: users list items, other users book
//! them for date ranges, item owners approve or reject the bookings, and
//! renters who completed a booking may leave a comment.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
