//! User directory service

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a user; the email must be unique across all users
    pub async fn create(&self, user: CreateUser) -> AppResult<User> {
        let user = self.repository.users.create(&user.name, &user.email).await?;
        tracing::info!("User {} created", user.id);
        Ok(user)
    }

    /// Partial update of name and/or email
    pub async fn update(&self, user_id: i64, update: UpdateUser) -> AppResult<User> {
        self.repository.users.update(user_id, &update).await
    }

    /// Get user by id
    pub async fn get_by_id(&self, user_id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Delete a user
    pub async fn delete_by_id(&self, user_id: i64) -> AppResult<()> {
        self.repository.users.delete_by_id(user_id).await?;
        tracing::info!("User {} deleted", user_id);
        Ok(())
    }
}
