//! Item catalog service, including comments on items

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::comment::{CommentDetails, CreateComment},
    models::item::{CreateItem, Item, ItemDetails, UpdateItem},
    repository::Repository,
    services::bookings::BookingsService,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
    bookings: BookingsService,
}

impl ItemsService {
    pub fn new(repository: Repository, bookings: BookingsService) -> Self {
        Self { repository, bookings }
    }

    /// Create an item owned by the calling user
    pub async fn create(&self, user_id: i64, item: CreateItem) -> AppResult<Item> {
        let owner = self.repository.users.get_by_id(user_id).await?;
        if let Some(request_id) = item.request_id {
            self.repository.requests.get_by_id(request_id).await?;
        }
        let item = self.repository.items.create(owner.id, &item).await?;
        tracing::info!("Item {} created by user {}", item.id, owner.id);
        Ok(item)
    }

    /// Partial update; only the owner may change an item
    pub async fn update(&self, user_id: i64, item_id: i64, update: UpdateItem) -> AppResult<Item> {
        let item = self.repository.items.get_by_id(item_id).await?;
        if item.owner_id != user_id {
            return Err(AppError::Authorization(format!(
                "Insufficient rights to update item {}",
                item_id
            )));
        }
        self.repository.items.update(item_id, &update).await
    }

    /// Item detail view: comments for everyone, adjacent bookings for the owner
    pub async fn get_by_id(&self, item_id: i64, user_id: i64) -> AppResult<ItemDetails> {
        let item = self.repository.items.get_by_id(item_id).await?;
        let comments = self.repository.comments.list_by_item(item_id).await?;
        let is_owner = item.owner_id == user_id;
        let mut details = ItemDetails::new(item, comments);

        if is_owner {
            self.decorate_bookings(&mut details).await?;
        }

        Ok(details)
    }

    /// All items of an owner, decorated with comments and adjacent bookings
    pub async fn list_by_owner(
        &self,
        user_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        let items = self.repository.items.list_by_owner(user_id, size, from).await?;

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let comments = self.repository.comments.list_by_item(item.id).await?;
            let mut details = ItemDetails::new(item, comments);
            self.decorate_bookings(&mut details).await?;
            result.push(details);
        }
        Ok(result)
    }

    /// Free-text search for renters; a blank query yields nothing
    pub async fn search(&self, text: &str, from: i64, size: i64) -> AppResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.repository.items.search(text, size, from).await
    }

    /// Delete an item
    pub async fn delete_by_id(&self, item_id: i64) -> AppResult<()> {
        self.repository.items.delete_by_id(item_id).await?;
        tracing::info!("Item {} deleted", item_id);
        Ok(())
    }

    /// Leave a review on an item. Only a user with an approved booking of
    /// the item that has already ended may comment.
    pub async fn save_comment(
        &self,
        user_id: i64,
        item_id: i64,
        comment: CreateComment,
    ) -> AppResult<CommentDetails> {
        let now = Utc::now();
        let completed = self
            .repository
            .bookings
            .find_completed(user_id, item_id, now)
            .await?;
        if completed.is_none() {
            return Err(AppError::Validation(format!(
                "No completed booking of item {} found for user {}",
                item_id, user_id
            )));
        }

        let item = self.repository.items.get_by_id(item_id).await?;
        let author = self.repository.users.get_by_id(user_id).await?;
        let comment = self
            .repository
            .comments
            .create(item.id, author.id, &comment.text, now)
            .await?;

        tracing::info!("Comment {} saved on item {} by user {}", comment.id, item.id, author.id);

        Ok(CommentDetails {
            id: comment.id,
            text: comment.text,
            author_name: author.name,
            created: comment.created,
        })
    }

    async fn decorate_bookings(&self, details: &mut ItemDetails) -> AppResult<()> {
        details.last_booking = self.bookings.find_last_booking(details.id).await?.map(Into::into);
        details.next_booking = self.bookings.find_next_booking(details.id).await?.map(Into::into);
        Ok(())
    }
}
