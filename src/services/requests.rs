//! Item request (wish-list) service

use chrono::Utc;

use crate::{
    error::AppResult,
    models::request::{CreateItemRequest, ItemRequest, ItemRequestDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a wish-list request for the calling user
    pub async fn create(&self, user_id: i64, request: CreateItemRequest) -> AppResult<ItemRequest> {
        let requester = self.repository.users.get_by_id(user_id).await?;
        let request = self
            .repository
            .requests
            .create(requester.id, &request.description, Utc::now())
            .await?;
        tracing::info!("Item request {} created by user {}", request.id, requester.id);
        Ok(request)
    }

    /// Get a single request with the items offered in response
    pub async fn get_by_id(&self, user_id: i64, request_id: i64) -> AppResult<ItemRequestDetails> {
        self.repository.users.get_by_id(user_id).await?;
        let request = self.repository.requests.get_by_id(request_id).await?;
        self.resolve_details(request).await
    }

    /// The caller's own requests, newest first, with their answers
    pub async fn list_own(&self, user_id: i64) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        let requests = self.repository.requests.list_by_requester(user_id).await?;

        let mut result = Vec::with_capacity(requests.len());
        for request in requests {
            result.push(self.resolve_details(request).await?);
        }
        Ok(result)
    }

    /// Requests from other users the caller could answer, newest first
    pub async fn list_others(
        &self,
        user_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        let requests = self
            .repository
            .requests
            .list_by_others(user_id, size, from)
            .await?;

        let mut result = Vec::with_capacity(requests.len());
        for request in requests {
            result.push(self.resolve_details(request).await?);
        }
        Ok(result)
    }

    /// Delete a request
    pub async fn delete_by_id(&self, request_id: i64) -> AppResult<()> {
        self.repository.requests.delete_by_id(request_id).await?;
        tracing::info!("Item request {} deleted", request_id);
        Ok(())
    }

    async fn resolve_details(&self, request: ItemRequest) -> AppResult<ItemRequestDetails> {
        let items = self.repository.items.find_by_request_id(request.id).await?;
        Ok(ItemRequestDetails::new(request, items))
    }
}
