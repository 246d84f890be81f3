//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, items, requests, users};
use crate::error::ErrorResponse;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareIt API",
        version = "1.0.0",
        description = "Peer-to-peer item rental REST API",
        license(name = "MIT")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::create,
        users::update,
        users::get_by_id,
        users::list,
        users::delete_by_id,
        // Items
        items::create,
        items::update,
        items::get_by_id,
        items::list_by_owner,
        items::search,
        items::delete_by_id,
        items::save_comment,
        // Bookings
        bookings::create,
        bookings::change_status,
        bookings::get_by_id,
        bookings::list_for_booker,
        bookings::list_for_owner,
        bookings::delete_by_id,
        // Requests
        requests::create,
        requests::get_by_id,
        requests::list_own,
        requests::list_others,
        requests::delete_by_id,
    ),
    components(
        schemas(
            ErrorResponse,
            health::HealthResponse,
            models::user::User,
            models::user::CreateUser,
            models::user::UpdateUser,
            models::item::Item,
            models::item::ItemDetails,
            models::item::CreateItem,
            models::item::UpdateItem,
            models::comment::CommentDetails,
            models::comment::CreateComment,
            models::booking::BookingStatus,
            models::booking::BookingDetails,
            models::booking::BookingRef,
            models::booking::CreateBooking,
            models::request::ItemRequest,
            models::request::ItemRequestDetails,
            models::request::CreateItemRequest,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "users", description = "User directory"),
        (name = "items", description = "Item catalog and comments"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "requests", description = "Item wish-list requests")
    )
)]
pub struct ApiDoc;

/// Router serving the Swagger UI and the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
