//! ShareIt Server - peer-to-peer item rental backend

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shareit_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("shareit_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ShareIt Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Users
        .route("/users", post(api::users::create))
        .route("/users", get(api::users::list))
        .route("/users/:user_id", get(api::users::get_by_id))
        .route("/users/:user_id", patch(api::users::update))
        .route("/users/:user_id", delete(api::users::delete_by_id))
        // Items
        .route("/items", post(api::items::create))
        .route("/items", get(api::items::list_by_owner))
        .route("/items/search", get(api::items::search))
        .route("/items/:item_id", get(api::items::get_by_id))
        .route("/items/:item_id", patch(api::items::update))
        .route("/items/:item_id", delete(api::items::delete_by_id))
        .route("/items/:item_id/comment", post(api::items::save_comment))
        // Bookings
        .route("/bookings", post(api::bookings::create))
        .route("/bookings", get(api::bookings::list_for_booker))
        .route("/bookings/owner", get(api::bookings::list_for_owner))
        .route("/bookings/:booking_id", get(api::bookings::get_by_id))
        .route("/bookings/:booking_id", patch(api::bookings::change_status))
        .route("/bookings/:booking_id", delete(api::bookings::delete_by_id))
        // Item requests
        .route("/requests", post(api::requests::create))
        .route("/requests", get(api::requests::list_own))
        .route("/requests/all", get(api::requests::list_others))
        .route("/requests/:request_id", get(api::requests::get_by_id))
        .route("/requests/:request_id", delete(api::requests::delete_by_id))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
