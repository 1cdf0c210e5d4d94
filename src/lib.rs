pub mod assets;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod middleware;
pub mod state;
pub mod workflow;

pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Build the full application router around the given state.
pub fn app(state: AppState) -> Router {
    let uploads_dir = state.config.uploads.dir.clone();
    let uploads_prefix = state.config.uploads.public_prefix.clone();

    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .merge(session_routes())
        .merge(listing_routes())
        // Admin (session cookie required)
        .merge(admin_routes(state.clone()))
        // Stored posters at their stable public paths
        .nest_service(&uploads_prefix, ServeDir::new(uploads_dir))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn session_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/login", post(public::login))
        .route("/logout", post(public::logout))
}

fn listing_routes() -> Router<AppState> {
    use handlers::public;

    Router::new().route("/events", get(public::events))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use handlers::admin;

    let max_body = state.config.uploads.max_poster_bytes;

    Router::new()
        .route(
            "/api/admin/events",
            get(admin::events_list).post(admin::event_create),
        )
        .route(
            "/api/admin/events/:id",
            put(admin::event_update).delete(admin::event_delete),
        )
        .layer(DefaultBodyLimit::max(max_body))
        .layer(from_fn_with_state(state, middleware::auth::admin_auth))
}
