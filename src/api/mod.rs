mod error;
mod extract;
mod handlers;

pub use error::ErrorResponse;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::RetrospectiveService;

pub fn create_router(service: RetrospectiveService) -> Router {
    Router::new()
        .route(
            "/retrospectives",
            get(handlers::list_retrospectives).post(handlers::create_retrospective),
        )
        .route("/retrospectives/search", get(handlers::search_retrospectives))
        .route(
            "/retrospectives/{name}/feedback",
            post(handlers::add_feedback_item),
        )
        .route(
            "/retrospectives/{name}/feedback/{feedback_item_id}",
            put(handlers::update_feedback_item),
        )
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(service)
}
