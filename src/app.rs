use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{health, overview, root};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .merge(root::router())
        .nest("/health", health::router())
        .nest("/api/overview", overview::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
