use axum::{routing::get, Router};

use crate::server::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/news", get(handlers::get_news))
        .route("/categories", get(handlers::list_categories))
        .with_state(state)
}
