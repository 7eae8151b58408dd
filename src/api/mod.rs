pub mod auth;
mod error;
mod movies;
mod validation;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/", get(home))
        .route("/login", post(auth::login));

    // Movie routes, all behind the admin gate
    let movie_routes = Router::new()
        .route("/movies", get(movies::list_movies))
        .route("/movies", post(movies::create_movie))
        .route("/movies/:id", get(movies::get_movie))
        .route("/movies/:id", patch(movies::update_movie))
        .route("/movies/:id", delete(movies::delete_movie))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .merge(public_routes)
        .merge(movie_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello World" }))
}
