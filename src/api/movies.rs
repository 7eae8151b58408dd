//! Movie catalog endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::{movies, Movie, MovieRequest};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{
    validate_category, validate_movie_id, validate_overview, validate_title, validate_year,
};

#[derive(Debug, Deserialize)]
pub struct ListMoviesParams {
    pub category: Option<String>,
}

/// Response wrapper for update/delete, echoing the affected row.
#[derive(Debug, Serialize)]
pub struct MovieMessage {
    pub message: String,
    pub movie: Movie,
}

/// Validate a MovieRequest
fn validate_request(req: &MovieRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_title(&req.title) {
        errors.add("title", e);
    }

    if let Err(e) = validate_overview(&req.overview) {
        errors.add("overview", e);
    }

    if let Err(e) = validate_year(req.year) {
        errors.add("year", e);
    }

    if let Err(e) = validate_category(&req.category) {
        errors.add("category", e);
    }

    errors.finish()
}

/// List all movies, or movies of one category when `?category=` is given
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListMoviesParams>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    match params.category {
        Some(category) => {
            if let Err(e) = validate_category(&category) {
                return Err(ApiError::validation_field("category", e));
            }

            let result = movies::get_by_category(&state.db, &category).await?;
            if result.is_empty() {
                return Err(ApiError::not_found("movies not found"));
            }

            Ok(Json(result))
        }
        None => Ok(Json(movies::list_all(&state.db).await?)),
    }
}

/// Get a single movie by id
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Movie>, ApiError> {
    if let Err(e) = validate_movie_id(id) {
        return Err(ApiError::validation_field("id", e));
    }

    movies::get_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("movie not found"))
}

/// Create a new movie
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MovieRequest>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    validate_request(&req)?;

    let movie = movies::insert(&state.db, &req).await?;

    tracing::info!("Created movie {} ({})", movie.id, movie.title);

    Ok((StatusCode::CREATED, Json(movie)))
}

/// Overwrite all mutable fields of a movie
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<MovieRequest>,
) -> Result<Json<MovieMessage>, ApiError> {
    validate_request(&req)?;

    let movie = movies::update_by_id(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::not_found("movie not found"))?;

    Ok(Json(MovieMessage {
        message: "updated".to_string(),
        movie,
    }))
}

/// Delete a movie
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MovieMessage>, ApiError> {
    let movie = movies::delete_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("movie not found"))?;

    tracing::info!("Deleted movie {}", movie.id);

    Ok(Json(MovieMessage {
        message: "deleted".to_string(),
        movie,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::config::Config;
    use crate::crypto;
    use crate::db::test_pool;
    use crate::AppState;

    async fn test_app() -> (Router, Arc<AppState>) {
        let pool = test_pool().await;
        let state = Arc::new(AppState::new(Config::default(), pool));
        (create_router(state.clone()), state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "admin@gmail.com", "password": "admin" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let token = body.as_str().unwrap().to_string();
        assert!(!token.is_empty());
        token
    }

    fn dune() -> Value {
        json!({
            "title": "Dune",
            "overview": "A noble family becomes embroiled in a war for a desert planet",
            "year": 2021,
            "category": "Sci-Fi"
        })
    }

    #[tokio::test]
    async fn test_home_is_public() {
        let (app, _) = test_app().await;

        let (status, body) = send(&app, "GET", "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Hello World" }));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (app, _) = test_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "admin@gmail.com", "password": "wrong" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid credentials");

        let (status, _) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "user@gmail.com", "password": "admin" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_movies_require_auth() {
        let (app, _) = test_app().await;

        // No Authorization header
        let (status, body) = send(&app, "GET", "/movies", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "missing credentials");

        // Non-bearer scheme
        let request = Request::builder()
            .method("GET")
            .uri("/movies")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Garbage token
        let (status, body) = send(&app, "GET", "/movies", Some("not-a-token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid token");
    }

    #[tokio::test]
    async fn test_foreign_email_token_is_forbidden() {
        let (app, state) = test_app().await;

        // Validly signed token, wrong email claim
        let token = crypto::issue_token("user@example.com", &state.config.auth.jwt_secret).unwrap();

        let (status, body) = send(&app, "GET", "/movies", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "invalid credentials");
    }

    #[tokio::test]
    async fn test_create_read_update_delete_scenario() {
        let (app, _) = test_app().await;
        let token = login(&app).await;

        // Create
        let (status, created) = send(&app, "POST", "/movies", Some(&token), Some(dune())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();
        assert!(id >= 1);
        assert_eq!(created["title"], "Dune");

        // Read back the identical record
        let uri = format!("/movies/{}", id);
        let (status, fetched) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        // Listing contains it
        let (status, listing) = send(&app, "GET", "/movies", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listing.as_array().unwrap().len(), 1);

        // Update the year
        let mut changed = dune();
        changed["year"] = json!(2022);
        let (status, updated) = send(&app, "PATCH", &uri, Some(&token), Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["message"], "updated");
        assert_eq!(updated["movie"]["year"], 2022);

        // Delete
        let (status, deleted) = send(&app, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["message"], "deleted");
        assert_eq!(deleted["movie"]["id"], id);

        // Gone now
        let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "movie not found");

        // Second delete is a 404, not a 200
        let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let (app, _) = test_app().await;
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/movies",
            Some(&token),
            Some(json!({
                "title": "",
                "overview": "too short",
                "year": 1899,
                "category": "TV"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let errors = body["errors"].as_object().unwrap();
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("overview"));
        assert!(errors.contains_key("year"));
        assert!(errors.contains_key("category"));

        // Nothing was persisted
        let (status, listing) = send(&app, "GET", "/movies", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(listing.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_year_boundaries() {
        let (app, _) = test_app().await;
        let token = login(&app).await;

        for year in [1900, 2100] {
            let mut payload = dune();
            payload["year"] = json!(year);
            let (status, _) = send(&app, "POST", "/movies", Some(&token), Some(payload)).await;
            assert_eq!(status, StatusCode::CREATED, "year {} should be accepted", year);
        }

        for year in [1899, 2101] {
            let mut payload = dune();
            payload["year"] = json!(year);
            let (status, _) = send(&app, "POST", "/movies", Some(&token), Some(payload)).await;
            assert_eq!(
                status,
                StatusCode::UNPROCESSABLE_ENTITY,
                "year {} should be rejected",
                year
            );
        }
    }

    #[tokio::test]
    async fn test_get_movie_id_out_of_range() {
        let (app, _) = test_app().await;
        let token = login(&app).await;

        let (status, _) = send(&app, "GET", "/movies/2101", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(&app, "GET", "/movies/0", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_unknown_movie_is_404() {
        let (app, _) = test_app().await;
        let token = login(&app).await;

        let (status, body) = send(&app, "PATCH", "/movies/7", Some(&token), Some(dune())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "movie not found");
    }

    #[tokio::test]
    async fn test_category_filter() {
        let (app, _) = test_app().await;
        let token = login(&app).await;

        let (status, _) = send(&app, "POST", "/movies", Some(&token), Some(dune())).await;
        assert_eq!(status, StatusCode::CREATED);

        let mut other = dune();
        other["title"] = json!("Amadeus");
        other["category"] = json!("Drama");
        let (status, _) = send(&app, "POST", "/movies", Some(&token), Some(other)).await;
        assert_eq!(status, StatusCode::CREATED);

        // Matching category
        let (status, listing) = send(&app, "GET", "/movies?category=Sci-Fi", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let listing = listing.as_array().unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0]["title"], "Dune");

        // No matches
        let (status, body) = send(&app, "GET", "/movies?category=Western", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "movies not found");

        // Category too short to be valid
        let (status, _) = send(&app, "GET", "/movies?category=TV", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
