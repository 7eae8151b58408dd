use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A film record in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub year: i64,
    pub category: String,
}

// DTOs for API

/// Payload for creating or overwriting a movie. Updates replace all four
/// fields, so create and update share the same body.
#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: String,
    pub overview: String,
    pub year: i64,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
