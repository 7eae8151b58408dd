//! Query layer for the movies table.
//!
//! Every function takes the pool explicitly; connections are checked out per
//! statement and returned on every exit path. Listing order is whatever the
//! store returns, no ORDER BY clause.

use super::{DbPool, Movie, MovieRequest};

pub async fn list_all(pool: &DbPool) -> Result<Vec<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>("SELECT * FROM movies")
        .fetch_all(pool)
        .await
}

pub async fn get_by_id(pool: &DbPool, id: i64) -> Result<Option<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Exact category match; case sensitivity follows the column collation.
pub async fn get_by_category(pool: &DbPool, category: &str) -> Result<Vec<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE category = ?")
        .bind(category)
        .fetch_all(pool)
        .await
}

/// Insert a new movie and return the stored row with its assigned id.
pub async fn insert(pool: &DbPool, movie: &MovieRequest) -> Result<Movie, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO movies (title, overview, year, category) VALUES (?, ?, ?, ?)",
    )
    .bind(&movie.title)
    .bind(&movie.overview)
    .bind(movie.year)
    .bind(&movie.category)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Overwrite all four mutable fields. Returns `None` if no row matches.
pub async fn update_by_id(
    pool: &DbPool,
    id: i64,
    movie: &MovieRequest,
) -> Result<Option<Movie>, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE movies SET title = ?, overview = ?, year = ?, category = ? WHERE id = ?",
    )
    .bind(&movie.title)
    .bind(&movie.overview)
    .bind(movie.year)
    .bind(&movie.category)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let updated = sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(Some(updated))
}

/// Remove a row and return it. Returns `None` if no row matches.
pub async fn delete_by_id(pool: &DbPool, id: i64) -> Result<Option<Movie>, sqlx::Error> {
    let existing = get_by_id(pool, id).await?;

    let Some(movie) = existing else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM movies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(Some(movie))
}
