//! Input validation for API requests.
//!
//! Field constraints for the movie schema. Lengths are counted in
//! characters, not bytes.

/// Validate a movie title (1-100 characters)
pub fn validate_title(title: &str) -> Result<(), String> {
    let len = title.chars().count();

    if len == 0 {
        return Err("Title is required".to_string());
    }

    if len > 100 {
        return Err("Title is too long (max 100 characters)".to_string());
    }

    Ok(())
}

/// Validate a movie overview (10-500 characters)
pub fn validate_overview(overview: &str) -> Result<(), String> {
    let len = overview.chars().count();

    if len < 10 {
        return Err("Overview is too short (min 10 characters)".to_string());
    }

    if len > 500 {
        return Err("Overview is too long (max 500 characters)".to_string());
    }

    Ok(())
}

/// Validate a release year (1900-2100 inclusive)
pub fn validate_year(year: i64) -> Result<(), String> {
    if !(1900..=2100).contains(&year) {
        return Err("Year must be between 1900 and 2100".to_string());
    }

    Ok(())
}

/// Validate a category (3-50 characters)
pub fn validate_category(category: &str) -> Result<(), String> {
    let len = category.chars().count();

    if len < 3 {
        return Err("Category is too short (min 3 characters)".to_string());
    }

    if len > 50 {
        return Err("Category is too long (max 50 characters)".to_string());
    }

    Ok(())
}

/// Validate a movie id path parameter (1-2100)
pub fn validate_movie_id(id: i64) -> Result<(), String> {
    if !(1..=2100).contains(&id) {
        return Err("Id must be between 1 and 2100".to_string());
    }

    Ok(())
}
