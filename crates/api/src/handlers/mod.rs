pub mod places;
pub mod users;

use crate::error::AppError;

/// Fallback for any path no route matched.
pub async fn route_not_found() -> AppError {
    AppError::NotFound("Could not find this route.".to_string())
}
