use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Infrastructure and validation failures. Business-level refusals
/// (duplicate email, invalid credentials, invalid order) are not errors:
/// handlers answer those with a `success: false` payload directly.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database Error: {0}")]
    DatabaseError(String),

    #[error("Blocking Error: {0}")]
    BlockingError(String),

    #[error("Hashing Error: {0}")]
    HashingError(String),

    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

// Every error answers with the same `{success, message}` shape the rest of
// the API uses, so callers never have to special-case a bare framework body.
impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let payload = json!({ "success": false, "message": self.to_string() });
        match self {
            ApiError::ValidationError(_) => HttpResponse::BadRequest().json(payload),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(payload),
            ApiError::DatabaseError(_)
            | ApiError::BlockingError(_)
            | ApiError::HashingError(_) => HttpResponse::InternalServerError().json(payload),
        }
    }
}
