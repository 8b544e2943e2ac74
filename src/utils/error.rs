use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    DatabaseError(String),
    NotFound(String),
    Forbidden(String),
    /// Method not supported on a route. Always answered with fixed plain text.
    Unsupported(String),
    InvalidRequest(String),
    Unauthorized(String),
}

impl AppError {
    /// Builds the fixed "not supported" answer for a route template such as
    /// `/partners/{partnerId}`.
    pub fn unsupported(method: &str, route: &str) -> Self {
        AppError::Unsupported(format!("{} operation not supported on {}", method, route))
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(msg)
            | AppError::NotFound(msg)
            | AppError::Forbidden(msg)
            | AppError::Unsupported(msg)
            | AppError::InvalidRequest(msg)
            | AppError::Unauthorized(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) | AppError::Unsupported(_) => StatusCode::FORBIDDEN,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            AppError::Unsupported(msg) => HttpResponse::build(status)
                .content_type("text/plain")
                .body(msg.clone()),
            AppError::DatabaseError(msg) => {
                log::error!("❌ Store failure: {}", msg);
                HttpResponse::build(status).json(serde_json::json!({
                    "success": false,
                    "error": "Internal server error"
                }))
            }
            _ => HttpResponse::build(status).json(serde_json::json!({
                "success": false,
                "error": self.message()
            })),
        }
    }
}
