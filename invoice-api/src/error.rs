//! Error type shared by all resource handlers.
//!
//! Handlers return `Result<_, ApiError>`. The variant decides the HTTP
//! status in [`ApiError::status`]; the body always has the shape
//! `{"error": {"message": ..., "status": ...}}`, the same shape the
//! catchers in `lib.rs` produce for requests that never reach a handler.

use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder, status};
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A lookup by key matched no row.
    #[error("{0}")]
    NotFound(String),

    /// Anything the store reports: constraint violations, connectivity,
    /// malformed queries.
    #[error("{0}")]
    Database(#[from] diesel::result::Error),
}

impl ApiError {
    pub fn company_not_found(code: &str) -> Self {
        ApiError::NotFound(format!("Can't find company with code of {}", code))
    }

    pub fn invoice_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Can't find invoice: {}", id))
    }

    pub fn status(&self) -> Status {
        match self {
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Database(_) => Status::InternalServerError,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, status: Status) -> Self {
        ErrorResponse {
            error: ErrorBody {
                message: message.into(),
                status: status.code,
            },
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let code = self.status();
        match &self {
            ApiError::Database(e) => {
                error!("{} {} failed: {:?}", req.method(), req.uri().path(), e)
            }
            ApiError::NotFound(message) => {
                info!("{} {}: {}", req.method(), req.uri().path(), message)
            }
        }
        status::Custom(code, Json(ErrorResponse::new(self.to_string(), code))).respond_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::company_not_found("nope");
        assert_eq!(err.status(), Status::NotFound);
        assert_eq!(err.to_string(), "Can't find company with code of nope");

        let err = ApiError::invoice_not_found(42);
        assert_eq!(err.status(), Status::NotFound);
        assert_eq!(err.to_string(), "Can't find invoice: 42");
    }

    #[test]
    fn test_database_errors_map_to_500() {
        let err = ApiError::from(diesel::result::Error::RollbackTransaction);
        assert_eq!(err.status(), Status::InternalServerError);
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse::new("Can't find invoice: 7", Status::NotFound);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"error": {"message": "Can't find invoice: 7", "status": 404}})
        );
    }
}
