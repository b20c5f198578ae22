/// Error handling for the API server
///
/// Every failure becomes exactly one terminal JSON response. Handlers return
/// `ApiResult<T>`; nothing propagates past the handler.
///
/// Storage errors carry the backend's message through to the client. Which
/// status they get depends on the operation, not on the error: writes
/// (create, update) are rejected with 409 via [`ApiError::write_rejected`],
/// everything else is a 500 via the `From<StoreError>` conversion.
///
/// # Example
///
/// ```
/// use userbase_api::error::{ApiError, ApiResult};
///
/// fn parse_id(raw: &str) -> ApiResult<i32> {
///     raw.parse()
///         .map_err(|_| ApiError::BadRequest("invalid user id".to_string()))
/// }
///
/// assert!(parse_id("abc").is_err());
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use userbase_shared::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - undecodable body, missing or non-numeric id
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Method not allowed (405)
    MethodNotAllowed,

    /// Conflict (409) - storage rejected a write, e.g. duplicate email
    Conflict(String),

    /// Internal server error (500) - any other storage failure
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "conflict")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Maps a failed create or update onto 409
    ///
    /// Uniqueness violations and every other storage failure are reported
    /// the same way.
    pub fn write_rejected(err: StoreError) -> Self {
        tracing::debug!(
            unique_violation = err.is_unique_violation(),
            "Write rejected by storage"
        );
        ApiError::Conflict(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::NotFound(_) => "not_found",
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::Conflict(_) => "conflict",
            ApiError::InternalError(_) => "internal_error",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.code().to_string();

        let message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg,
            ApiError::MethodNotAllowed => "Method not allowed".to_string(),
            ApiError::Conflict(msg) => {
                tracing::warn!(error = %msg, "Storage rejected write");
                msg
            }
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "Storage failure");
                msg
            }
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

/// Storage failures outside of writes are internal errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
