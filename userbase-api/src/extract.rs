/// Request extractors
///
/// Both extractors reject with [`ApiError::BadRequest`] so malformed input
/// produces the same JSON error shape as every other failure, and is refused
/// before a handler touches storage.
///
/// - [`UserId`]: the `:id` path segment as an `i32`
/// - [`JsonBody`]: a JSON request body, decoded regardless of `Content-Type`

use crate::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// User id taken from the `:id` path parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

impl UserId {
    /// Parses a raw path segment
    ///
    /// Accepts an optional sign followed by decimal digits that fit in `i32`.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        if raw.is_empty() {
            return Err(ApiError::BadRequest("missing user id".to_string()));
        }

        raw.parse()
            .map(UserId)
            .map_err(|_| ApiError::BadRequest(format!("invalid user id: {raw}")))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest("missing user id".to_string()))?;

        UserId::parse(&raw)
    }
}

/// JSON body decoded into `T`
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http};
    use userbase_shared::models::user::UserInput;

    #[test]
    fn test_parse_numeric_ids() {
        assert_eq!(UserId::parse("42").unwrap(), UserId(42));
        assert_eq!(UserId::parse("+7").unwrap(), UserId(7));
        assert_eq!(UserId::parse("-3").unwrap(), UserId(-3));
    }

    #[test]
    fn test_parse_rejects_non_numeric_ids() {
        for raw in ["abc", "1.5", "12abc", " 1", "99999999999"] {
            let err = UserId::parse(raw).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_parse_empty_is_missing() {
        let err = UserId::parse("").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg == "missing user id"));
    }

    #[tokio::test]
    async fn test_json_body_ignores_content_type() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/users")
            .body(Body::from(r#"{"name":"Ada","email":"ada@example.com"}"#))
            .unwrap();

        let JsonBody(input) = JsonBody::<UserInput>::from_request(req, &()).await.unwrap();
        assert_eq!(input, UserInput::new("Ada", "ada@example.com"));
    }

    #[tokio::test]
    async fn test_json_body_rejects_malformed_payload() {
        for body in ["", "{", "not json", r#"{"name": 5}"#] {
            let req = http::Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap();

            let err = JsonBody::<UserInput>::from_request(req, &()).await.unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "{body:?} should be rejected");
        }
    }
}
