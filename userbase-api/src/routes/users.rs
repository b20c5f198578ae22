/// User CRUD endpoints
///
/// # Endpoints
///
/// - `GET    /users`      - List users, ascending by id
/// - `POST   /users`      - Create user
/// - `GET    /users/:id`  - Get user
/// - `PUT    /users/:id`  - Overwrite name and email
/// - `DELETE /users/:id`  - Delete user
///
/// Each handler performs exactly one storage call. Ids and bodies are
/// validated by the extractors first, so a bad id or body never reaches
/// storage.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{JsonBody, UserId},
};
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use userbase_shared::models::user::{User, UserInput};

/// Delete confirmation
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub message: String,
}

/// List users
///
/// # Endpoint
///
/// ```text
/// GET /users
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "id": 1, "name": "Ada", "email": "ada@example.com" }
/// ]
/// ```
///
/// An empty store returns `[]`.
///
/// # Errors
///
/// - `500 Internal Server Error`: Storage failure
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.store.list().await?;
    Ok(Json(users))
}

/// Create user
///
/// # Endpoint
///
/// ```text
/// POST /users
///
/// { "name": "Ada", "email": "ada@example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": 1, "name": "Ada", "email": "ada@example.com" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a decodable user
/// - `409 Conflict`: Storage rejected the insert (duplicate email or otherwise)
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UserInput>,
) -> ApiResult<Json<User>> {
    let user = state
        .store
        .create(&input)
        .await
        .map_err(ApiError::write_rejected)?;

    tracing::debug!(user_id = user.id, "Created user");
    Ok(Json(user))
}

/// Get user
///
/// # Endpoint
///
/// ```text
/// GET /users/:id
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or non-numeric id
/// - `404 Not Found`: No user with that id
/// - `500 Internal Server Error`: Storage failure
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> ApiResult<Json<User>> {
    state
        .store
        .find(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Update user
///
/// Overwrites name and email. The id in the path wins over any id in the
/// body. Updating an id that does not exist still answers 200 with the
/// payload echoed back.
///
/// # Endpoint
///
/// ```text
/// PUT /users/:id
///
/// { "name": "Ada L.", "email": "ada@example.org" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Bad id or undecodable body
/// - `409 Conflict`: Storage rejected the update (duplicate email or otherwise)
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(input): JsonBody<UserInput>,
) -> ApiResult<Json<User>> {
    let affected = state
        .store
        .update(id, &input)
        .await
        .map_err(ApiError::write_rejected)?;

    if affected == 0 {
        tracing::debug!(user_id = id, "Update matched no user");
    }

    Ok(Json(input.into_user(id)))
}

/// Delete user
///
/// Deleting an id that does not exist is not an error.
///
/// # Endpoint
///
/// ```text
/// DELETE /users/:id
/// ```
///
/// # Response
///
/// ```json
/// { "message": "User deleted" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or non-numeric id
/// - `500 Internal Server Error`: Storage failure
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> ApiResult<Json<DeleteUserResponse>> {
    let affected = state.store.delete(id).await?;
    tracing::debug!(user_id = id, affected, "Deleted user");

    Ok(Json(DeleteUserResponse {
        message: "User deleted".to_string(),
    }))
}

/// `/users/` with no id segment, any method
pub async fn missing_user_id() -> ApiError {
    ApiError::BadRequest("missing user id".to_string())
}

/// Verbs `/users` does not handle
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Verbs `/users/:id` does not handle
///
/// The id is checked first, so a malformed id is a 400 whatever the verb.
pub async fn user_method_not_allowed(UserId(_): UserId) -> ApiError {
    ApiError::MethodNotAllowed
}

/// Refuses `HEAD` on `/users`
///
/// Axum serves `HEAD` with the `GET` handler; this route layer stops it
/// before any storage call.
pub async fn reject_head(request: Request, next: Next) -> Response {
    if request.method() == Method::HEAD {
        return ApiError::MethodNotAllowed.into_response();
    }

    next.run(request).await
}

/// Refuses `HEAD` on `/users/:id`, after the id is checked
pub async fn reject_head_with_id(UserId(_): UserId, request: Request, next: Next) -> Response {
    reject_head(request, next).await
}
