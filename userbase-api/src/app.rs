/// Application state and router builder
///
/// The storage backend is constructed by the caller and handed to
/// [`AppState::new`]; handlers reach it only through the state.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use userbase_api::{app::{build_router, AppState}, config::Config};
/// use userbase_shared::db::pool::create_pool;
/// use userbase_shared::store::PgUserStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.database.clone()).await?;
/// let state = AppState::new(Arc::new(PgUserStore::new(pool)), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8081").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::cors::CorsHeadersLayer, routes};
use axum::{
    http::HeaderValue,
    middleware,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use userbase_shared::store::UserStore;

/// Shared application state
///
/// Cloned into every handler via Axum's `State` extractor; both fields are
/// reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// User storage backend
    pub store: Arc<dyn UserStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn UserStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET /health
/// ├── /users
/// │   ├── GET                   # List users
/// │   └── POST                  # Create user
/// ├── /users/                   # 400, id missing
/// └── /users/:id
///     ├── GET                   # Get user
///     ├── PUT                   # Update user
///     └── DELETE                # Delete user
/// ```
///
/// Other verbs on the user routes answer 405, `HEAD` included, unknown
/// paths 404, both as JSON errors. On `/users/:id` a malformed id answers 400
/// before the verb is considered.
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. CORS headers, `OPTIONS` answered with 204 before routing
/// 2. Request tracing (tower-http `TraceLayer`)
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route(
            "/users",
            get(routes::users::list_users)
                .post(routes::users::create_user)
                .route_layer(middleware::from_fn(routes::users::reject_head))
                .fallback(routes::users::method_not_allowed),
        )
        .route("/users/", any(routes::users::missing_user_id))
        .route(
            "/users/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user)
                .route_layer(middleware::from_fn(routes::users::reject_head_with_id))
                .fallback(routes::users::user_method_not_allowed),
        );

    let allow_origin = HeaderValue::from_str(&state.config.api.cors_allow_origin)
        .unwrap_or_else(|_| HeaderValue::from_static("*"));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(user_routes)
        .fallback(route_not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsHeadersLayer::new(allow_origin))
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
