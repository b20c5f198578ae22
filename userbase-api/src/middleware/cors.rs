/// Cross-origin headers middleware
///
/// Stamps the same three CORS headers on every response, not only on
/// preflights, and answers any `OPTIONS` request with `204 No Content`
/// without routing it. Browsers hitting the API from `file://` pages or
/// other hosts can therefore call every route.
///
/// # Headers Applied
///
/// - `Access-Control-Allow-Origin: <configured origin>` (default `*`)
/// - `Access-Control-Allow-Methods: GET, POST, PUT, DELETE, OPTIONS`
/// - `Access-Control-Allow-Headers: Content-Type`
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use userbase_api::middleware::cors::CorsHeadersLayer;
///
/// let app: Router = Router::new()
///     .layer(CorsHeadersLayer::permissive());
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::task::{Context, Poll};
use tower::{Layer, Service};

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// CORS headers middleware layer
#[derive(Clone)]
pub struct CorsHeadersLayer {
    allow_origin: HeaderValue,
}

impl CorsHeadersLayer {
    pub fn new(allow_origin: HeaderValue) -> Self {
        Self { allow_origin }
    }

    /// Allows any origin
    pub fn permissive() -> Self {
        Self::new(HeaderValue::from_static("*"))
    }
}

impl<S> Layer<S> for CorsHeadersLayer {
    type Service = CorsHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsHeadersMiddleware {
            inner,
            allow_origin: self.allow_origin.clone(),
        }
    }
}

/// CORS headers middleware service
#[derive(Clone)]
pub struct CorsHeadersMiddleware<S> {
    inner: S,
    allow_origin: HeaderValue,
}

fn apply_cors_headers(headers: &mut HeaderMap, allow_origin: HeaderValue) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

impl<S> Service<Request> for CorsHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let allow_origin = self.allow_origin.clone();

        if request.method() == Method::OPTIONS {
            return Box::pin(async move {
                let mut response = StatusCode::NO_CONTENT.into_response();
                apply_cors_headers(response.headers_mut(), allow_origin);
                Ok(response)
            });
        }

        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;
            apply_cors_headers(response.headers_mut(), allow_origin);
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http, routing::get, Router};
    use tower::ServiceExt;

    async fn handler() -> impl IntoResponse {
        (StatusCode::OK, "test")
    }

    fn app(layer: CorsHeadersLayer) -> Router {
        Router::new().route("/test", get(handler)).layer(layer)
    }

    #[tokio::test]
    async fn test_cors_headers_applied() {
        let response = app(CorsHeadersLayer::permissive())
            .oneshot(http::Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "Content-Type"
        );
    }

    #[tokio::test]
    async fn test_options_short_circuits() {
        let response = app(CorsHeadersLayer::permissive())
            .oneshot(
                http::Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_some());
    }

    #[tokio::test]
    async fn test_configured_origin() {
        let layer = CorsHeadersLayer::new(HeaderValue::from_static("https://app.example.com"));

        let response = app(layer)
            .oneshot(http::Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );
    }
}
