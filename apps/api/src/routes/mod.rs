use axum::{
    http::{
        header::{HeaderName, CONTENT_TYPE},
        HeaderValue,
    },
    middleware,
    routing::any,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::auth::middleware::require_jwt;
use crate::feed::handlers;
use crate::state::AppState;

/// Value of the `X-Powered-By` header stamped on every response.
pub const SERVER_ID: &str = "resume-api";

/// One gated read path, answered on every path and method.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::handle_get_feed))
        .fallback(handlers::handle_get_feed)
        .layer(middleware::from_fn_with_state(state.clone(), require_jwt))
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-powered-by"),
            HeaderValue::from_static(SERVER_ID),
        ))
        .with_state(state)
}
