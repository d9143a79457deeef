/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Axum router configuration for the token service.

pub mod token;

use std::any::Any;

use axum::{
    http::Method,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Build the full application router.
///
/// Panics inside a handler are turned into the generic 500 envelope instead
/// of dropping the connection.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/room/token",
            get(token::get_room_token).fallback(method_fallback),
        )
        .layer(CatchPanicLayer::custom(panic_response))
}

/// Verbs recognized as HTTP methods. Anything else is a malformed request.
const KNOWN_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
];

/// Reply for a verb the route has no handler for: 405 when it is a known
/// HTTP method, 400 otherwise.
async fn method_fallback(method: Method) -> AppError {
    if KNOWN_METHODS.contains(&method) {
        tracing::debug!("Rejecting {method}: not registered on this route");
        AppError::method_not_allowed()
    } else {
        tracing::warn!("Rejecting unexpected HTTP method {method}");
        AppError::unexpected_method()
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::internal(&detail).into_response()
}
