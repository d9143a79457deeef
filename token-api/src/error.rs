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

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Every error is returned as an `APIResponse` with `type: "error"`, paired
//! with the appropriate HTTP status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roomcall_types::{APIResponse, ErrorMessage};

/// Application-level error that pairs an HTTP status code with an [`ErrorMessage`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: ErrorMessage,
}

impl AppError {
    pub fn new(status: StatusCode, body: ErrorMessage) -> Self {
        Self { status, body }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorMessage::new(message))
    }

    pub fn invalid_channel_name() -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorMessage::invalid_channel_name())
    }

    /// The request used a verb that is not an HTTP method we recognize.
    pub fn unexpected_method() -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorMessage::unexpected_method())
    }

    /// The verb is valid HTTP but the route does not handle it.
    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorMessage::method_not_allowed(),
        )
    }

    /// Unexpected failure. The detail is logged, never sent to the client.
    pub fn internal(detail: &str) -> Self {
        tracing::error!("Internal error: {detail}");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorMessage::something_went_wrong(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = APIResponse::<()>::error(self.body);
        (self.status, Json(body)).into_response()
    }
}
