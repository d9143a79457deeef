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

//! Error types for the token API client.

use roomcall_types::ErrorMessage;
use thiserror::Error;

/// Errors returned by [`TokenApiClient`](crate::TokenApiClient) methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request failed validation (HTTP 400).
    #[error("{0}")]
    BadRequest(String),

    /// The endpoint does not accept the HTTP verb used (HTTP 405).
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// HTTP 200 carrying an error or pending envelope.
    #[error("{0}")]
    Rejected(ErrorMessage),

    /// A server error with status code and body.
    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    /// A network, transport or body decoding error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
