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

//! Cross-platform REST client for the roomcall token endpoint.
//!
//! Works on WASM (browser), desktop, and mobile targets via [`reqwest`].
//!
//! # Example
//!
//! ```no_run
//! use roomcall_token_client::TokenApiClient;
//! use roomcall_types::TokenQuery;
//!
//! # async fn example() -> Result<(), roomcall_token_client::ApiError> {
//! let client = TokenApiClient::new("http://localhost:8081");
//!
//! let grant = client
//!     .get_room_token(&TokenQuery::for_channel(Some("standup".into())))
//!     .await?;
//! println!("Joining {} with {}", grant.channel_name, grant.token);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod token;

pub use error::ApiError;
pub use roomcall_types;

use reqwest::Client;
use roomcall_types::{responses::APIResponse, ErrorMessage};

/// A typed REST client for the token endpoint.
///
/// Methods return strongly-typed payloads from [`roomcall_types`] and map
/// HTTP errors to [`ApiError`].
#[derive(Debug, Clone)]
pub struct TokenApiClient {
    base_url: String,
    http: Client,
}

impl TokenApiClient {
    /// Create a new client pointing at the given token service base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - e.g. `"http://localhost:8081"`; an empty string targets
    ///   the page origin when running in a browser.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET request.
    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Parse a standard `APIResponse<T>` body, returning `T` on success or
/// mapping the error to [`ApiError`].
pub(crate) async fn parse_api_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    match status {
        200 => {
            let wrapper: APIResponse<T> = response.json().await?;
            wrapper.into_result().map_err(ApiError::Rejected)
        }
        400 => Err(ApiError::BadRequest(error_message(response).await)),
        405 => Err(ApiError::MethodNotAllowed),
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ApiError::ServerError { status, body: text })
        }
    }
}

/// Pull the human-readable message out of an error envelope, falling back to
/// the raw body when it is not one.
async fn error_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<APIResponse<serde_json::Value>>(&text) {
        Ok(APIResponse {
            error: Some(ErrorMessage { message }),
            ..
        }) => message,
        _ => text,
    }
}
