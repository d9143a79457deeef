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

//! Response types for the token endpoint.
//!
//! Every response is wrapped in an [`APIResponse<T>`] envelope:
//! - On success: `{ "type": "success", "data": <T>, "error": null }`
//! - On failure: `{ "type": "error", "data": null, "error": { "message": ... } }`

use serde::{Deserialize, Serialize};

use crate::error::ErrorMessage;

// ---------------------------------------------------------------------------
// Generic envelope
// ---------------------------------------------------------------------------

/// Discriminant of an [`APIResponse`].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Success,
    Error,
    Pending,
}

/// Top-level response envelope.
///
/// # Success example
///
/// ```json
/// { "type": "success", "data": { "token": "eyJ...", "channelName": "abc" }, "error": null }
/// ```
///
/// # Error example
///
/// ```json
/// { "type": "error", "data": null, "error": { "message": "Method Not Allowed" } }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct APIResponse<D> {
    #[serde(rename = "type")]
    pub kind: ResultType,
    pub data: Option<D>,
    pub error: Option<ErrorMessage>,
}

impl<D> APIResponse<D> {
    /// Wrap a successful result.
    pub fn ok(data: D) -> Self {
        Self {
            kind: ResultType::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Wrap an error result.
    pub fn error(error: ErrorMessage) -> Self {
        Self {
            kind: ResultType::Error,
            data: None,
            error: Some(error),
        }
    }

    /// A request that has not resolved yet.
    pub fn pending() -> Self {
        Self {
            kind: ResultType::Pending,
            data: None,
            error: None,
        }
    }

    /// Collapse the envelope into a `Result`.
    ///
    /// A success envelope without `data`, or a pending envelope, is reported
    /// as an error since neither carries a usable payload.
    pub fn into_result(self) -> Result<D, ErrorMessage> {
        match (self.kind, self.data, self.error) {
            (ResultType::Success, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err(error),
            _ => Err(ErrorMessage::something_went_wrong()),
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint-specific response payloads
// ---------------------------------------------------------------------------

/// Response payload for `GET /api/room/token`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomTokenResponse {
    pub token: String,
    /// Echoes the requested channel, or the generated one when none was given.
    pub channel_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let body = APIResponse::ok(RoomTokenResponse {
            token: "tok".to_string(),
            channel_name: "abc".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "success",
                "data": { "token": "tok", "channelName": "abc" },
                "error": null
            })
        );
    }

    #[test]
    fn error_envelope_shape() {
        let body = APIResponse::<RoomTokenResponse>::error(ErrorMessage::method_not_allowed());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "error",
                "data": null,
                "error": { "message": "Method Not Allowed" }
            })
        );
    }

    #[test]
    fn into_result_prefers_data_on_success() {
        let body: APIResponse<u32> = serde_json::from_str(
            r#"{ "type": "success", "data": 5, "error": null }"#,
        )
        .unwrap();
        assert_eq!(body.into_result(), Ok(5));
    }

    #[test]
    fn pending_envelope_is_not_a_result() {
        let body = APIResponse::<u32>::pending();
        assert_eq!(
            body.into_result(),
            Err(ErrorMessage::something_went_wrong())
        );
    }
}
