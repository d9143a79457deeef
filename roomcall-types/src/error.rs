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

//! Error payload carried in the `error` field of a failed [`super::APIResponse`].

use serde::{Deserialize, Serialize};

/// Human-readable error description.
///
/// The token endpoint never exposes error codes; clients display `message`
/// as-is in a transient alert.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Generic message used when a request fails for an unexpected reason.
    pub fn something_went_wrong() -> Self {
        Self::new("Something went wrong")
    }

    pub fn unexpected_method() -> Self {
        Self::new("Unexpected HTTP method")
    }

    pub fn method_not_allowed() -> Self {
        Self::new("Method Not Allowed")
    }

    pub fn invalid_channel_name() -> Self {
        Self::new("Channel name is missing or invalid")
    }
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorMessage {}
