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

//! Query types for `GET /api/room/token`.
//!
//! Field names are camelCase on the wire (`channelName`, `userUid`,
//! `role`, `expireTime`).

use serde::{Deserialize, Serialize};

/// Default token lifetime in seconds when `expireTime` is omitted.
pub const DEFAULT_EXPIRE_SECS: u32 = 3600;

/// Role requested for the token holder.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May publish local tracks into the channel.
    Publisher,
    /// May only subscribe to remote tracks.
    #[default]
    Subscriber,
}

impl Role {
    /// Lenient parse used by the token endpoint: anything other than
    /// `"publisher"` is a subscriber.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("publisher") => Role::Publisher,
            _ => Role::Subscriber,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Publisher => "publisher",
            Role::Subscriber => "subscriber",
        }
    }
}

/// Query parameters for `GET /api/room/token`.
///
/// Every field is optional: the server generates a channel name when
/// `channel_name` is absent and applies defaults for the rest.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,

    /// Numeric user id the token is bound to. Defaults to `0` (any uid).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_uid: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Token lifetime in seconds. Defaults to [`DEFAULT_EXPIRE_SECS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<u32>,
}

impl TokenQuery {
    /// Query for an existing (or new, if `None`) channel with default options.
    pub fn for_channel(channel_name: Option<String>) -> Self {
        Self {
            channel_name,
            ..Default::default()
        }
    }
}
