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

//! Room token (JWT) claims.
//!
//! The token service signs the token with the application certificate; the
//! RTC backend validates the signature before letting the holder join the
//! channel named in `channel`.

use serde::{Deserialize, Serialize};

use crate::requests::Role;

/// JWT payload for a room token.
///
/// # Example payload
///
/// ```json
/// {
///   "app_id": "3f5c...",
///   "channel": "standup",
///   "uid": 0,
///   "role": "publisher",
///   "iat": 1707001200,
///   "exp": 1707004800,
///   "iss": "roomcall-token-api"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoomTokenClaims {
    /// Application the channel belongs to.
    pub app_id: String,

    /// Channel the holder may join.
    pub channel: String,

    /// User id the token is bound to; `0` accepts any uid.
    pub uid: u32,

    pub role: Role,

    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,

    /// Issuer identifier. Always [`Self::ISSUER`].
    pub iss: String,
}

impl RoomTokenClaims {
    /// The expected issuer value for tokens produced by the token service.
    pub const ISSUER: &'static str = "roomcall-token-api";
}
