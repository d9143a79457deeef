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

//! Room token endpoint.

use log::debug;
use roomcall_types::{RoomTokenResponse, TokenQuery};

use crate::error::ApiError;
use crate::{parse_api_response, TokenApiClient};

/// Path of the token endpoint relative to the service base URL.
pub const ROOM_TOKEN_PATH: &str = "/api/room/token";

impl TokenApiClient {
    /// Request a token for the channel in `query`, or for a fresh
    /// server-generated channel when `query.channel_name` is `None`.
    ///
    /// Calls `GET /api/room/token?channelName=..&userUid=..&role=..&expireTime=..`.
    pub async fn get_room_token(&self, query: &TokenQuery) -> Result<RoomTokenResponse, ApiError> {
        debug!("Requesting room token for {:?}", query.channel_name);
        let response = self.get(ROOM_TOKEN_PATH).query(query).send().await?;
        parse_api_response(response).await
    }
}
