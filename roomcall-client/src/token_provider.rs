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
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

use async_trait::async_trait;
use roomcall_token_client::{ApiError, TokenApiClient};
use roomcall_types::{RoomTokenResponse, TokenQuery};

/// Source of room tokens for [`RoomController::create_room`](crate::RoomController::create_room).
#[async_trait(?Send)]
pub trait TokenProvider {
    async fn request_token(&self, query: &TokenQuery) -> Result<RoomTokenResponse, ApiError>;
}

#[async_trait(?Send)]
impl TokenProvider for TokenApiClient {
    async fn request_token(&self, query: &TokenQuery) -> Result<RoomTokenResponse, ApiError> {
        self.get_room_token(query).await
    }
}
