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

//! Handler for the room token endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use rand::Rng;
use roomcall_types::{responses::APIResponse, Role, RoomTokenResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::token::{generate_room_token, TokenGrant};

/// Longest channel name the RTC backend accepts, in bytes.
const MAX_CHANNEL_NAME_LEN: usize = 64;
/// Characters the RTC backend accepts in a channel name.
const VALID_CHANNEL_PATTERN: &str = r"^[a-zA-Z0-9 !#$%&()+\-:;<=.>?@\[\]^_{}|~,]+$";

/// Raw query as sent by the browser.
///
/// Numbers arrive as strings so that malformed values fall back to their
/// defaults instead of rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenQuery {
    pub channel_name: Option<String>,
    pub user_uid: Option<String>,
    pub role: Option<String>,
    pub expire_time: Option<String>,
}

fn validate_channel_name(channel_name: &str) -> Result<(), AppError> {
    if channel_name.trim().is_empty() || channel_name.len() > MAX_CHANNEL_NAME_LEN {
        return Err(AppError::invalid_channel_name());
    }
    let re = regex::Regex::new(VALID_CHANNEL_PATTERN).expect("valid regex");
    if !re.is_match(channel_name) {
        return Err(AppError::invalid_channel_name());
    }
    Ok(())
}

fn generate_channel_name() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..12)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Parse a non-empty numeric query value, `None` when absent or malformed.
fn parse_number(value: Option<&str>) -> Option<u32> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<u32>().ok())
}

/// GET /api/room/token
pub async fn get_room_token(
    State(state): State<AppState>,
    query: Result<Query<RawTokenQuery>, QueryRejection>,
) -> Result<Json<APIResponse<RoomTokenResponse>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request(&e.body_text()))?;

    let channel_name = match query.channel_name {
        Some(name) => {
            validate_channel_name(&name)?;
            name
        }
        None => generate_channel_name(),
    };

    let grant = TokenGrant {
        channel: &channel_name,
        uid: parse_number(query.user_uid.as_deref()).unwrap_or(0),
        role: Role::from_query(query.role.as_deref()),
        expire_secs: parse_number(query.expire_time.as_deref())
            .unwrap_or(state.default_expire_secs),
    };

    let token = generate_room_token(&state.app_id, &state.app_certificate, &grant)?;

    tracing::info!(
        "Issued {} token for channel '{}' (uid {}, expires in {}s)",
        grant.role.as_str(),
        channel_name,
        grant.uid,
        grant.expire_secs
    );

    Ok(Json(APIResponse::ok(RoomTokenResponse {
        token,
        channel_name,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_channel_names_are_valid() {
        for _ in 0..32 {
            let name = generate_channel_name();
            assert_eq!(name.len(), 12);
            assert!(validate_channel_name(&name).is_ok());
        }
    }

    #[test]
    fn blank_and_oversized_channel_names_are_rejected() {
        assert!(validate_channel_name("   ").is_err());
        assert!(validate_channel_name(&"a".repeat(65)).is_err());
        assert!(validate_channel_name(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn channel_names_with_unsupported_characters_are_rejected() {
        assert!(validate_channel_name("team/standup").is_err());
        assert!(validate_channel_name("daily standup #3").is_ok());
    }

    #[test]
    fn numbers_fall_back_when_malformed() {
        assert_eq!(parse_number(Some("42")), Some(42));
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("12abc")), None);
        assert_eq!(parse_number(Some("-1")), None);
        assert_eq!(parse_number(None), None);
    }
}
