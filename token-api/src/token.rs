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

//! JWT room token generation.
//!
//! Tokens are signed with the application certificate; the RTC backend
//! validates the signature and the `channel`/`uid` claims on join.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use roomcall_types::{Role, RoomTokenClaims};

use crate::error::AppError;

/// Parameters for a single token.
#[derive(Debug, Clone)]
pub struct TokenGrant<'a> {
    pub channel: &'a str,
    pub uid: u32,
    pub role: Role,
    pub expire_secs: u32,
}

/// Sign a room token for `grant` on behalf of `app_id`.
pub fn generate_room_token(
    app_id: &str,
    app_certificate: &str,
    grant: &TokenGrant<'_>,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = RoomTokenClaims {
        app_id: app_id.to_string(),
        channel: grant.channel.to_string(),
        uid: grant.uid,
        role: grant.role,
        iat: now,
        exp: now + i64::from(grant.expire_secs),
        iss: RoomTokenClaims::ISSUER.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app_certificate.as_bytes()),
    )
    .map_err(|e| AppError::internal(&format!("failed to sign room token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    const TEST_CERTIFICATE: &str = "super-secret-test-certificate";

    fn decode_claims(token: &str) -> RoomTokenClaims {
        let mut validation = Validation::default();
        validation.set_issuer(&[RoomTokenClaims::ISSUER]);
        decode::<RoomTokenClaims>(
            token,
            &DecodingKey::from_secret(TEST_CERTIFICATE.as_bytes()),
            &validation,
        )
        .expect("should decode")
        .claims
    }

    #[test]
    fn token_carries_grant() {
        let grant = TokenGrant {
            channel: "room-42",
            uid: 1234,
            role: Role::Publisher,
            expire_secs: 600,
        };
        let token = generate_room_token("app-1", TEST_CERTIFICATE, &grant).expect("should sign");
        let claims = decode_claims(&token);

        assert_eq!(claims.app_id, "app-1");
        assert_eq!(claims.channel, "room-42");
        assert_eq!(claims.uid, 1234);
        assert_eq!(claims.role, Role::Publisher);
        assert_eq!(claims.iss, "roomcall-token-api");
    }

    #[test]
    fn exp_is_now_plus_expire_secs() {
        let grant = TokenGrant {
            channel: "r",
            uid: 0,
            role: Role::Subscriber,
            expire_secs: 900,
        };
        let before = Utc::now().timestamp();
        let token = generate_room_token("app", TEST_CERTIFICATE, &grant).expect("should sign");
        let after = Utc::now().timestamp();
        let claims = decode_claims(&token);

        assert!(claims.exp >= before + 900);
        assert!(claims.exp <= after + 900);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn wrong_certificate_is_rejected() {
        let grant = TokenGrant {
            channel: "r",
            uid: 0,
            role: Role::Subscriber,
            expire_secs: 60,
        };
        let token = generate_room_token("app", TEST_CERTIFICATE, &grant).expect("should sign");

        let result = decode::<RoomTokenClaims>(
            &token,
            &DecodingKey::from_secret(b"another-certificate"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
