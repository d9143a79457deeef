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

//! Shared test helpers for token-api integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{decode, DecodingKey, Validation};
use roomcall_types::RoomTokenClaims;
use serde::de::DeserializeOwned;
use token_api::{routes, state::AppState};

pub const TEST_APP_ID: &str = "test-app-id";
pub const TEST_APP_CERTIFICATE: &str = "test-certificate-for-integration-tests";
pub const TEST_DEFAULT_EXPIRE: u32 = 3600;

/// Build the Axum router, ready for `tower::ServiceExt::oneshot`.
pub fn build_app() -> Router {
    let state = AppState {
        app_id: TEST_APP_ID.to_string(),
        app_certificate: TEST_APP_CERTIFICATE.to_string(),
        default_expire_secs: TEST_DEFAULT_EXPIRE,
    };
    routes::router().with_state(state)
}

/// Build a body-less request.
pub fn request(method: &str, uri: &str) -> http::Request<Body> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// Consume a response body and deserialize JSON into `T`.
pub async fn response_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("deserialize response body")
}

/// Verify a token signed with [`TEST_APP_CERTIFICATE`] and return its claims.
pub fn decode_token(token: &str) -> RoomTokenClaims {
    let mut validation = Validation::default();
    validation.set_issuer(&[RoomTokenClaims::ISSUER]);
    decode::<RoomTokenClaims>(
        token,
        &DecodingKey::from_secret(TEST_APP_CERTIFICATE.as_bytes()),
        &validation,
    )
    .expect("token should verify")
    .claims
}
