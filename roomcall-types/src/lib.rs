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

//! Shared wire types for the roomcall token endpoint.
//!
//! This crate defines the contract between the token service (`token-api`)
//! and its consumers (`roomcall-token-client`, the room controller, tests).
//! It carries no HTTP framework types so both sides can depend on it.

pub mod error;
pub mod requests;
pub mod responses;
pub mod token;

pub use error::ErrorMessage;
pub use requests::{Role, TokenQuery};
pub use responses::{APIResponse, ResultType, RoomTokenResponse};
pub use token::RoomTokenClaims;
