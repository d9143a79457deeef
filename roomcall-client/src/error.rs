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

//! Error types for the room client.

use roomcall_token_client::ApiError;
use thiserror::Error;

use crate::media_devices::MediaDeviceKind;

/// A failure reported by the RTC SDK.
///
/// SDK bindings translate their native error objects into this shape; `code`
/// is the SDK's own error code (e.g. `PERMISSION_DENIED`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({code})")]
pub struct SdkError {
    pub code: String,
    pub message: String,
}

impl SdkError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by [`RoomController`](crate::RoomController) operations.
///
/// SDK and token failures have already been logged and raised as a danger
/// alert by the time the caller sees them. `SdkUnavailable` from a controller
/// that was never initialized is only logged.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("RTC service is not available")]
    SdkUnavailable,

    #[error("Failed to get a room token: {0}")]
    TokenRequest(#[from] ApiError),

    #[error("Failed to join room: {0}")]
    Join(SdkError),

    #[error("Failed to publish track: {0}")]
    Publish(SdkError),

    #[error("Failed to unpublish track: {0}")]
    Unpublish(SdkError),

    #[error("Failed to leave room: {0}")]
    Leave(SdkError),

    #[error("Failed to create local track: {0}")]
    TrackCreation(SdkError),

    #[error("Failed to toggle track: {0}")]
    Toggle(SdkError),

    #[error("Failed to enumerate devices: {0}")]
    DeviceEnumeration(SdkError),

    #[error("Failed to switch device: {0}")]
    DeviceSwitch(SdkError),

    #[error("No {0} device found")]
    NoDeviceFound(MediaDeviceKind),

    #[error("Unknown {kind} device: {device_id}")]
    DeviceNotFound {
        kind: MediaDeviceKind,
        device_id: String,
    },
}

/// An action tag that does not name any [`ActionType`](crate::store::ActionType).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid action: {0}")]
pub struct InvalidActionError(pub String);

/// A device kind string other than `audioinput`, `audiooutput` or `videoinput`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid device kind: {0}")]
pub struct InvalidDeviceKind(pub String);

/// A track selector other than `audio`, `video` or `all`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid track type: {0}")]
pub struct InvalidTrackType(pub String);
