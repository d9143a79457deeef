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

use std::fmt;

use roomcall_types::ErrorMessage;

use crate::media_devices::DeviceSet;
use crate::sdk::{LocalTrackHandle, RemoteUser, RtcClientHandle, RtcModuleHandle};

/// Where the local participant is in the room lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoomStatus {
    /// Not in a room.
    #[default]
    Idle,
    /// Joined, nothing published yet.
    Ready,
    /// Joined with at least one published local track.
    Live,
    Error,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Idle => "idle",
            RoomStatus::Ready => "ready",
            RoomStatus::Live => "live",
            RoomStatus::Error => "error",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The channel joined and the token used to join it. Always set and cleared together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCredentials {
    pub channel_name: String,
    pub token: String,
}

impl RoomCredentials {
    pub fn new(channel_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            token: token.into(),
        }
    }
}

/// Everything a renderer needs to draw the room.
///
/// Only the reducer produces new values of this type; the store hands out
/// clones, so editing a snapshot never affects the room.
#[derive(Debug, Clone)]
pub struct RoomState {
    pub rtc_module: Option<RtcModuleHandle>,
    pub client: Option<RtcClientHandle>,
    pub local_audio_track: Option<LocalTrackHandle>,
    pub local_video_track: Option<LocalTrackHandle>,
    pub is_enabled_audio: bool,
    pub is_enabled_video: bool,
    pub credentials: Option<RoomCredentials>,
    pub remote_users: Vec<RemoteUser>,
    pub room_state: RoomStatus,
    pub devices: DeviceSet,
    pub is_loading: bool,
    pub error: Option<ErrorMessage>,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            rtc_module: None,
            client: None,
            local_audio_track: None,
            local_video_track: None,
            is_enabled_audio: true,
            is_enabled_video: true,
            credentials: None,
            remote_users: Vec::new(),
            room_state: RoomStatus::Idle,
            devices: DeviceSet::default(),
            is_loading: false,
            error: None,
        }
    }
}

impl RoomState {
    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn channel_name(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.channel_name.as_str())
    }

    pub fn has_local_tracks(&self) -> bool {
        self.local_audio_track.is_some() && self.local_video_track.is_some()
    }

    pub fn in_room(&self) -> bool {
        self.credentials.is_some()
    }
}
