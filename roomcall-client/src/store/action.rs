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
use std::str::FromStr;

use roomcall_types::ErrorMessage;

use super::state::RoomCredentials;
use crate::error::InvalidActionError;
use crate::media_devices::{DeviceRecord, MediaDeviceKind};
use crate::sdk::{LocalTrackHandle, RemoteUser, RtcClientHandle, RtcModuleHandle};

/// Which local tracks a publish call actually got out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishedTracks {
    pub audio: bool,
    pub video: bool,
}

impl PublishedTracks {
    pub fn any(&self) -> bool {
        self.audio || self.video
    }
}

/// A state transition request for [`RoomStore::dispatch`](super::RoomStore::dispatch).
#[derive(Debug, Clone)]
pub enum Action {
    InitRtc(RtcModuleHandle),
    InitClient(RtcClientHandle),
    InitTracks {
        audio: LocalTrackHandle,
        video: LocalTrackHandle,
    },
    SetAudioTrack(LocalTrackHandle),
    SetVideoTrack(LocalTrackHandle),
    ReleaseLocalTracks,
    CreateRoom(RoomCredentials),
    JoinRoom(RoomCredentials),
    SetRemoteUser(Vec<RemoteUser>),
    PublishTracks(PublishedTracks),
    UnpublishTracks,
    UnpublishAudioInput,
    UnpublishVideoInput,
    ToggleAudio,
    ToggleVideo,
    InitDevices {
        kind: MediaDeviceKind,
        record: DeviceRecord,
    },
    SetDevice {
        kind: MediaDeviceKind,
        device_id: String,
    },
    LeaveRoom,
    StartLoading,
    StopLoading,
    Error(ErrorMessage),
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::InitRtc(_) => ActionType::InitRtc,
            Action::InitClient(_) => ActionType::InitClient,
            Action::InitTracks { .. } => ActionType::InitTracks,
            Action::SetAudioTrack(_) => ActionType::SetAudioTrack,
            Action::SetVideoTrack(_) => ActionType::SetVideoTrack,
            Action::ReleaseLocalTracks => ActionType::ReleaseLocalTracks,
            Action::CreateRoom(_) => ActionType::CreateRoom,
            Action::JoinRoom(_) => ActionType::JoinRoom,
            Action::SetRemoteUser(_) => ActionType::SetRemoteUser,
            Action::PublishTracks(_) => ActionType::PublishTracks,
            Action::UnpublishTracks => ActionType::UnpublishTracks,
            Action::UnpublishAudioInput => ActionType::UnpublishAudioInput,
            Action::UnpublishVideoInput => ActionType::UnpublishVideoInput,
            Action::ToggleAudio => ActionType::ToggleAudio,
            Action::ToggleVideo => ActionType::ToggleVideo,
            Action::InitDevices { .. } => ActionType::InitDevices,
            Action::SetDevice { .. } => ActionType::SetDevice,
            Action::LeaveRoom => ActionType::LeaveRoom,
            Action::StartLoading => ActionType::StartLoading,
            Action::StopLoading => ActionType::StopLoading,
            Action::Error(_) => ActionType::Error,
        }
    }
}

/// The tag of an [`Action`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    InitRtc,
    InitClient,
    InitTracks,
    SetAudioTrack,
    SetVideoTrack,
    ReleaseLocalTracks,
    CreateRoom,
    JoinRoom,
    SetRemoteUser,
    PublishTracks,
    UnpublishTracks,
    UnpublishAudioInput,
    UnpublishVideoInput,
    ToggleAudio,
    ToggleVideo,
    InitDevices,
    SetDevice,
    LeaveRoom,
    StartLoading,
    StopLoading,
    Error,
}

impl ActionType {
    pub const ALL: [ActionType; 21] = [
        ActionType::InitRtc,
        ActionType::InitClient,
        ActionType::InitTracks,
        ActionType::SetAudioTrack,
        ActionType::SetVideoTrack,
        ActionType::ReleaseLocalTracks,
        ActionType::CreateRoom,
        ActionType::JoinRoom,
        ActionType::SetRemoteUser,
        ActionType::PublishTracks,
        ActionType::UnpublishTracks,
        ActionType::UnpublishAudioInput,
        ActionType::UnpublishVideoInput,
        ActionType::ToggleAudio,
        ActionType::ToggleVideo,
        ActionType::InitDevices,
        ActionType::SetDevice,
        ActionType::LeaveRoom,
        ActionType::StartLoading,
        ActionType::StopLoading,
        ActionType::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::InitRtc => "INIT_RTC",
            ActionType::InitClient => "INIT_CLIENT",
            ActionType::InitTracks => "INIT_TRACKS",
            ActionType::SetAudioTrack => "SET_AUDIO_TRACK",
            ActionType::SetVideoTrack => "SET_VIDEO_TRACK",
            ActionType::ReleaseLocalTracks => "RELEASE_LOCAL_TRACKS",
            ActionType::CreateRoom => "CREATE_ROOM",
            ActionType::JoinRoom => "JOIN_ROOM",
            ActionType::SetRemoteUser => "SET_REMOTE_USER",
            ActionType::PublishTracks => "PUBLISH_TRACKS",
            ActionType::UnpublishTracks => "UNPUBLISH_TRACKS",
            ActionType::UnpublishAudioInput => "UNPUBLISH_AUDIO_INPUT",
            ActionType::UnpublishVideoInput => "UNPUBLISH_VIDEO_INPUT",
            ActionType::ToggleAudio => "TOGGLE_AUDIO",
            ActionType::ToggleVideo => "TOGGLE_VIDEO",
            ActionType::InitDevices => "INIT_DEVICES",
            ActionType::SetDevice => "SET_DEVICE",
            ActionType::LeaveRoom => "LEAVE_ROOM",
            ActionType::StartLoading => "START_LOADING",
            ActionType::StopLoading => "STOP_LOADING",
            ActionType::Error => "ERROR",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = InvalidActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidActionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_parses_back() {
        for t in ActionType::ALL {
            assert_eq!(t.to_string().parse::<ActionType>(), Ok(t));
        }
    }

    #[test]
    fn test_unknown_tag_is_an_error() {
        assert_eq!(
            "KICK_USER".parse::<ActionType>(),
            Err(InvalidActionError("KICK_USER".into()))
        );
        // tags are case sensitive
        assert!("join_room".parse::<ActionType>().is_err());
        assert!("".parse::<ActionType>().is_err());
    }

    #[test]
    fn test_action_type_of_payload_actions() {
        let action = Action::SetDevice {
            kind: MediaDeviceKind::VideoInput,
            device_id: "cam".into(),
        };
        assert_eq!(action.action_type(), ActionType::SetDevice);
        assert_eq!(
            Action::PublishTracks(PublishedTracks::default()).action_type(),
            ActionType::PublishTracks
        );
    }
}
