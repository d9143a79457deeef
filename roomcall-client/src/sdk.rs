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

//! The call contract of the third-party RTC SDK.
//!
//! The room controller never talks to the SDK directly; it goes through the
//! object-safe traits below. A browser build provides a binding that wraps the
//! vendor's JavaScript objects, tests provide an in-memory fake.
//!
//! All traits are `?Send`: the SDK lives on a single-threaded event loop and
//! its handles are shared as `Rc<dyn ..>`.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use async_broadcast::Receiver;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidTrackType, SdkError};
use crate::media_devices::MediaDeviceKind;

pub type RtcModuleHandle = Rc<dyn RtcModule>;
pub type RtcClientHandle = Rc<dyn RtcClient>;
pub type LocalTrackHandle = Rc<dyn LocalTrack>;
pub type RemoteTrackHandle = Rc<dyn RemoteTrack>;

/// The media carried by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
}

impl TrackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Audio => "audio",
            TrackKind::Video => "video",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackKind {
    type Err = InvalidTrackType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(TrackKind::Audio),
            "video" => Ok(TrackKind::Video),
            other => Err(InvalidTrackType(other.to_string())),
        }
    }
}

/// A participant id. The SDK accepts either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Uid {
    Number(u32),
    Name(String),
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uid::Number(n) => write!(f, "{n}"),
            Uid::Name(s) => f.write_str(s),
        }
    }
}

impl From<u32> for Uid {
    fn from(uid: u32) -> Self {
        Uid::Number(uid)
    }
}

impl From<&str> for Uid {
    fn from(uid: &str) -> Self {
        Uid::Name(uid.to_string())
    }
}

/// One entry of the SDK's device enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_id: String,
    #[serde(default)]
    pub group_id: String,
    pub kind: MediaDeviceKind,
    #[serde(default)]
    pub label: String,
}

impl DeviceInfo {
    pub fn new(device_id: &str, kind: MediaDeviceKind, label: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
            group_id: String::new(),
            kind,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MicrophoneConfig {
    /// `None` lets the SDK pick the system default.
    pub microphone_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraConfig {
    /// `None` lets the SDK pick the system default.
    pub camera_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelMode {
    #[default]
    Rtc,
    Live,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VideoCodec {
    #[default]
    H264,
    Vp8,
}

/// Parameters for [`RtcModule::create_client`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub mode: ChannelMode,
    pub codec: VideoCodec,
}

/// A remote participant as reported by the SDK roster.
///
/// `audio_track` / `video_track` are only present once the local client has
/// subscribed to that media.
#[derive(Debug, Clone)]
pub struct RemoteUser {
    pub uid: Uid,
    pub audio_track: Option<RemoteTrackHandle>,
    pub video_track: Option<RemoteTrackHandle>,
    pub has_audio: bool,
    pub has_video: bool,
}

impl RemoteUser {
    pub fn new(uid: impl Into<Uid>) -> Self {
        Self {
            uid: uid.into(),
            audio_track: None,
            video_track: None,
            has_audio: false,
            has_video: false,
        }
    }
}

/// Roster changes pushed by the SDK client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    UserPublished { uid: Uid, media: TrackKind },
    UserUnpublished { uid: Uid, media: TrackKind },
    UserJoined { uid: Uid },
    UserLeft { uid: Uid, reason: String },
}

impl RosterEvent {
    /// The SDK's name for this event.
    pub fn name(&self) -> &'static str {
        match self {
            RosterEvent::UserPublished { .. } => "user-published",
            RosterEvent::UserUnpublished { .. } => "user-unpublished",
            RosterEvent::UserJoined { .. } => "user-joined",
            RosterEvent::UserLeft { .. } => "user-left",
        }
    }

    pub fn uid(&self) -> &Uid {
        match self {
            RosterEvent::UserPublished { uid, .. }
            | RosterEvent::UserUnpublished { uid, .. }
            | RosterEvent::UserJoined { uid }
            | RosterEvent::UserLeft { uid, .. } => uid,
        }
    }
}

/// Loads the SDK module. Called at most once per controller.
#[async_trait(?Send)]
pub trait SdkLoader {
    async fn load(&self) -> Result<RtcModuleHandle, SdkError>;
}

/// The loaded SDK module: device enumeration, track and client factories.
#[async_trait(?Send)]
pub trait RtcModule: fmt::Debug {
    async fn get_devices(&self) -> Result<Vec<DeviceInfo>, SdkError>;

    /// Creates a microphone and a camera track in one permission prompt.
    async fn create_microphone_and_camera_tracks(
        &self,
        audio: MicrophoneConfig,
        video: CameraConfig,
    ) -> Result<(LocalTrackHandle, LocalTrackHandle), SdkError>;

    async fn create_microphone_audio_track(
        &self,
        config: MicrophoneConfig,
    ) -> Result<LocalTrackHandle, SdkError>;

    async fn create_camera_video_track(
        &self,
        config: CameraConfig,
    ) -> Result<LocalTrackHandle, SdkError>;

    fn create_client(&self, config: ClientConfig) -> RtcClientHandle;
}

/// A room client: one connection to one channel at a time.
#[async_trait(?Send)]
pub trait RtcClient: fmt::Debug {
    /// Joins `channel` and returns the uid the SDK assigned (or echoed back).
    async fn join(
        &self,
        app_id: &str,
        channel: &str,
        token: Option<&str>,
        uid: Option<&Uid>,
    ) -> Result<Uid, SdkError>;

    async fn leave(&self) -> Result<(), SdkError>;

    async fn publish(&self, track: &LocalTrackHandle) -> Result<(), SdkError>;

    async fn unpublish(&self, track: &LocalTrackHandle) -> Result<(), SdkError>;

    async fn subscribe(&self, uid: &Uid, media: TrackKind) -> Result<(), SdkError>;

    /// The SDK's current view of the remote participants.
    fn remote_users(&self) -> Vec<RemoteUser>;

    /// A fresh receiver for roster events. Dropping it detaches the listener.
    fn roster_events(&self) -> Receiver<RosterEvent>;
}

/// A local microphone or camera track.
#[async_trait(?Send)]
pub trait LocalTrack: fmt::Debug {
    fn track_id(&self) -> String;

    /// Distinguishes microphone from camera tracks.
    fn kind(&self) -> TrackKind;

    /// Renders the track into the element with `element_id`, or plays it out
    /// loud for audio tracks when `None`.
    fn play(&self, element_id: Option<&str>);

    fn stop(&self);

    /// Releases the capture device. The track is unusable afterwards.
    fn close(&self);

    async fn set_enabled(&self, enabled: bool) -> Result<(), SdkError>;

    async fn set_device(&self, device_id: &str) -> Result<(), SdkError>;

    /// Current level in `0.0..=1.0`.
    fn get_volume_level(&self) -> f64;
}

/// A subscribed track of a remote participant.
pub trait RemoteTrack: fmt::Debug {
    fn track_id(&self) -> String;

    fn kind(&self) -> TrackKind;

    fn play(&self, element_id: Option<&str>);

    fn stop(&self);

    fn get_volume_level(&self) -> f64;
}
