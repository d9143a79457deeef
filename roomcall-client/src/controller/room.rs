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

use futures::future::FutureExt;
use log::{debug, info, warn};
use roomcall_types::TokenQuery;

use super::RoomController;
use crate::error::{InvalidTrackType, RoomError, SdkError};
use crate::invitation::{invitation_link, read_invitation};
use crate::media_devices::MediaDeviceKind;
use crate::sdk::{
    CameraConfig, LocalTrackHandle, MicrophoneConfig, RtcModuleHandle, TrackKind, Uid,
};
use crate::store::{Action, PublishedTracks, RoomCredentials, RoomState, RoomStore};

/// Where to join and as whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    pub channel_name: String,
    pub token: String,
    /// `None` lets the SDK assign a uid.
    pub uid: Option<Uid>,
}

impl JoinOptions {
    pub fn new(channel_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            token: token.into(),
            uid: None,
        }
    }

    pub fn with_uid(mut self, uid: impl Into<Uid>) -> Self {
        self.uid = Some(uid.into());
        self
    }
}

/// Which local tracks [`RoomController::unpublish_tracks`] addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSelector {
    Audio,
    Video,
    All,
}

impl TrackSelector {
    fn includes(&self, kind: TrackKind) -> bool {
        match self {
            TrackSelector::All => true,
            TrackSelector::Audio => kind == TrackKind::Audio,
            TrackSelector::Video => kind == TrackKind::Video,
        }
    }
}

impl fmt::Display for TrackSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrackSelector::Audio => "audio",
            TrackSelector::Video => "video",
            TrackSelector::All => "*",
        };
        f.write_str(s)
    }
}

impl FromStr for TrackSelector {
    type Err = InvalidTrackType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(TrackSelector::Audio),
            "video" => Ok(TrackSelector::Video),
            "*" | "all" => Ok(TrackSelector::All),
            other => Err(InvalidTrackType(other.to_string())),
        }
    }
}

impl RoomController {
    /// Requests a token for `query` and joins the channel it names.
    ///
    /// The channel is the one echoed back by the token service, which generates a name when
    /// `query.channel_name` is `None`.
    pub async fn create_room(&self, query: TokenQuery) -> Result<(), RoomError> {
        self.require_client()?;
        self.inner.store.dispatch(Action::StartLoading);

        let grant = match self.inner.token_provider.request_token(&query).await {
            Ok(grant) => grant,
            Err(e) => {
                let err = RoomError::from(e);
                self.report(&err);
                return Err(err);
            }
        };
        debug!("Got token for channel {}", grant.channel_name);

        let options = JoinOptions {
            channel_name: grant.channel_name,
            token: grant.token,
            uid: query.user_uid.map(Uid::Number),
        };
        self.enter_room(options, true).await
    }

    /// Joins an existing channel, creating the local microphone and camera tracks first if they
    /// do not exist yet.
    ///
    /// A failed join keeps the tracks so the caller can retry.
    pub async fn join_room(&self, options: JoinOptions) -> Result<(), RoomError> {
        self.require_client()?;
        self.inner.store.dispatch(Action::StartLoading);
        self.enter_room(options, false).await
    }

    /// Joins the room named by an invitation link. Returns `Ok(false)` when `link` is not one.
    pub async fn join_from_invitation(&self, link: &str) -> Result<bool, RoomError> {
        let Some(credentials) = read_invitation(link) else {
            debug!("No invitation in {link}");
            return Ok(false);
        };
        info!("Joining {} from invitation", credentials.channel_name);
        self.join_room(JoinOptions::new(credentials.channel_name, credentials.token))
            .await?;
        Ok(true)
    }

    /// See [`invitation_link`].
    pub fn invitation_link(&self, origin: &str) -> Option<String> {
        self.inner.store.with(|state| invitation_link(state, origin))
    }

    /// Expects `START_LOADING` to have been dispatched by the caller.
    async fn enter_room(&self, options: JoinOptions, created: bool) -> Result<(), RoomError> {
        let client = self.require_client()?;

        if let Err(err) = self.ensure_local_tracks().await {
            self.report(&err);
        }

        let joined = client
            .join(
                &self.inner.config.app_id,
                &options.channel_name,
                Some(&options.token),
                options.uid.as_ref(),
            )
            .await;
        match joined {
            Ok(uid) => {
                info!("Joined channel {} as {uid}", options.channel_name);
                let credentials = RoomCredentials::new(options.channel_name, options.token);
                let action = if created {
                    Action::CreateRoom(credentials)
                } else {
                    Action::JoinRoom(credentials)
                };
                self.inner.store.dispatch(action);
                self.inner.store.dispatch(Action::StopLoading);
                Ok(())
            }
            Err(e) => {
                let err = RoomError::Join(e);
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Creates whichever local tracks are missing.
    ///
    /// Concurrent callers await the same creation, so each kind is created at most once.
    async fn ensure_local_tracks(&self) -> Result<(), RoomError> {
        let (module, has_audio, has_video) = self.inner.store.with(|s| {
            (
                s.rtc_module.clone(),
                s.local_audio_track.is_some(),
                s.local_video_track.is_some(),
            )
        });
        if has_audio && has_video {
            return Ok(());
        }
        let module = module.ok_or(RoomError::SdkUnavailable)?;

        let task = {
            let mut pending = self.inner.pending_tracks.borrow_mut();
            match pending.as_ref() {
                Some(task) => {
                    debug!("Waiting for in-flight local track creation");
                    task.clone()
                }
                None => {
                    let task = create_local_tracks(
                        module,
                        self.inner.store.clone(),
                        !has_audio,
                        !has_video,
                    )
                    .boxed_local()
                    .shared();
                    *pending = Some(task.clone());
                    task
                }
            }
        };
        let result = task.clone().await;
        let mut pending = self.inner.pending_tracks.borrow_mut();
        if pending.as_ref().is_some_and(|p| p.ptr_eq(&task)) {
            pending.take();
        }
        result.map_err(RoomError::TrackCreation)
    }

    /// Publishes every local track that exists.
    ///
    /// A track that fails to publish is reported and skipped; `PUBLISH_TRACKS` is dispatched
    /// with whatever did go out.
    pub async fn publish_tracks(&self) -> Result<PublishedTracks, RoomError> {
        let client = self.require_client()?;
        let (audio, video) = self.local_tracks();

        let mut published = PublishedTracks::default();
        if let Some(track) = audio {
            match client.publish(&track).await {
                Ok(()) => published.audio = true,
                Err(e) => self.report(&RoomError::Publish(e)),
            }
        }
        if let Some(track) = video {
            match client.publish(&track).await {
                Ok(()) => published.video = true,
                Err(e) => self.report(&RoomError::Publish(e)),
            }
        }

        info!(
            "Published tracks: audio={} video={}",
            published.audio, published.video
        );
        self.inner.store.dispatch(Action::PublishTracks(published));
        Ok(published)
    }

    /// Unpublishes, stops and closes the selected local tracks.
    ///
    /// Stops at the first SDK failure; tracks released before it are still removed from the
    /// state.
    pub async fn unpublish_tracks(&self, selector: TrackSelector) -> Result<(), RoomError> {
        let client = self.require_client()?;
        let (audio, video) = self.local_tracks();

        let mut released_audio = false;
        let mut released_video = false;
        let mut failure = None;
        for (kind, track) in [(TrackKind::Audio, audio), (TrackKind::Video, video)] {
            let Some(track) = track.filter(|_| selector.includes(kind)) else {
                continue;
            };
            if let Err(e) = client.unpublish(&track).await {
                failure = Some(RoomError::Unpublish(e));
                break;
            }
            track.stop();
            track.close();
            match kind {
                TrackKind::Audio => released_audio = true,
                TrackKind::Video => released_video = true,
            }
        }

        let action = match (released_audio, released_video) {
            (true, true) => Some(Action::UnpublishTracks),
            (true, false) => Some(Action::UnpublishAudioInput),
            (false, true) => Some(Action::UnpublishVideoInput),
            (false, false) => None,
        };
        match action {
            Some(action) => self.inner.store.dispatch(action),
            None => debug!("No {selector} track to unpublish"),
        }

        match failure {
            Some(err) => {
                self.report(&err);
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Mutes or unmutes the microphone. Returns the new enabled flag.
    pub async fn toggle_audio(&self) -> Result<bool, RoomError> {
        self.toggle(TrackKind::Audio).await
    }

    /// Turns the camera off or on. Returns the new enabled flag.
    pub async fn toggle_video(&self) -> Result<bool, RoomError> {
        self.toggle(TrackKind::Video).await
    }

    async fn toggle(&self, kind: TrackKind) -> Result<bool, RoomError> {
        let (track, enabled) = self.inner.store.with(|s| match kind {
            TrackKind::Audio => (s.local_audio_track.clone(), s.is_enabled_audio),
            TrackKind::Video => (s.local_video_track.clone(), s.is_enabled_video),
        });

        if let Some(track) = track {
            if let Err(e) = track.set_enabled(!enabled).await {
                let err = RoomError::Toggle(e);
                self.report(&err);
                return Err(err);
            }
        }

        self.inner.store.dispatch(match kind {
            TrackKind::Audio => Action::ToggleAudio,
            TrackKind::Video => Action::ToggleVideo,
        });
        Ok(!enabled)
    }

    /// Stops and closes the local tracks and leaves the channel.
    ///
    /// When the SDK refuses to leave, the closed tracks are still dropped from the state.
    pub async fn leave(&self) -> Result<(), RoomError> {
        let client = self.require_client()?;
        let (audio, video) = self.local_tracks();
        let had_tracks = audio.is_some() || video.is_some();
        for track in [audio, video].into_iter().flatten() {
            track.stop();
            track.close();
        }

        match client.leave().await {
            Ok(()) => {
                info!("Left room");
                self.inner.store.dispatch(Action::LeaveRoom);
                Ok(())
            }
            Err(e) => {
                if had_tracks {
                    self.inner.store.dispatch(Action::ReleaseLocalTracks);
                }
                let err = RoomError::Leave(e);
                self.report(&err);
                Err(err)
            }
        }
    }

    fn local_tracks(&self) -> (Option<LocalTrackHandle>, Option<LocalTrackHandle>) {
        self.inner
            .store
            .with(|s| (s.local_audio_track.clone(), s.local_video_track.clone()))
    }
}

async fn create_local_tracks(
    module: RtcModuleHandle,
    store: RoomStore,
    audio: bool,
    video: bool,
) -> Result<(), SdkError> {
    let (microphone, camera, audio_enabled, video_enabled) = store.with(|s| {
        (
            MicrophoneConfig {
                microphone_id: selected_device(s, MediaDeviceKind::AudioInput),
            },
            CameraConfig {
                camera_id: selected_device(s, MediaDeviceKind::VideoInput),
            },
            s.is_enabled_audio,
            s.is_enabled_video,
        )
    });

    match (audio, video) {
        (true, true) => {
            let (audio, video) = module
                .create_microphone_and_camera_tracks(microphone, camera)
                .await?;
            apply_enabled(&audio, audio_enabled).await;
            apply_enabled(&video, video_enabled).await;
            info!("Created local tracks {} and {}", audio.track_id(), video.track_id());
            store.dispatch(Action::InitTracks { audio, video });
        }
        (true, false) => {
            let audio = module.create_microphone_audio_track(microphone).await?;
            apply_enabled(&audio, audio_enabled).await;
            info!("Created local audio track {}", audio.track_id());
            store.dispatch(Action::SetAudioTrack(audio));
        }
        (false, true) => {
            let video = module.create_camera_video_track(camera).await?;
            apply_enabled(&video, video_enabled).await;
            info!("Created local video track {}", video.track_id());
            store.dispatch(Action::SetVideoTrack(video));
        }
        (false, false) => {}
    }
    Ok(())
}

fn selected_device(state: &RoomState, kind: MediaDeviceKind) -> Option<String> {
    state
        .devices
        .get(kind)
        .selected_device
        .as_ref()
        .map(|d| d.device_id.clone())
}

// New tracks start enabled; carry over a toggle made before they existed.
async fn apply_enabled(track: &LocalTrackHandle, enabled: bool) {
    if enabled {
        return;
    }
    if let Err(e) = track.set_enabled(false).await {
        warn!("Failed to disable new {} track: {e}", track.kind());
    }
}
