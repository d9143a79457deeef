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

use log::debug;

use super::action::Action;
use super::state::{RoomState, RoomStatus};
use crate::media_devices::MediaDeviceKind;

/// Applies `action` to `state` and returns the next state.
///
/// Pure and synchronous: no SDK calls, no logging side effects beyond `debug!`
/// for actions that leave the state as it was.
pub fn reduce(mut state: RoomState, action: Action) -> RoomState {
    match action {
        Action::InitRtc(module) => state.rtc_module = Some(module),
        Action::InitClient(client) => state.client = Some(client),
        Action::InitTracks { audio, video } => {
            state.local_audio_track = Some(audio);
            state.local_video_track = Some(video);
        }
        Action::SetAudioTrack(track) => state.local_audio_track = Some(track),
        Action::SetVideoTrack(track) => state.local_video_track = Some(track),
        Action::ReleaseLocalTracks => {
            state.local_audio_track = None;
            state.local_video_track = None;
        }
        Action::CreateRoom(credentials) | Action::JoinRoom(credentials) => {
            state.credentials = Some(credentials);
            state.room_state = RoomStatus::Ready;
        }
        Action::SetRemoteUser(users) => state.remote_users = users,
        Action::PublishTracks(published) => {
            let joined = state.credentials.is_some()
                && matches!(
                    state.room_state,
                    RoomStatus::Ready | RoomStatus::Live | RoomStatus::Error
                );
            if published.any() && joined {
                state.room_state = RoomStatus::Live;
            } else {
                debug!("Publish does not change the room, it stays {}", state.room_state);
            }
        }
        Action::UnpublishTracks => {
            state.local_audio_track = None;
            state.local_video_track = None;
            step_down(&mut state);
        }
        Action::UnpublishAudioInput => {
            state.local_audio_track = None;
            step_down(&mut state);
        }
        Action::UnpublishVideoInput => {
            state.local_video_track = None;
            step_down(&mut state);
        }
        Action::ToggleAudio => state.is_enabled_audio = !state.is_enabled_audio,
        Action::ToggleVideo => state.is_enabled_video = !state.is_enabled_video,
        Action::InitDevices { kind, record } => *state.devices.get_mut(kind) = record,
        Action::SetDevice { kind, device_id } => select_device(&mut state, kind, &device_id),
        Action::LeaveRoom => {
            state.credentials = None;
            state.remote_users.clear();
            state.local_audio_track = None;
            state.local_video_track = None;
            state.is_enabled_audio = true;
            state.is_enabled_video = true;
            state.error = None;
            state.room_state = RoomStatus::Idle;
        }
        Action::StartLoading => {
            state.is_loading = true;
            state.error = None;
        }
        Action::StopLoading => state.is_loading = false,
        Action::Error(message) => {
            state.room_state = RoomStatus::Error;
            state.error = Some(message);
            state.is_loading = false;
        }
    }
    state
}

// Unpublishing drops a live room back to ready. Idle and Error are left alone.
fn step_down(state: &mut RoomState) {
    if matches!(state.room_state, RoomStatus::Live | RoomStatus::Ready) {
        state.room_state = RoomStatus::Ready;
    }
}

fn select_device(state: &mut RoomState, kind: MediaDeviceKind, device_id: &str) {
    let record = state.devices.get_mut(kind);
    if record.track.is_none() {
        debug!("No {kind} track, ignoring selection of {device_id}");
        return;
    }
    match record.find(device_id).cloned() {
        Some(device) => record.selected_device = Some(device),
        None => debug!("Unknown {kind} device {device_id}, selection unchanged"),
    }
}
