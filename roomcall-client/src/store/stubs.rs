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

//! Inert SDK handles for exercising the reducer.

use std::rc::Rc;

use async_broadcast::Receiver;
use async_trait::async_trait;

use crate::error::SdkError;
use crate::sdk::{
    LocalTrack, LocalTrackHandle, RemoteUser, RosterEvent, RtcClient, RtcClientHandle, TrackKind,
    Uid,
};

#[derive(Debug)]
pub struct StubTrack {
    id: String,
    kind: TrackKind,
}

#[async_trait(?Send)]
impl LocalTrack for StubTrack {
    fn track_id(&self) -> String {
        self.id.clone()
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn play(&self, _element_id: Option<&str>) {}

    fn stop(&self) {}

    fn close(&self) {}

    async fn set_enabled(&self, _enabled: bool) -> Result<(), SdkError> {
        Ok(())
    }

    async fn set_device(&self, _device_id: &str) -> Result<(), SdkError> {
        Ok(())
    }

    fn get_volume_level(&self) -> f64 {
        0.0
    }
}

pub fn track(id: &str, kind: TrackKind) -> LocalTrackHandle {
    Rc::new(StubTrack {
        id: id.to_string(),
        kind,
    })
}

#[derive(Debug)]
pub struct StubClient;

#[async_trait(?Send)]
impl RtcClient for StubClient {
    async fn join(
        &self,
        _app_id: &str,
        _channel: &str,
        _token: Option<&str>,
        uid: Option<&Uid>,
    ) -> Result<Uid, SdkError> {
        Ok(uid.cloned().unwrap_or(Uid::Number(1)))
    }

    async fn leave(&self) -> Result<(), SdkError> {
        Ok(())
    }

    async fn publish(&self, _track: &LocalTrackHandle) -> Result<(), SdkError> {
        Ok(())
    }

    async fn unpublish(&self, _track: &LocalTrackHandle) -> Result<(), SdkError> {
        Ok(())
    }

    async fn subscribe(&self, _uid: &Uid, _media: TrackKind) -> Result<(), SdkError> {
        Ok(())
    }

    fn remote_users(&self) -> Vec<RemoteUser> {
        Vec::new()
    }

    fn roster_events(&self) -> Receiver<RosterEvent> {
        async_broadcast::broadcast(1).1
    }
}

pub fn client() -> RtcClientHandle {
    Rc::new(StubClient)
}
