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

use log::{debug, info, warn};

use super::RoomController;
use crate::error::RoomError;
use crate::media_devices::{DeviceRecord, MediaDeviceKind};
use crate::sdk::{CameraConfig, DeviceInfo, MicrophoneConfig, RtcModuleHandle};
use crate::store::Action;

impl RoomController {
    /// Enumerates the devices of `kind`, selects the first one and opens a preview track on it.
    ///
    /// Does nothing when the kind already has a preview track or is being initialized by an
    /// earlier call that has not finished.
    pub async fn init_devices(&self, kind: MediaDeviceKind) -> Result<(), RoomError> {
        let module = self.require_module()?;
        if self
            .inner
            .store
            .with(|s| s.devices.get(kind).track.is_some())
        {
            debug!("{kind} devices already initialized");
            return Ok(());
        }
        if !self.inner.initializing_devices.borrow_mut().insert(kind) {
            debug!("{kind} devices are being initialized");
            return Ok(());
        }

        let result = self.open_preview(&module, kind).await;
        self.inner.initializing_devices.borrow_mut().remove(&kind);
        result.inspect_err(|err| self.report(err))
    }

    /// Switches `kind` to the device with `device_id`.
    ///
    /// The selection is stored as soon as the kind's preview track is on the new device. The
    /// matching local track (microphone for audio input, camera for video input) follows; if it
    /// cannot, the error is returned and the selection still names the preview's device.
    pub async fn select_device(
        &self,
        kind: MediaDeviceKind,
        device_id: &str,
    ) -> Result<(), RoomError> {
        let module = self.require_module()?;
        let mut devices = self
            .inner
            .store
            .with(|s| s.devices.get(kind).devices.clone());
        if devices.is_empty() {
            devices = self
                .enumerate(&module, kind)
                .await
                .inspect_err(|err| self.report(err))?;
        }
        if !devices.iter().any(|d| d.device_id == device_id) {
            let err = RoomError::DeviceNotFound {
                kind,
                device_id: device_id.to_string(),
            };
            self.report(&err);
            return Err(err);
        }

        let (preview, local) = self.inner.store.with(|s| {
            let local = match kind {
                MediaDeviceKind::AudioInput => s.local_audio_track.clone(),
                MediaDeviceKind::VideoInput => s.local_video_track.clone(),
                MediaDeviceKind::AudioOutput => None,
            };
            (s.devices.get(kind).track.clone(), local)
        });

        let Some(preview) = preview else {
            warn!("No {kind} track to switch, call init_devices() first");
            self.dispatch_selection(kind, device_id);
            return Ok(());
        };

        // The preview track and the selection move together.
        if let Err(e) = preview.set_device(device_id).await {
            let err = RoomError::DeviceSwitch(e);
            self.report(&err);
            return Err(err);
        }
        self.dispatch_selection(kind, device_id);

        if let Some(local) = local {
            if let Err(e) = local.set_device(device_id).await {
                let err = RoomError::DeviceSwitch(e);
                self.report(&err);
                return Err(err);
            }
        }
        info!("Switched {kind} to {device_id}");
        Ok(())
    }

    fn dispatch_selection(&self, kind: MediaDeviceKind, device_id: &str) {
        self.inner.store.dispatch(Action::SetDevice {
            kind,
            device_id: device_id.to_string(),
        });
    }

    async fn enumerate(
        &self,
        module: &RtcModuleHandle,
        kind: MediaDeviceKind,
    ) -> Result<Vec<DeviceInfo>, RoomError> {
        let devices = module
            .get_devices()
            .await
            .map_err(RoomError::DeviceEnumeration)?;
        Ok(devices.into_iter().filter(|d| d.kind == kind).collect())
    }

    async fn open_preview(
        &self,
        module: &RtcModuleHandle,
        kind: MediaDeviceKind,
    ) -> Result<(), RoomError> {
        let devices = self.enumerate(module, kind).await?;
        let selected = devices
            .first()
            .cloned()
            .ok_or(RoomError::NoDeviceFound(kind))?;

        let device_id = Some(selected.device_id.clone());
        let track = match kind {
            MediaDeviceKind::AudioInput | MediaDeviceKind::AudioOutput => {
                module
                    .create_microphone_audio_track(MicrophoneConfig {
                        microphone_id: device_id,
                    })
                    .await
            }
            MediaDeviceKind::VideoInput => {
                module
                    .create_camera_video_track(CameraConfig {
                        camera_id: device_id,
                    })
                    .await
            }
        }
        .map_err(RoomError::TrackCreation)?;

        info!(
            "Found {} {kind} device(s), previewing {}",
            devices.len(),
            selected.label
        );
        self.inner.store.dispatch(Action::InitDevices {
            kind,
            record: DeviceRecord {
                devices,
                track: Some(track),
                selected_device: Some(selected),
            },
        });
        Ok(())
    }
}
