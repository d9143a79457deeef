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

use super::MediaDeviceKind;
use crate::sdk::{DeviceInfo, LocalTrackHandle};

/// [DeviceRecord] holds the enumerated devices of one [MediaDeviceKind], the current selection
/// and the preview track opened on that selection.
///
/// `track` is only ever defined for `selected_device`: switching the selection switches the
/// track's device first.
#[derive(Debug, Clone, Default)]
pub struct DeviceRecord {
    pub devices: Vec<DeviceInfo>,
    pub track: Option<LocalTrackHandle>,
    pub selected_device: Option<DeviceInfo>,
}

impl DeviceRecord {
    /// Returns the entry with `device_id`, if it was enumerated.
    pub fn find(&self, device_id: &str) -> Option<&DeviceInfo> {
        self.devices.iter().find(|d| d.device_id == device_id)
    }

    /// Returns the `device_id` of the currently selected device, or "" if nothing is selected.
    pub fn selected_id(&self) -> &str {
        self.selected_device
            .as_ref()
            .map(|d| d.device_id.as_str())
            .unwrap_or("")
    }
}

/// One [DeviceRecord] per [MediaDeviceKind].
#[derive(Debug, Clone, Default)]
pub struct DeviceSet {
    pub audio_inputs: DeviceRecord,
    pub audio_outputs: DeviceRecord,
    pub video_inputs: DeviceRecord,
}

impl DeviceSet {
    pub fn get(&self, kind: MediaDeviceKind) -> &DeviceRecord {
        match kind {
            MediaDeviceKind::AudioInput => &self.audio_inputs,
            MediaDeviceKind::AudioOutput => &self.audio_outputs,
            MediaDeviceKind::VideoInput => &self.video_inputs,
        }
    }

    pub fn get_mut(&mut self, kind: MediaDeviceKind) -> &mut DeviceRecord {
        match kind {
            MediaDeviceKind::AudioInput => &mut self.audio_inputs,
            MediaDeviceKind::AudioOutput => &mut self.audio_outputs,
            MediaDeviceKind::VideoInput => &mut self.video_inputs,
        }
    }
}
