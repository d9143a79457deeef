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

mod media_device_list;

pub use media_device_list::{DeviceRecord, DeviceSet};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidDeviceKind;

/// The three device classes reported by device enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaDeviceKind {
    AudioInput,
    AudioOutput,
    VideoInput,
}

impl MediaDeviceKind {
    pub const ALL: [MediaDeviceKind; 3] = [
        MediaDeviceKind::AudioInput,
        MediaDeviceKind::AudioOutput,
        MediaDeviceKind::VideoInput,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaDeviceKind::AudioInput => "audioinput",
            MediaDeviceKind::AudioOutput => "audiooutput",
            MediaDeviceKind::VideoInput => "videoinput",
        }
    }
}

impl fmt::Display for MediaDeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaDeviceKind {
    type Err = InvalidDeviceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audioinput" => Ok(MediaDeviceKind::AudioInput),
            "audiooutput" => Ok(MediaDeviceKind::AudioOutput),
            "videoinput" => Ok(MediaDeviceKind::VideoInput),
            other => Err(InvalidDeviceKind(other.to_string())),
        }
    }
}
