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
 */

//! Integration tests for device enumeration and switching.


use fake_sdk::*;
use roomcall_client::sdk::{DeviceInfo, TrackKind};
use roomcall_client::{AlertLevel, JoinOptions, MediaDeviceKind, RoomError, RoomStatus};

#[tokio::test]
async fn test_init_devices_requires_sdk() {
    let h = harness();
    let result = h.controller.init_devices(MediaDeviceKind::VideoInput).await;
    assert!(matches!(result, Err(RoomError::SdkUnavailable)));
}

#[tokio::test]
async fn test_init_video_devices_previews_first_camera() {
    let h = initialized().await;

    h.controller
        .init_devices(MediaDeviceKind::VideoInput)
        .await
        .expect("init devices");

    let state = h.state();
    let record = state.devices.get(MediaDeviceKind::VideoInput);
    let ids: Vec<&str> = record.devices.iter().map(|d| d.device_id.as_str()).collect();
    assert_eq!(ids, vec!["cam-front", "cam-back"]);
    assert_eq!(record.selected_id(), "cam-front");

    let preview = h.rtc.track(record.track.as_ref().expect("preview track"));
    assert_eq!(preview.device().as_deref(), Some("cam-front"));
    assert_eq!(h.rtc.video_calls.get(), 1);
    assert!(state.devices.audio_inputs.devices.is_empty());
}

#[tokio::test]
async fn test_init_devices_runs_once() {
    let h = initialized().await;

    let (first, second) = futures::join!(
        h.controller.init_devices(MediaDeviceKind::AudioInput),
        h.controller.init_devices(MediaDeviceKind::AudioInput),
    );
    first.expect("first init");
    second.expect("second init");
    h.controller
        .init_devices(MediaDeviceKind::AudioInput)
        .await
        .expect("third init");

    assert_eq!(h.rtc.audio_calls.get(), 1);
    assert_eq!(
        h.state().devices.audio_inputs.selected_id(),
        "mic-1"
    );
}

#[tokio::test]
async fn test_init_devices_without_hardware() {
    let h = initialized().await;
    h.rtc
        .devices
        .borrow_mut()
        .retain(|d| d.kind != MediaDeviceKind::VideoInput);

    let result = h.controller.init_devices(MediaDeviceKind::VideoInput).await;
    assert!(matches!(
        result,
        Err(RoomError::NoDeviceFound(MediaDeviceKind::VideoInput))
    ));
    assert!(h
        .alert_messages(AlertLevel::Danger)
        .contains(&"No videoinput device found".to_string()));
    assert_eq!(h.state().room_state, RoomStatus::Error);

    // plugging a camera in makes a retry succeed
    h.rtc.devices.borrow_mut().push(DeviceInfo::new(
        "usb-cam",
        MediaDeviceKind::VideoInput,
        "USB Camera",
    ));
    h.controller
        .init_devices(MediaDeviceKind::VideoInput)
        .await
        .expect("retry");
    assert_eq!(h.state().devices.video_inputs.selected_id(), "usb-cam");
}

#[tokio::test]
async fn test_enumeration_failure_is_reported() {
    let h = initialized().await;
    h.rtc.fail_devices.set(true);

    let result = h.controller.init_devices(MediaDeviceKind::AudioInput).await;

    assert!(matches!(result, Err(RoomError::DeviceEnumeration(_))));
    let state = h.state();
    assert_eq!(state.room_state, RoomStatus::Error);
    assert!(state
        .error
        .as_ref()
        .is_some_and(|e| e.message.starts_with("Failed to enumerate devices")));
}

#[tokio::test]
async fn test_audio_output_preview_uses_microphone_track() {
    let h = initialized().await;

    h.controller
        .init_devices(MediaDeviceKind::AudioOutput)
        .await
        .expect("init devices");

    let state = h.state();
    let record = &state.devices.audio_outputs;
    assert_eq!(record.selected_id(), "speaker-1");
    let preview = record.track.as_ref().expect("preview track");
    assert_eq!(preview.kind(), TrackKind::Audio);
    assert_eq!(h.rtc.audio_calls.get(), 1);
    assert_eq!(h.rtc.video_calls.get(), 0);
}

#[tokio::test]
async fn test_select_device_switches_preview_and_local_track() {
    let h = initialized().await;
    h.controller
        .init_devices(MediaDeviceKind::VideoInput)
        .await
        .expect("init devices");
    h.controller
        .join_room(JoinOptions::new("abc", "tok1"))
        .await
        .expect("join");

    h.controller
        .select_device(MediaDeviceKind::VideoInput, "cam-back")
        .await
        .expect("select");

    let state = h.state();
    let record = state.devices.get(MediaDeviceKind::VideoInput);
    assert_eq!(record.selected_id(), "cam-back");
    let preview = h.rtc.track(record.track.as_ref().expect("preview"));
    let local = h.rtc.track(state.local_video_track.as_ref().expect("local video"));
    assert_eq!(preview.device().as_deref(), Some("cam-back"));
    assert_eq!(local.device().as_deref(), Some("cam-back"));

    // the microphone is untouched
    let audio = h.rtc.track(state.local_audio_track.as_ref().expect("local audio"));
    assert_eq!(audio.device(), None);
}

#[tokio::test]
async fn test_select_unknown_device() {
    let h = initialized().await;
    h.controller
        .init_devices(MediaDeviceKind::AudioInput)
        .await
        .expect("init devices");

    let result = h
        .controller
        .select_device(MediaDeviceKind::AudioInput, "mic-9")
        .await;

    match result {
        Err(RoomError::DeviceNotFound { kind, device_id }) => {
            assert_eq!(kind, MediaDeviceKind::AudioInput);
            assert_eq!(device_id, "mic-9");
        }
        other => panic!("expected DeviceNotFound, got {other:?}"),
    }
    assert_eq!(h.state().devices.audio_inputs.selected_id(), "mic-1");
}

#[tokio::test]
async fn test_local_track_switch_failure_keeps_preview_selected() {
    let h = initialized().await;
    h.controller
        .init_devices(MediaDeviceKind::VideoInput)
        .await
        .expect("init devices");
    h.controller
        .join_room(JoinOptions::new("abc", "tok1"))
        .await
        .expect("join");
    let state = h.state();
    let local = h.rtc.track(state.local_video_track.as_ref().expect("local video"));
    local.fail_set_device.set(true);

    let result = h
        .controller
        .select_device(MediaDeviceKind::VideoInput, "cam-back")
        .await;

    assert!(matches!(result, Err(RoomError::DeviceSwitch(_))));
    let state = h.state();
    let record = state.devices.get(MediaDeviceKind::VideoInput);
    let preview = h.rtc.track(record.track.as_ref().expect("preview"));
    assert_eq!(preview.device().as_deref(), Some("cam-back"));
    assert_eq!(record.selected_id(), "cam-back");
    assert_eq!(local.device().as_deref(), Some("cam-front"));
    assert_eq!(state.room_state, RoomStatus::Error);
}

#[tokio::test]
async fn test_select_device_failure_keeps_selection() {
    let h = initialized().await;
    h.controller
        .init_devices(MediaDeviceKind::AudioInput)
        .await
        .expect("init devices");
    let state = h.state();
    let preview = h.rtc.track(state.devices.audio_inputs.track.as_ref().expect("preview"));
    preview.fail_set_device.set(true);

    let result = h
        .controller
        .select_device(MediaDeviceKind::AudioInput, "mic-2")
        .await;

    assert!(matches!(result, Err(RoomError::DeviceSwitch(_))));
    assert_eq!(h.state().devices.audio_inputs.selected_id(), "mic-1");
    assert_eq!(preview.device().as_deref(), Some("mic-1"));
}

#[tokio::test]
async fn test_select_device_without_preview_keeps_selection() {
    let h = initialized().await;

    h.controller
        .select_device(MediaDeviceKind::VideoInput, "cam-back")
        .await
        .expect("select");

    let state = h.state();
    assert_eq!(state.devices.video_inputs.selected_id(), "");
    assert!(state.devices.video_inputs.track.is_none());
}

#[tokio::test]
async fn test_join_uses_selected_devices() {
    let h = initialized().await;
    h.controller
        .init_devices(MediaDeviceKind::AudioInput)
        .await
        .expect("init audio");
    h.controller
        .init_devices(MediaDeviceKind::VideoInput)
        .await
        .expect("init video");
    h.controller
        .select_device(MediaDeviceKind::VideoInput, "cam-back")
        .await
        .expect("select");

    h.controller
        .join_room(JoinOptions::new("abc", "tok1"))
        .await
        .expect("join");

    let state = h.state();
    let audio = h.rtc.track(state.local_audio_track.as_ref().expect("audio"));
    let video = h.rtc.track(state.local_video_track.as_ref().expect("video"));
    assert_eq!(audio.device().as_deref(), Some("mic-1"));
    assert_eq!(video.device().as_deref(), Some("cam-back"));
    assert_eq!(h.rtc.combined_calls.get(), 1);
}
