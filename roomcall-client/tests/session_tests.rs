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

//! Integration tests for the room session lifecycle.


use fake_sdk::*;
use roomcall_client::{RoomError, RoomSession, RoomStatus};

const INVITE: &str = "https://meet.example.com/?token=tok1&channelName=abc";

#[tokio::test]
async fn test_start_without_url() {
    let h = harness();
    let session = RoomSession::new(h.controller.clone());

    session.start(None).await.expect("start");

    assert!(session.controller().is_initialized());
    assert!(session.controller().is_subscribed());
    assert_eq!(h.state().room_state, RoomStatus::Idle);
    assert!(h.client().joins.borrow().is_empty());
}

#[tokio::test]
async fn test_start_from_invitation_joins() {
    let h = harness();
    let session = RoomSession::new(h.controller.clone());

    session.start(Some(INVITE)).await.expect("start");

    let joins = h.client().joins.borrow().clone();
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0].1, "abc");
    assert_eq!(joins[0].2.as_deref(), Some("tok1"));
    let state = h.state();
    assert_eq!(state.channel_name(), Some("abc"));
    assert_eq!(state.token(), Some("tok1"));
}

#[tokio::test]
async fn test_start_with_plain_url_does_not_join() {
    let h = harness();
    let session = RoomSession::new(h.controller.clone());

    session
        .start(Some("https://meet.example.com/?channelName=abc"))
        .await
        .expect("start");

    assert!(h.client().joins.borrow().is_empty());
    assert!(!h.state().in_room());
}

#[tokio::test]
async fn test_start_with_unavailable_sdk() {
    let h = harness();
    h.loader.fail.set(true);
    let session = RoomSession::new(h.controller.clone());

    let result = session.start(Some(INVITE)).await;

    assert!(matches!(result, Err(RoomError::SdkUnavailable)));
    assert!(!session.controller().is_subscribed());
    assert!(h.client().joins.borrow().is_empty());
}

#[tokio::test]
async fn test_stop_leaves_room() {
    let h = harness();
    let session = RoomSession::new(h.controller.clone());
    session.start(Some(INVITE)).await.expect("start");

    session.stop().await.expect("stop");

    assert_eq!(h.client().leaves.get(), 1);
    assert!(!session.controller().is_subscribed());
    let state = h.state();
    assert_eq!(state.room_state, RoomStatus::Idle);
    assert!(!state.in_room());
}

#[tokio::test]
async fn test_stop_outside_room_skips_leave() {
    let h = harness();
    let session = RoomSession::new(h.controller.clone());
    session.start(None).await.expect("start");

    session.stop().await.expect("stop");

    assert_eq!(h.client().leaves.get(), 0);
    assert!(!session.controller().is_subscribed());
}
