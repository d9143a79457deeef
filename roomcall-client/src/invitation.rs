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

//! Shareable invitation links of the form `origin?token=..&channelName=..`.

use log::warn;
use url::Url;

use crate::constants::{INVITE_CHANNEL_PARAM, INVITE_TOKEN_PARAM};
use crate::store::{RoomCredentials, RoomState};

/// Builds a link that lets someone else join the current room.
///
/// Returns `None` until the room has credentials and both local tracks, or
/// when `origin` is not an absolute URL.
pub fn invitation_link(state: &RoomState, origin: &str) -> Option<String> {
    let credentials = state.credentials.as_ref()?;
    if !state.has_local_tracks() {
        return None;
    }
    let mut url = match Url::parse(origin) {
        Ok(url) => url,
        Err(e) => {
            warn!("Cannot build invitation link from origin {origin:?}: {e}");
            return None;
        }
    };
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair(INVITE_TOKEN_PARAM, &credentials.token)
        .append_pair(INVITE_CHANNEL_PARAM, &credentials.channel_name);
    Some(url.into())
}

/// Extracts the token and channel from an invitation link.
///
/// Both parameters must be present and non-empty.
pub fn read_invitation(link: &str) -> Option<RoomCredentials> {
    let url = Url::parse(link).ok()?;
    let mut token = None;
    let mut channel_name = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            INVITE_TOKEN_PARAM => token = Some(value.into_owned()),
            INVITE_CHANNEL_PARAM => channel_name = Some(value.into_owned()),
            _ => {}
        }
    }
    match (channel_name, token) {
        (Some(channel_name), Some(token)) if !channel_name.is_empty() && !token.is_empty() => {
            Some(RoomCredentials::new(channel_name, token))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::TrackKind;
    use crate::store::{reduce, Action};
    use crate::store::stubs;

    fn ready_with_tracks(channel: &str, token: &str) -> RoomState {
        let state = reduce(
            RoomState::default(),
            Action::JoinRoom(RoomCredentials::new(channel, token)),
        );
        reduce(
            state,
            Action::InitTracks {
                audio: stubs::track("mic", TrackKind::Audio),
                video: stubs::track("cam", TrackKind::Video),
            },
        )
    }

    #[test]
    fn test_link_round_trips() {
        let state = ready_with_tracks("daily sync", "a+b/c=");
        let link = invitation_link(&state, "https://meet.example.com").unwrap();

        assert!(link.starts_with("https://meet.example.com/?token="));
        assert!(!link.contains(' '));

        let credentials = read_invitation(&link).unwrap();
        assert_eq!(credentials.channel_name, "daily sync");
        assert_eq!(credentials.token, "a+b/c=");
    }

    #[test]
    fn test_no_link_without_tracks_or_credentials() {
        let state = reduce(
            RoomState::default(),
            Action::JoinRoom(RoomCredentials::new("abc", "tok1")),
        );
        assert!(invitation_link(&state, "https://meet.example.com").is_none());
        assert!(invitation_link(&RoomState::default(), "https://meet.example.com").is_none());
    }

    #[test]
    fn test_bad_origin_gives_no_link() {
        let state = ready_with_tracks("abc", "tok1");
        assert!(invitation_link(&state, "not a url").is_none());
    }

    #[test]
    fn test_read_invitation_requires_both_params() {
        assert!(read_invitation("https://meet.example.com/?token=t").is_none());
        assert!(read_invitation("https://meet.example.com/?channelName=c").is_none());
        assert!(read_invitation("https://meet.example.com/?token=&channelName=c").is_none());
        assert!(read_invitation("https://meet.example.com/").is_none());
        assert!(read_invitation("garbage").is_none());
    }

    #[test]
    fn test_read_invitation_accepts_percent_encoding() {
        let credentials =
            read_invitation("https://meet.example.com/?channelName=daily%20sync&token=t%2B1")
                .unwrap();
        assert_eq!(credentials.channel_name, "daily sync");
        assert_eq!(credentials.token, "t+1");
    }
}
