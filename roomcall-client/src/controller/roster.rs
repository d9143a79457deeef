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

use std::collections::HashSet;
use std::rc::Rc;

use async_broadcast::{Receiver, RecvError, TryRecvError};
use futures::channel::oneshot;
use futures::future::{self, Either};
use log::{debug, info, warn};

use super::RoomController;
use crate::sdk::{RemoteUser, RosterEvent, RtcClientHandle};
use crate::store::Action;

/// The roster listener attached to one SDK client.
pub(super) struct RosterSubscription {
    client: RtcClientHandle,
    /// `None` while [`RoomController::run_event_loop`] owns the receiver.
    events: Option<Receiver<RosterEvent>>,
    stop: Option<oneshot::Sender<()>>,
    stopped: Option<oneshot::Receiver<()>>,
}

impl RoomController {
    /// Attaches the roster listener to the current client and seeds the remote user list.
    ///
    /// Returns `false` when there is no client yet. Subscribing twice to the same client keeps
    /// the existing listener; subscribing after the client changed replaces it.
    pub fn subscribe(&self) -> bool {
        let Some(client) = self.inner.store.with(|s| s.client.clone()) else {
            warn!("Cannot subscribe to roster events before initialize()");
            return false;
        };

        let already = self
            .inner
            .roster
            .borrow()
            .as_ref()
            .is_some_and(|sub| Rc::ptr_eq(&sub.client, &client));
        if already {
            debug!("Roster events already subscribed");
            return true;
        }

        self.unsubscribe();
        let (stop, stopped) = oneshot::channel();
        *self.inner.roster.borrow_mut() = Some(RosterSubscription {
            client: client.clone(),
            events: Some(client.roster_events()),
            stop: Some(stop),
            stopped: Some(stopped),
        });
        info!("Subscribed to roster events");
        self.refresh_remote_users(&client);
        true
    }

    /// Detaches the roster listener and ends a running [`run_event_loop`](Self::run_event_loop).
    pub fn unsubscribe(&self) {
        let Some(mut sub) = self.inner.roster.borrow_mut().take() else {
            return;
        };
        if let Some(stop) = sub.stop.take() {
            let _ = stop.send(());
        }
        info!("Unsubscribed from roster events");
    }

    pub fn is_subscribed(&self) -> bool {
        self.inner.roster.borrow().is_some()
    }

    /// Handles every roster event already queued and returns how many there were.
    ///
    /// For hosts that poll instead of running [`run_event_loop`](Self::run_event_loop).
    pub async fn process_pending_events(&self) -> usize {
        let mut handled = 0;
        loop {
            let next = {
                let mut roster = self.inner.roster.borrow_mut();
                let Some(sub) = roster.as_mut() else {
                    break;
                };
                let Some(events) = sub.events.as_mut() else {
                    break;
                };
                (sub.client.clone(), events.try_recv())
            };
            match next {
                (client, Ok(event)) => {
                    self.handle_roster_event(&client, event).await;
                    handled += 1;
                }
                (client, Err(TryRecvError::Overflowed(missed))) => {
                    warn!("Missed {missed} roster events, refreshing remote users");
                    self.refresh_remote_users(&client);
                }
                (_, Err(TryRecvError::Empty)) => break,
                (_, Err(TryRecvError::Closed)) => {
                    debug!("Roster event channel closed");
                    break;
                }
            }
        }
        handled
    }

    /// Handles roster events as they arrive until [`unsubscribe`](Self::unsubscribe) is called
    /// or the SDK closes the channel.
    ///
    /// Spawn it on the local executor after [`subscribe`](Self::subscribe).
    pub async fn run_event_loop(&self) {
        let taken = self
            .inner
            .roster
            .borrow_mut()
            .as_mut()
            .map(|sub| (sub.client.clone(), sub.events.take(), sub.stopped.take()));
        let Some((client, Some(mut events), Some(mut stopped))) = taken else {
            warn!("No roster subscription to run, or it is already running");
            return;
        };

        loop {
            let next = match future::select(Box::pin(events.recv()), &mut stopped).await {
                Either::Left((received, _)) => received,
                Either::Right(_) => break,
            };
            match next {
                Ok(event) => self.handle_roster_event(&client, event).await,
                Err(RecvError::Overflowed(missed)) => {
                    warn!("Missed {missed} roster events, refreshing remote users");
                    self.refresh_remote_users(&client);
                }
                Err(RecvError::Closed) => {
                    debug!("Roster event channel closed");
                    break;
                }
            }
        }
        info!("Roster event loop stopped");
    }

    async fn handle_roster_event(&self, client: &RtcClientHandle, event: RosterEvent) {
        debug!("Roster event {}: {}", event.name(), event.uid());
        if let RosterEvent::UserPublished { uid, media } = &event {
            if let Err(e) = client.subscribe(uid, *media).await {
                warn!("Failed to subscribe to {media} of user {uid}: {e}");
                self.inner
                    .alerts
                    .danger(format!("Failed to subscribe to {media} of user {uid}: {e}"));
            }
        }
        if !self.is_current_client(client) {
            debug!("Ignoring roster event from a replaced client");
            return;
        }
        self.refresh_remote_users(client);
    }

    fn is_current_client(&self, client: &RtcClientHandle) -> bool {
        self.inner
            .store
            .with(|s| s.client.as_ref().is_some_and(|c| Rc::ptr_eq(c, client)))
    }

    fn refresh_remote_users(&self, client: &RtcClientHandle) {
        let users = unique_by_uid(client.remote_users());
        self.inner.store.dispatch(Action::SetRemoteUser(users));
    }
}

/// Keeps the first entry for each uid.
fn unique_by_uid(users: Vec<RemoteUser>) -> Vec<RemoteUser> {
    let mut seen = HashSet::new();
    users
        .into_iter()
        .filter(|user| seen.insert(user.uid.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::Uid;

    #[test]
    fn test_unique_by_uid_keeps_first() {
        let mut first = RemoteUser::new(1);
        first.has_audio = true;
        let users = vec![first, RemoteUser::new(2), RemoteUser::new(1)];

        let unique = unique_by_uid(users);
        let uids: Vec<Uid> = unique.iter().map(|u| u.uid.clone()).collect();
        assert_eq!(uids, vec![Uid::Number(1), Uid::Number(2)]);
        assert!(unique[0].has_audio);
    }
}
