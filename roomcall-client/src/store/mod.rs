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

//! The room state store.
//!
//! [`RoomStore`] is the single owner of [`RoomState`]. Cloned handles share
//! the same state; every mutation goes through [`RoomStore::dispatch`], which
//! runs [`reduce`] synchronously and then notifies change listeners.
//!
//! ```
//! use roomcall_client::store::{Action, ActionType, RoomStatus, RoomStore};
//! use roomcall_client::store::RoomCredentials;
//!
//! let store = RoomStore::new();
//! let _listener = store.on_change(|action, state| {
//!     println!("{action} -> {}", state.room_state);
//! });
//!
//! store.dispatch(Action::JoinRoom(RoomCredentials::new("abc", "tok1")));
//! assert_eq!(store.snapshot().room_state, RoomStatus::Ready);
//! assert_eq!("JOIN_ROOM".parse::<ActionType>().unwrap(), ActionType::JoinRoom);
//! ```

mod action;
mod reducer;
mod state;

#[cfg(test)]
pub(crate) mod stubs;

pub use action::{Action, ActionType, PublishedTracks};
pub use reducer::reduce;
pub use state::{RoomCredentials, RoomState, RoomStatus};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::debug;

type ChangeListener = Rc<dyn Fn(ActionType, &RoomState)>;

/// Identifies a listener registered with [`RoomStore::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

struct Inner {
    state: RefCell<RoomState>,
    listeners: RefCell<Vec<(ListenerId, ChangeListener)>>,
    next_listener: Cell<u64>,
}

/// Shared handle to the room state.
#[derive(Clone)]
pub struct RoomStore {
    inner: Rc<Inner>,
}

impl fmt::Debug for RoomStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomStore")
            .field("room_state", &self.inner.state.borrow().room_state)
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl Default for RoomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomStore {
    pub fn new() -> Self {
        Self::with_state(RoomState::default())
    }

    pub fn with_state(state: RoomState) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Runs the reducer and notifies every listener with the new state.
    ///
    /// Listeners may dispatch again; they run after the state borrow is released.
    pub fn dispatch(&self, action: Action) {
        let action_type = action.action_type();
        debug!("dispatch {action_type}");
        {
            let mut state = self.inner.state.borrow_mut();
            let current = std::mem::take(&mut *state);
            *state = reduce(current, action);
        }

        let listeners: Vec<ChangeListener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in listeners {
            listener(action_type, &snapshot);
        }
    }

    /// A copy of the current state. Track and client handles are shared, not duplicated.
    pub fn snapshot(&self) -> RoomState {
        self.inner.state.borrow().clone()
    }

    /// Reads the state in place without cloning it.
    ///
    /// `f` must not dispatch.
    pub fn with<R>(&self, f: impl FnOnce(&RoomState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn on_change(&self, listener: impl Fn(ActionType, &RoomState) + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }
}
