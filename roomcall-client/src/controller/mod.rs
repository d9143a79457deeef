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

mod devices;
mod roster;
mod room;

pub use room::{JoinOptions, TrackSelector};

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use log::{error, info, warn};
use roomcall_types::ErrorMessage;

use crate::alerts::{AlertLevel, AlertQueue};
use crate::config::RoomConfig;
use crate::error::{RoomError, SdkError};
use crate::media_devices::MediaDeviceKind;
use crate::sdk::{RtcClientHandle, RtcModuleHandle, SdkLoader};
use crate::store::{Action, RoomStatus, RoomStore};
use crate::token_provider::TokenProvider;

use roster::RosterSubscription;

/// An SDK operation that several callers may await at once.
type SharedTask = Shared<LocalBoxFuture<'static, Result<(), SdkError>>>;

/// Options struct for constructing a [RoomController] via [RoomController::new(options)][RoomController::new]
pub struct RoomControllerOptions {
    pub config: RoomConfig,

    /// Loads the RTC SDK the first time [`initialize()`](RoomController::initialize) runs
    pub sdk_loader: Rc<dyn SdkLoader>,

    /// Issues tokens for [`create_room()`](RoomController::create_room)
    pub token_provider: Rc<dyn TokenProvider>,

    /// The state owner the controller dispatches to. Share it with renderers.
    pub store: RoomStore,

    pub alerts: AlertQueue,
}

impl RoomControllerOptions {
    /// Options with a fresh store and an alert queue using `config.alert_ttl`.
    pub fn new(
        config: RoomConfig,
        sdk_loader: Rc<dyn SdkLoader>,
        token_provider: Rc<dyn TokenProvider>,
    ) -> Self {
        let alerts = AlertQueue::new(config.alert_ttl);
        Self {
            config,
            sdk_loader,
            token_provider,
            store: RoomStore::new(),
            alerts,
        }
    }
}

struct Inner {
    config: RoomConfig,
    store: RoomStore,
    alerts: AlertQueue,
    sdk_loader: Rc<dyn SdkLoader>,
    token_provider: Rc<dyn TokenProvider>,
    sdk_init: RefCell<Option<SharedTask>>,
    pending_tracks: RefCell<Option<SharedTask>>,
    initializing_devices: RefCell<HashSet<MediaDeviceKind>>,
    roster: RefCell<Option<RosterSubscription>>,
}

/// Drives the RTC SDK and keeps the [`RoomStore`] in step with it.
///
/// Every asynchronous SDK call and every roster event goes through this type. SDK failures are
/// logged, raised as a danger alert, dispatched as `ERROR` and then returned to the caller; there
/// is no automatic retry.
///
/// Cloned controllers share everything, so a clone can be moved into a UI callback.
#[derive(Clone)]
pub struct RoomController {
    inner: Rc<Inner>,
}

impl fmt::Debug for RoomController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomController")
            .field("app_id", &self.inner.config.app_id)
            .field("store", &self.inner.store)
            .finish()
    }
}

impl RoomController {
    pub fn new(options: RoomControllerOptions) -> Self {
        let RoomControllerOptions {
            config,
            sdk_loader,
            token_provider,
            store,
            alerts,
        } = options;
        watch_room_status(&store, &alerts);
        Self {
            inner: Rc::new(Inner {
                config,
                store,
                alerts,
                sdk_loader,
                token_provider,
                sdk_init: RefCell::new(None),
                pending_tracks: RefCell::new(None),
                initializing_devices: RefCell::new(HashSet::new()),
                roster: RefCell::new(None),
            }),
        }
    }

    pub fn store(&self) -> &RoomStore {
        &self.inner.store
    }

    pub fn alerts(&self) -> &AlertQueue {
        &self.inner.alerts
    }

    pub fn config(&self) -> &RoomConfig {
        &self.inner.config
    }

    /// Loads the SDK and creates the room client.
    ///
    /// Runs the loader once per controller: concurrent callers share the load and later calls
    /// return the first outcome. On failure the state is left untouched and
    /// [`RoomError::SdkUnavailable`] is returned.
    pub async fn initialize(&self) -> Result<(), RoomError> {
        let task = {
            let mut sdk_init = self.inner.sdk_init.borrow_mut();
            sdk_init
                .get_or_insert_with(|| {
                    load_sdk(
                        self.inner.sdk_loader.clone(),
                        self.inner.store.clone(),
                        self.inner.alerts.clone(),
                        self.inner.config.clone(),
                    )
                    .boxed_local()
                    .shared()
                })
                .clone()
        };
        task.await.map_err(|_| RoomError::SdkUnavailable)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.store.with(|s| s.client.is_some())
    }

    fn require_client(&self) -> Result<RtcClientHandle, RoomError> {
        self.inner.store.with(|s| s.client.clone()).ok_or_else(|| {
            warn!("RTC client is not initialized, call initialize() first");
            RoomError::SdkUnavailable
        })
    }

    fn require_module(&self) -> Result<RtcModuleHandle, RoomError> {
        self.inner.store.with(|s| s.rtc_module.clone()).ok_or_else(|| {
            warn!("RTC module is not loaded, call initialize() first");
            RoomError::SdkUnavailable
        })
    }

    /// Logs `err`, raises it as a danger alert and moves the room to `Error`.
    fn report(&self, err: &RoomError) {
        error!("{err}");
        let message = err.to_string();
        self.inner.alerts.danger(message.clone());
        self.inner
            .store
            .dispatch(Action::Error(ErrorMessage::new(message)));
    }
}

async fn load_sdk(
    loader: Rc<dyn SdkLoader>,
    store: RoomStore,
    alerts: AlertQueue,
    config: RoomConfig,
) -> Result<(), SdkError> {
    info!("Loading RTC SDK");
    match loader.load().await {
        Ok(module) => {
            let client = module.create_client(config.client_config);
            store.dispatch(Action::InitRtc(module));
            store.dispatch(Action::InitClient(client));
            info!("RTC SDK ready");
            Ok(())
        }
        Err(e) => {
            error!("Failed to load RTC SDK: {e}");
            alerts.danger(RoomError::SdkUnavailable.to_string());
            Err(e)
        }
    }
}

/// Raises an alert whenever a dispatch moves the room to a new status.
fn watch_room_status(store: &RoomStore, alerts: &AlertQueue) {
    let last = Cell::new(store.with(|s| s.room_state));
    let alerts = alerts.clone();
    store.on_change(move |_, state| {
        if state.room_state == last.get() {
            return;
        }
        last.set(state.room_state);
        let (level, message) = status_alert(state.room_state);
        alerts.trigger(level, message);
    });
}

fn status_alert(status: RoomStatus) -> (AlertLevel, &'static str) {
    match status {
        RoomStatus::Idle => (AlertLevel::Info, "Not in a room"),
        RoomStatus::Ready => (AlertLevel::Success, "Initialized successfully"),
        RoomStatus::Live => (AlertLevel::Success, "Joined room successfully"),
        RoomStatus::Error => (AlertLevel::Danger, "Something went wrong, please retry"),
    }
}
