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

//! This crate provides the client-side room and media state machine for roomcall.  It drives a
//! third-party RTC SDK (device enumeration, local microphone/camera tracks, joining a channel,
//! publishing and subscribing) and keeps a single reducer-based [`RoomStore`] in step with it, so
//! that a UI only has to render [`RoomState`] snapshots and the [`AlertQueue`].
//!
//! This crate intends to make no assumptions about the UI.  The SDK itself is reached through the
//! traits in [`sdk`]; a browser build supplies a binding for the vendor SDK, tests supply a fake.
//!
//! Everything is single-threaded: handles are `Rc`, futures are `!Send` and are expected to run
//! on a local executor (e.g. `wasm_bindgen_futures::spawn_local`).
//!
//! # Outline of usage
//!
//! For more detailed documentation see the doc for each struct.
//!
//! ## Controller creation:
//! ```ignore
//! let config = RoomConfig::from_env()?;
//! let tokens = Rc::new(config.token_client());
//! let options = RoomControllerOptions::new(config, Rc::new(MySdkLoader), tokens);
//! let controller = RoomController::new(options);
//!
//! let session = RoomSession::new(controller.clone());
//! session.start(Some(&current_url)).await?;
//! spawn_local({
//!     let controller = controller.clone();
//!     async move { controller.run_event_loop().await }
//! });
//! ```
//!
//! ## Rooms and tracks:
//! ```ignore
//! controller.create_room(TokenQuery::for_channel(None)).await?;
//! controller.publish_tracks().await?;
//! controller.toggle_audio().await?;
//! controller.unpublish_tracks(TrackSelector::Video).await?;
//! controller.leave().await?;
//! ```
//!
//! ## Devices:
//! ```ignore
//! controller.init_devices(MediaDeviceKind::VideoInput).await?;
//! let cameras = controller.store().snapshot().devices.video_inputs.devices;
//! controller.select_device(MediaDeviceKind::VideoInput, &cameras[i].device_id).await?;
//! ```
//!
//! ## Rendering:
//! ```ignore
//! controller.store().on_change(|action, state| render(state));
//! let link = controller.invitation_link(&origin);
//! alerts.prune(web_time::Instant::now());
//! ```

pub mod alerts;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod invitation;
pub mod media_devices;
pub mod sdk;
pub mod session;
pub mod store;
pub mod token_provider;

pub use alerts::{Alert, AlertLevel, AlertQueue};
pub use config::RoomConfig;
pub use controller::{JoinOptions, RoomController, RoomControllerOptions, TrackSelector};
pub use error::{InvalidActionError, InvalidDeviceKind, InvalidTrackType, RoomError, SdkError};
pub use media_devices::{DeviceRecord, DeviceSet, MediaDeviceKind};
pub use session::RoomSession;
pub use store::{Action, ActionType, RoomState, RoomStatus, RoomStore};
pub use token_provider::TokenProvider;

pub use roomcall_token_client;
pub use roomcall_types;
