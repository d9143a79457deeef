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

use log::info;

use crate::controller::RoomController;
use crate::error::RoomError;

/// Ties a [`RoomController`] to the lifetime of the page or view that shows the room.
///
/// [`start`](Self::start) when the view mounts, [`stop`](Self::stop) when it goes away.
#[derive(Debug, Clone)]
pub struct RoomSession {
    controller: RoomController,
}

impl RoomSession {
    pub fn new(controller: RoomController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &RoomController {
        &self.controller
    }

    /// Initializes the SDK, subscribes to roster events and, when `current_url` is an
    /// invitation link, joins the room it names.
    pub async fn start(&self, current_url: Option<&str>) -> Result<(), RoomError> {
        self.controller.initialize().await?;
        self.controller.subscribe();
        if let Some(url) = current_url {
            self.controller.join_from_invitation(url).await?;
        }
        info!("Room session started");
        Ok(())
    }

    /// Detaches the roster listener and leaves the room if one was joined.
    pub async fn stop(&self) -> Result<(), RoomError> {
        self.controller.unsubscribe();
        if self.controller.store().with(|s| s.in_room()) {
            self.controller.leave().await?;
        }
        info!("Room session stopped");
        Ok(())
    }
}
