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

//! Shared application state passed to every Axum handler via `State`.

use crate::config::Config;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// RTC application id embedded in issued tokens.
    pub app_id: String,
    /// Token signing secret.
    pub app_certificate: String,
    /// Fallback token lifetime in seconds.
    pub default_expire_secs: u32,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            app_id: config.app_id.clone(),
            app_certificate: config.app_certificate.clone(),
            default_expire_secs: config.default_expire_secs,
        }
    }
}
