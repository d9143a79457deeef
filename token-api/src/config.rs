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

//! Application configuration loaded from environment variables.

use std::env;

use roomcall_types::requests::DEFAULT_EXPIRE_SECS;

/// Configuration for the token service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:8081").
    pub listen_addr: String,
    /// RTC application id embedded in every token.
    pub app_id: String,
    /// Application certificate used to sign tokens (HMAC-SHA256).
    pub app_certificate: String,
    /// Token lifetime applied when the request has no usable `expireTime`.
    pub default_expire_secs: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `APP_ID`
    /// - `APP_CERTIFICATE`
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:8081"`)
    /// - `DEFAULT_EXPIRE_SECS` (default: `"3600"`)
    pub fn from_env() -> Result<Self, String> {
        let app_id = env::var("APP_ID")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or("APP_ID environment variable is required")?;
        let app_certificate = env::var("APP_CERTIFICATE")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or("APP_CERTIFICATE environment variable is required")?;

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8081".to_string());
        let default_expire_secs = match env::var("DEFAULT_EXPIRE_SECS") {
            Ok(value) => value
                .parse::<u32>()
                .map_err(|_| "DEFAULT_EXPIRE_SECS must be a valid non-negative integer")?,
            Err(_) => DEFAULT_EXPIRE_SECS,
        };

        Ok(Self {
            listen_addr,
            app_id,
            app_certificate,
            default_expire_secs,
        })
    }
}
