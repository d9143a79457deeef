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

use std::time::Duration;

use roomcall_token_client::TokenApiClient;

use crate::constants::{ALERT_TTL, APP_ID_ENV, TOKEN_API_URL_ENV};
use crate::sdk::ClientConfig;

/// Settings for a [`RoomController`](crate::RoomController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomConfig {
    /// The RTC project id passed to every SDK `join`.
    pub app_id: String,
    /// Base URL of the token service; "" targets the page origin.
    pub token_api_url: String,
    pub client_config: ClientConfig,
    pub alert_ttl: Duration,
}

impl RoomConfig {
    pub fn new(app_id: impl Into<String>, token_api_url: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            token_api_url: token_api_url.into(),
            client_config: ClientConfig::default(),
            alert_ttl: ALERT_TTL,
        }
    }

    /// Reads `ROOMCALL_APP_ID` and `ROOMCALL_TOKEN_API_URL` from the runtime
    /// environment, falling back to the values baked in at compile time.
    ///
    /// WASM builds have no runtime environment and rely on the fallback.
    pub fn from_env() -> Result<Self, String> {
        let app_id = lookup(APP_ID_ENV, option_env!("ROOMCALL_APP_ID"))
            .ok_or_else(|| format!("{APP_ID_ENV} must be set"))?;
        let token_api_url =
            lookup(TOKEN_API_URL_ENV, option_env!("ROOMCALL_TOKEN_API_URL")).unwrap_or_default();
        Ok(Self::new(app_id, token_api_url))
    }

    pub fn with_client_config(mut self, client_config: ClientConfig) -> Self {
        self.client_config = client_config;
        self
    }

    pub fn with_alert_ttl(mut self, alert_ttl: Duration) -> Self {
        self.alert_ttl = alert_ttl;
        self
    }

    pub fn token_client(&self) -> TokenApiClient {
        TokenApiClient::new(&self.token_api_url)
    }
}

fn lookup(name: &str, baked_in: Option<&'static str>) -> Option<String> {
    std::env::var(name)
        .ok()
        .or_else(|| baked_in.map(str::to_string))
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::{ChannelMode, VideoCodec};

    #[test]
    fn test_new_uses_rtc_h264_defaults() {
        let config = RoomConfig::new("app", "http://localhost:8081");
        assert_eq!(config.client_config.mode, ChannelMode::Rtc);
        assert_eq!(config.client_config.codec, VideoCodec::H264);
        assert_eq!(config.alert_ttl, ALERT_TTL);
        assert_eq!(config.token_client().base_url(), "http://localhost:8081");
    }

    #[test]
    fn test_lookup_prefers_runtime_then_baked_in() {
        assert_eq!(
            lookup("ROOMCALL_TEST_UNSET_VARIABLE", Some("baked")),
            Some("baked".to_string())
        );
        assert_eq!(lookup("ROOMCALL_TEST_UNSET_VARIABLE", Some("  ")), None);
        assert_eq!(lookup("ROOMCALL_TEST_UNSET_VARIABLE", None), None);
    }

    #[test]
    fn test_builders() {
        let config = RoomConfig::new("app", "")
            .with_client_config(ClientConfig {
                mode: ChannelMode::Live,
                codec: VideoCodec::Vp8,
            })
            .with_alert_ttl(Duration::from_secs(5));
        assert_eq!(config.client_config.codec, VideoCodec::Vp8);
        assert_eq!(config.alert_ttl, Duration::from_secs(5));
    }
}
