use std::time::Duration;

/// How long a toast stays in the [`AlertQueue`](crate::AlertQueue) before `prune` drops it.
pub const ALERT_TTL: Duration = Duration::from_millis(3000);

/// Suggested capacity for an SDK binding's roster event channel.
pub const ROSTER_EVENT_CAPACITY: usize = 256;

pub const APP_ID_ENV: &str = "ROOMCALL_APP_ID";
pub const TOKEN_API_URL_ENV: &str = "ROOMCALL_TOKEN_API_URL";

// query keys of an invitation link
pub const INVITE_TOKEN_PARAM: &str = "token";
pub const INVITE_CHANNEL_PARAM: &str = "channelName";
