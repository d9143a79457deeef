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

//! Transient toast notifications.
//!
//! The controller pushes an alert for every reported failure and every room
//! status change. A renderer shows [`AlertQueue::alerts`] and calls
//! [`AlertQueue::prune`] on a timer; alerts older than the queue's ttl are
//! dropped oldest first.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use uuid::Uuid;
use web_time::Instant;

use crate::constants::ALERT_TTL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertLevel::Info => "info",
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: Uuid,
    pub level: AlertLevel,
    pub message: String,
    pub raised_at: Instant,
}

/// Shared queue of [`Alert`]s. Clones refer to the same queue.
#[derive(Debug, Clone)]
pub struct AlertQueue {
    alerts: Rc<RefCell<VecDeque<Alert>>>,
    ttl: Duration,
}

impl Default for AlertQueue {
    fn default() -> Self {
        Self::new(ALERT_TTL)
    }
}

impl AlertQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            alerts: Rc::new(RefCell::new(VecDeque::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn trigger(&self, level: AlertLevel, message: impl Into<String>) -> Uuid {
        self.trigger_at(level, message, Instant::now())
    }

    pub fn trigger_at(
        &self,
        level: AlertLevel,
        message: impl Into<String>,
        raised_at: Instant,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.alerts.borrow_mut().push_back(Alert {
            id,
            level,
            message: message.into(),
            raised_at,
        });
        id
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.trigger(AlertLevel::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.trigger(AlertLevel::Success, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.trigger(AlertLevel::Warning, message)
    }

    pub fn danger(&self, message: impl Into<String>) -> Uuid {
        self.trigger(AlertLevel::Danger, message)
    }

    /// Oldest first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.borrow().iter().cloned().collect()
    }

    /// Drops expired alerts from the front of the queue and returns how many were dropped.
    pub fn prune(&self, now: Instant) -> usize {
        let mut alerts = self.alerts.borrow_mut();
        let mut dropped = 0;
        while alerts
            .front()
            .is_some_and(|alert| now.saturating_duration_since(alert.raised_at) >= self.ttl)
        {
            alerts.pop_front();
            dropped += 1;
        }
        dropped
    }

    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut alerts = self.alerts.borrow_mut();
        let before = alerts.len();
        alerts.retain(|alert| alert.id != id);
        alerts.len() != before
    }

    pub fn clear(&self) {
        self.alerts.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.alerts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.borrow().is_empty()
    }
}
