// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Time sources for token issuance and expiry checks
//!
//! The token service never reads the wall clock directly. It asks a
//! [`Clock`], which is [`SystemClock`] in production and [`ManualClock`]
//! when a test or a simulation needs to move time forward.

use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;

/// A source of the current UTC time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use rust_todolist::auth::{Clock, ManualClock};
///
/// let clock = ManualClock::starting_now();
/// let before = clock.now();
/// clock.advance(Duration::seconds(86401));
/// assert_eq!((clock.now() - before).num_seconds(), 86401);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `instant`
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            current: RwLock::new(instant),
        }
    }

    /// Create a clock frozen at the current wall-clock time
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Move the clock forward (or backward with a negative duration)
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }

    /// Jump to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }
}
