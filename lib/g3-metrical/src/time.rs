/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;

/// Source of event timestamps and rotation clock, in milliseconds since the
/// unix epoch.
pub trait TimeSource: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub type ArcTimeSource = Arc<dyn TimeSource>;

/// Wall clock time source.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    pub fn new_arc() -> ArcTimeSource {
        Arc::new(SystemTimeSource)
    }
}

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A time source that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    millis: AtomicI64,
}

impl ManualTimeSource {
    pub fn new(millis: i64) -> Self {
        ManualTimeSource {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::Relaxed);
    }

    pub fn advance(&self, duration: Duration) {
        let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        let _ = self
            .millis
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
                Some(v.saturating_add(millis))
            });
    }
}

impl TimeSource for ManualTimeSource {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::Relaxed)
    }
}
