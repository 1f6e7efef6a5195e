/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use log::{debug, warn};

use crate::ReportError;

/// Count handler errors and log at most one of them every 64s.
pub(super) struct ErrorSuppressor {
    create_instant: Instant,
    last_report: AtomicU64,
    count: AtomicU64,
}

impl Default for ErrorSuppressor {
    fn default() -> Self {
        ErrorSuppressor {
            create_instant: Instant::now(),
            last_report: AtomicU64::new(u64::MAX),
            count: AtomicU64::new(0),
        }
    }
}

impl ErrorSuppressor {
    pub(super) fn handle(&self, e: &ReportError) {
        self.count.fetch_add(1, Ordering::Relaxed);
        let time_slice = self.create_instant.elapsed().as_secs() >> 6; // every 64s
        if self.last_report.swap(time_slice, Ordering::Relaxed) != time_slice {
            warn!("metrics reporting error: {e}");
        } else {
            debug!("metrics reporting error: {e}");
        }
    }

    pub(super) fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
