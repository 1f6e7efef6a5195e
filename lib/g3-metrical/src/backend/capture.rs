/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct CaptureInner {
    text: Mutex<String>,
    sessions: AtomicUsize,
}

/// Shared in memory text output.
///
/// All sessions are appended to the same buffer; `sessions` tells how many
/// times the output has been opened.
#[derive(Clone, Debug, Default)]
pub struct CaptureBuffer {
    inner: Arc<CaptureInner>,
}

impl CaptureBuffer {
    fn lock_text(&self) -> MutexGuard<'_, String> {
        self.inner
            .text
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(super) fn append(&self, text: &str) {
        self.lock_text().push_str(text);
    }

    pub(super) fn add_session(&self) {
        self.inner.sessions.fetch_add(1, Ordering::Relaxed);
    }

    /// Return the captured text and clear the buffer.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.lock_text())
    }

    pub fn sessions(&self) -> usize {
        self.inner.sessions.load(Ordering::Relaxed)
    }
}
