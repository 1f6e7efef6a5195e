/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};

use super::MetricalHandler;
use crate::backend::{OutputBackend, OutputBackendBuilder};
use crate::format::{BoxMetricalFormatter, MetricalFormatterKind};
use crate::{ArcTimeSource, MetricalEvent, ReportError};

pub const DEFAULT_ROTATE_SIZE_LIMIT: usize = 50 * 1024;
pub const DEFAULT_ROTATE_TIME_LIMIT: Duration = Duration::from_secs(5 * 60);

struct TextOutputState {
    formatter: BoxMetricalFormatter,
    backend: Option<OutputBackend>,
    chars_since_reset: u64,
    /// 0 if no session has been written to since the last reset
    last_reset_time: i64,
}

impl TextOutputState {
    fn close_backend(&mut self) {
        if let Some(mut backend) = self.backend.take()
            && let Err(e) = backend.flush()
        {
            warn!("failed to flush metrics output: {e}");
        }
    }

    /// End the current session. The formatter memory and the output are
    /// always dropped together, the next write opens a new output.
    fn reset(&mut self) {
        self.chars_since_reset = 0;
        self.last_reset_time = 0;
        self.formatter.reset();
        self.close_backend();
    }

    fn write(
        &mut self,
        text: &str,
        builder: &OutputBackendBuilder,
        now: i64,
    ) -> Result<(), ReportError> {
        let mut backend = match self.backend.take() {
            Some(backend) => backend,
            None => builder.build(now).map_err(ReportError::OpenFailed)?,
        };
        let r = backend.write_text(text);
        self.backend = Some(backend);
        r.map_err(ReportError::WriteFailed)
    }
}

/// Format events as text and write them to an output that is rotated by size
/// and by age.
///
/// The session is reset when the current output has been used for longer
/// than the time limit or when the next event would take it over the size
/// limit. A new output is only opened by the first write after a reset, so a
/// reset alone leaves nothing behind. The text of one event is never split
/// across two outputs, so an event larger than the size limit still goes into
/// an empty output as a whole.
pub struct TextOutputHandler {
    backend_builder: OutputBackendBuilder,
    time: ArcTimeSource,
    rotate_size_limit: u64,
    rotate_time_limit: i64,
    state: Mutex<TextOutputState>,
}

impl TextOutputHandler {
    pub fn new(backend_builder: OutputBackendBuilder, time: ArcTimeSource) -> Self {
        TextOutputHandler {
            backend_builder,
            time,
            rotate_size_limit: DEFAULT_ROTATE_SIZE_LIMIT as u64,
            rotate_time_limit: DEFAULT_ROTATE_TIME_LIMIT.as_millis() as i64,
            state: Mutex::new(TextOutputState {
                formatter: MetricalFormatterKind::default().build(),
                backend: None,
                chars_since_reset: 0,
                last_reset_time: 0,
            }),
        }
    }

    pub fn with_formatter(mut self, formatter: BoxMetricalFormatter) -> Self {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.formatter = formatter;
        self
    }

    /// Size limit in chars
    pub fn with_rotate_size_limit(mut self, limit: usize) -> Self {
        self.rotate_size_limit = limit as u64;
        self
    }

    pub fn with_rotate_time_limit(mut self, limit: Duration) -> Self {
        self.rotate_time_limit = i64::try_from(limit.as_millis()).unwrap_or(i64::MAX);
        self
    }

    fn lock_state(&self) -> MutexGuard<'_, TextOutputState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Chars written to the current output
    pub fn chars_since_reset(&self) -> u64 {
        self.lock_state().chars_since_reset
    }

    /// Time of the first write to the current output, 0 if not written yet
    pub fn last_reset_time(&self) -> i64 {
        self.lock_state().last_reset_time
    }

    /// Path of the current output file, if the output is a file
    pub fn current_path(&self) -> Option<PathBuf> {
        self.lock_state()
            .backend
            .as_ref()
            .and_then(|b| b.path())
            .map(|p| p.to_path_buf())
    }
}

impl MetricalHandler for TextOutputHandler {
    fn event(&self, event: &MetricalEvent) -> Result<(), ReportError> {
        let mut state = self.lock_state();
        let now = self.time.now_millis();

        if state.last_reset_time == 0 {
            state.reset();
        } else if now - state.last_reset_time > self.rotate_time_limit {
            debug!(
                "metrics output opened at {} expired, rotate",
                state.last_reset_time
            );
            state.reset();
        }

        let mut text = state.formatter.format_event(event);
        let mut length = text.chars().count() as u64;
        if state.chars_since_reset > 0
            && state.chars_since_reset + length > self.rotate_size_limit
        {
            debug!(
                "metrics output will exceed {} chars, rotate",
                self.rotate_size_limit
            );
            state.reset();

            // the formatter memory is clean now, the text may differ
            text = state.formatter.format_event(event);
            length = text.chars().count() as u64;
        }

        if let Err(e) = state.write(&text, &self.backend_builder, now) {
            // the formatter has recorded contexts that never reached the output
            state.reset();
            return Err(e);
        }
        state.chars_since_reset += length;
        if state.last_reset_time == 0 {
            state.last_reset_time = now;
        }
        Ok(())
    }

    fn finish(&self) {
        self.lock_state().reset();
    }

    fn reset(&self) -> Result<(), ReportError> {
        self.lock_state().reset();
        Ok(())
    }
}
