/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use crate::{MetricalEvent, ReportError};

mod text;
pub use text::{DEFAULT_ROTATE_SIZE_LIMIT, DEFAULT_ROTATE_TIME_LIMIT, TextOutputHandler};

mod fork;
pub use fork::ForkHandler;

mod null;
pub use null::NullHandler;

pub trait MetricalHandler: Send + Sync {
    fn event(&self, event: &MetricalEvent) -> Result<(), ReportError>;

    /// Flush and release any output. No further events are expected, but the
    /// handler should still work if there are.
    fn finish(&self);

    fn reset(&self) -> Result<(), ReportError>;
}

pub type ArcMetricalHandler = Arc<dyn MetricalHandler>;
