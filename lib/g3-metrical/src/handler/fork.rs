/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use log::debug;

use super::{ArcMetricalHandler, MetricalHandler};
use crate::{MetricalEvent, ReportError};

/// Send every call to all the child handlers, in order.
///
/// All children are always called. If some of them fail, the error of the
/// first failed one is returned.
pub struct ForkHandler {
    handlers: Vec<ArcMetricalHandler>,
}

impl ForkHandler {
    pub fn new(handlers: Vec<ArcMetricalHandler>) -> Self {
        ForkHandler { handlers }
    }

    fn for_each<F>(&self, f: F) -> Result<(), ReportError>
    where
        F: Fn(&ArcMetricalHandler) -> Result<(), ReportError>,
    {
        let mut first_error = None;
        for (i, handler) in self.handlers.iter().enumerate() {
            if let Err(e) = f(handler) {
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    debug!("metrics handler #{i} also failed: {e}");
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl MetricalHandler for ForkHandler {
    fn event(&self, event: &MetricalEvent) -> Result<(), ReportError> {
        self.for_each(|h| h.event(event))
    }

    fn finish(&self) {
        for handler in &self.handlers {
            handler.finish();
        }
    }

    fn reset(&self) -> Result<(), ReportError> {
        self.for_each(|h| h.reset())
    }
}
