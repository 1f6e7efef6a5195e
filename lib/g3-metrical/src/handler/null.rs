/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use super::MetricalHandler;
use crate::{MetricalEvent, ReportError};

#[derive(Clone, Copy, Debug, Default)]
pub struct NullHandler;

impl MetricalHandler for NullHandler {
    fn event(&self, _event: &MetricalEvent) -> Result<(), ReportError> {
        Ok(())
    }

    fn finish(&self) {}

    fn reset(&self) -> Result<(), ReportError> {
        Ok(())
    }
}
