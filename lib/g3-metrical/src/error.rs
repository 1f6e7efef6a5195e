/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no contexts provided")]
    NoContexts,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to open metrics output: {0}")]
    OpenFailed(#[source] io::Error),
    #[error("failed to record event: {0}")]
    WriteFailed(#[source] io::Error),
}
