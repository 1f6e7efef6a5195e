/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod error;
pub use error::{ConfigError, ReportError};

mod time;
pub use time::{ArcTimeSource, ManualTimeSource, SystemTimeSource, TimeSource};

mod types;
pub use types::{
    DimensionValue, MetricValue, MetricalContext, MetricalContextBuilder, MetricalDimension,
    MetricalEvent, MetricalEventBuilder, MetricalMetric, Unit,
};

pub mod format;

mod backend;
pub use backend::{CaptureBuffer, FileOutputConfig, OutputBackendBuilder};

mod handler;
pub use handler::{
    ArcMetricalHandler, DEFAULT_ROTATE_SIZE_LIMIT, DEFAULT_ROTATE_TIME_LIMIT, ForkHandler,
    MetricalHandler, NullHandler, TextOutputHandler,
};

mod client;
pub use client::{MetricalClient, context, dimension, metric, text_dimension};

mod config;
pub use config::{MetricalHandlerConfig, TextOutputConfig};
