/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::time::Duration;

use crate::format::MetricalFormatterKind;
use crate::{
    ArcMetricalHandler, ArcTimeSource, DEFAULT_ROTATE_SIZE_LIMIT, DEFAULT_ROTATE_TIME_LIMIT,
    ForkHandler, NullHandler, OutputBackendBuilder, TextOutputHandler,
};

#[cfg(feature = "yaml")]
mod yaml;

#[derive(Clone, Debug)]
pub struct TextOutputConfig {
    backend: OutputBackendBuilder,
    formatter: MetricalFormatterKind,
    rotate_size_limit: usize,
    rotate_time_limit: Duration,
}

impl Default for TextOutputConfig {
    fn default() -> Self {
        TextOutputConfig::new(OutputBackendBuilder::default())
    }
}

impl TextOutputConfig {
    pub fn new(backend: OutputBackendBuilder) -> Self {
        TextOutputConfig {
            backend,
            formatter: MetricalFormatterKind::default(),
            rotate_size_limit: DEFAULT_ROTATE_SIZE_LIMIT,
            rotate_time_limit: DEFAULT_ROTATE_TIME_LIMIT,
        }
    }

    pub fn set_backend(&mut self, backend: OutputBackendBuilder) {
        self.backend = backend;
    }

    pub fn set_namespace(&mut self, namespace: String) {
        self.formatter = MetricalFormatterKind::Simple(namespace);
    }

    pub fn set_rotate_size_limit(&mut self, limit: usize) {
        self.rotate_size_limit = limit;
    }

    pub fn set_rotate_time_limit(&mut self, limit: Duration) {
        self.rotate_time_limit = limit;
    }

    #[inline]
    pub fn backend(&self) -> &OutputBackendBuilder {
        &self.backend
    }

    #[inline]
    pub fn formatter(&self) -> &MetricalFormatterKind {
        &self.formatter
    }

    #[inline]
    pub fn rotate_size_limit(&self) -> usize {
        self.rotate_size_limit
    }

    #[inline]
    pub fn rotate_time_limit(&self) -> Duration {
        self.rotate_time_limit
    }

    pub fn build(&self, time: ArcTimeSource) -> TextOutputHandler {
        TextOutputHandler::new(self.backend.clone(), time)
            .with_formatter(self.formatter.build())
            .with_rotate_size_limit(self.rotate_size_limit)
            .with_rotate_time_limit(self.rotate_time_limit)
    }
}

#[derive(Clone, Debug)]
pub enum MetricalHandlerConfig {
    Null,
    Text(TextOutputConfig),
    Fork(Vec<MetricalHandlerConfig>),
}

impl Default for MetricalHandlerConfig {
    fn default() -> Self {
        MetricalHandlerConfig::Text(TextOutputConfig::default())
    }
}

impl MetricalHandlerConfig {
    pub fn build(&self, time: &ArcTimeSource) -> ArcMetricalHandler {
        match self {
            MetricalHandlerConfig::Null => Arc::new(NullHandler),
            MetricalHandlerConfig::Text(config) => Arc::new(config.build(time.clone())),
            MetricalHandlerConfig::Fork(configs) => {
                let handlers = configs.iter().map(|c| c.build(time)).collect();
                Arc::new(ForkHandler::new(handlers))
            }
        }
    }
}
