/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use super::{MetricValue, MetricalContext, MetricalMetric, Unit};
use crate::TimeSource;

/// One reported occurrence.
///
/// An event has a name and a timestamp, zero or more metrics, and the
/// contexts that were active when it was created.
#[derive(Clone, Debug)]
pub struct MetricalEvent {
    name: String,
    metrics: Vec<MetricalMetric>,
    contexts: Vec<MetricalContext>,
    timestamp: i64,
}

impl MetricalEvent {
    pub fn builder(name: impl Into<String>) -> MetricalEventBuilder {
        MetricalEventBuilder::new(name)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn metrics(&self) -> &[MetricalMetric] {
        &self.metrics
    }

    #[inline]
    pub fn contexts(&self) -> &[MetricalContext] {
        &self.contexts
    }

    /// Creation time in milliseconds since the unix epoch
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

pub struct MetricalEventBuilder {
    name: String,
    metrics: Vec<MetricalMetric>,
    contexts: Vec<MetricalContext>,
}

impl MetricalEventBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        MetricalEventBuilder {
            name: name.into(),
            metrics: Vec::new(),
            contexts: Vec::new(),
        }
    }

    pub fn push_metric(&mut self, metric: MetricalMetric) {
        self.metrics.push(metric);
    }

    pub fn with_metric(mut self, metric: MetricalMetric) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_value<V: Into<MetricValue>>(
        self,
        name: impl Into<String>,
        value: V,
        unit: Unit,
    ) -> Self {
        self.with_metric(MetricalMetric::new(name, value, unit))
    }

    pub fn with_contexts<I>(mut self, contexts: I) -> Self
    where
        I: IntoIterator<Item = MetricalContext>,
    {
        self.contexts.extend(contexts);
        self
    }

    pub fn build(self, time: &dyn TimeSource) -> MetricalEvent {
        self.build_at(time.now_millis())
    }

    pub fn build_at(self, timestamp: i64) -> MetricalEvent {
        MetricalEvent {
            name: self.name,
            metrics: self.metrics,
            contexts: self.contexts,
            timestamp,
        }
    }
}
