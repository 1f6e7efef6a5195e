/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    ArcMetricalHandler, ArcTimeSource, ConfigError, MetricValue, MetricalContext,
    MetricalDimension, MetricalEvent, MetricalMetric, SystemTimeSource, Unit,
};

mod suppress;
use suppress::ErrorSuppressor;

/// Entry point for application code.
///
/// The client attaches its contexts to every event and passes it to the
/// handler. Errors from the handler never reach the caller, they are logged
/// and counted.
#[derive(Clone)]
pub struct MetricalClient {
    handler: Option<ArcMetricalHandler>,
    time: ArcTimeSource,
    contexts: IndexMap<String, MetricalContext>,
    enabled: bool,
    errors: Arc<ErrorSuppressor>,
}

impl MetricalClient {
    pub fn new(handler: ArcMetricalHandler) -> Self {
        MetricalClient {
            handler: Some(handler),
            time: SystemTimeSource::new_arc(),
            contexts: IndexMap::new(),
            enabled: true,
            errors: Arc::new(ErrorSuppressor::default()),
        }
    }

    /// A client without handler, all events are dropped
    pub fn disabled() -> Self {
        MetricalClient {
            handler: None,
            time: SystemTimeSource::new_arc(),
            contexts: IndexMap::new(),
            enabled: false,
            errors: Arc::new(ErrorSuppressor::default()),
        }
    }

    pub fn with_time_source(mut self, time: ArcTimeSource) -> Self {
        self.time = time;
        self
    }

    /// Create a new client with the contexts of this one and `contexts` added.
    ///
    /// A context replaces any existing one with the same name. The two
    /// clients share the handler but their contexts are independent.
    pub fn with_contexts<I>(&self, contexts: I) -> Result<MetricalClient, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<Option<MetricalContext>>,
    {
        let mut client = self.clone();
        client.add_contexts(contexts)?;
        Ok(client)
    }

    /// Add contexts in place. `None` entries are ignored, but at least one
    /// entry is required.
    pub fn add_contexts<I>(&mut self, contexts: I) -> Result<(), ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<Option<MetricalContext>>,
    {
        let mut iter = contexts.into_iter().peekable();
        if iter.peek().is_none() {
            return Err(ConfigError::NoContexts);
        }
        for context in iter.filter_map(Into::into) {
            self.contexts.insert(context.name().to_string(), context);
        }
        Ok(())
    }

    pub fn remove_contexts<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.contexts.shift_remove(name.as_ref());
        }
    }

    pub fn contexts(&self) -> impl Iterator<Item = &MetricalContext> {
        self.contexts.values()
    }

    fn active_handler(&self) -> Option<&ArcMetricalHandler> {
        if self.enabled {
            self.handler.as_ref()
        } else {
            None
        }
    }

    /// Report an event with the given metrics. `None` entries are skipped.
    pub fn event<I>(&self, name: impl Into<String>, metrics: I)
    where
        I: IntoIterator,
        I::Item: Into<Option<MetricalMetric>>,
    {
        let Some(handler) = self.active_handler() else {
            return;
        };

        let mut builder = MetricalEvent::builder(name);
        for metric in metrics.into_iter().filter_map(Into::into) {
            builder.push_metric(metric);
        }
        let event = builder
            .with_contexts(self.contexts.values().cloned())
            .build(self.time.as_ref());
        if let Err(e) = handler.event(&event) {
            self.errors.handle(&e);
        }
    }

    /// Report an event without metrics
    pub fn bare_event(&self, name: impl Into<String>) {
        self.event(name, std::iter::empty::<MetricalMetric>());
    }

    /// Report an already built event, the contexts of the client are not used.
    pub fn report(&self, event: &MetricalEvent) {
        let Some(handler) = self.active_handler() else {
            return;
        };
        if let Err(e) = handler.event(event) {
            self.errors.handle(&e);
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn finish(&self) {
        if let Some(handler) = &self.handler {
            handler.finish();
        }
    }

    /// Number of handler errors swallowed by this client and the clients
    /// derived from it
    pub fn suppressed_errors(&self) -> u64 {
        self.errors.count()
    }
}

pub fn metric<V: Into<MetricValue>>(
    name: impl Into<String>,
    value: V,
    unit: Unit,
) -> MetricalMetric {
    MetricalMetric::new(name, value, unit)
}

pub fn dimension<V: Into<MetricValue>>(
    name: impl Into<String>,
    value: V,
    unit: Unit,
) -> MetricalDimension {
    MetricalDimension::new(name, value, unit)
}

pub fn text_dimension(name: impl Into<String>, value: impl Into<String>) -> MetricalDimension {
    MetricalDimension::text(name, value)
}

pub fn context<I>(name: impl Into<String>, global: bool, dimensions: I) -> MetricalContext
where
    I: IntoIterator,
    I::Item: Into<Option<MetricalDimension>>,
{
    MetricalContext::builder(name)
        .global(global)
        .with_dimensions(dimensions)
        .build()
}
