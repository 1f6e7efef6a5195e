/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use indexmap::IndexMap;

use super::{MetricValue, MetricalDimension, Unit};

#[derive(Debug, PartialEq)]
struct ContextInner {
    name: String,
    global: bool,
    dimensions: IndexMap<String, MetricalDimension>,
}

/// A named set of dimensions describing where a group of events come from.
///
/// Contexts are immutable and cheap to clone. Two contexts are equal if they
/// have the same name, the same global flag and the same dimensions.
#[derive(Clone, Debug)]
pub struct MetricalContext {
    inner: Arc<ContextInner>,
}

impl MetricalContext {
    pub fn builder(name: impl Into<String>) -> MetricalContextBuilder {
        MetricalContextBuilder::new(name)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[inline]
    pub fn is_global(&self) -> bool {
        self.inner.global
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &MetricalDimension> {
        self.inner.dimensions.values()
    }

    pub fn dimension(&self, name: &str) -> Option<&MetricalDimension> {
        self.inner.dimensions.get(name)
    }
}

impl PartialEq for MetricalContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

pub struct MetricalContextBuilder {
    name: String,
    global: bool,
    dimensions: IndexMap<String, MetricalDimension>,
}

impl MetricalContextBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        MetricalContextBuilder {
            name: name.into(),
            global: false,
            dimensions: IndexMap::new(),
        }
    }

    pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Add a dimension, replacing any previous one with the same name.
    pub fn with_dimension(mut self, dimension: MetricalDimension) -> Self {
        self.dimensions
            .insert(dimension.name().to_string(), dimension);
        self
    }

    pub fn with_dimensions<I>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<MetricalDimension>>,
    {
        for dimension in dimensions.into_iter().filter_map(Into::into) {
            self.dimensions
                .insert(dimension.name().to_string(), dimension);
        }
        self
    }

    pub fn with_text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_dimension(MetricalDimension::text(name, value))
    }

    pub fn with_number<V: Into<MetricValue>>(
        self,
        name: impl Into<String>,
        value: V,
        unit: Unit,
    ) -> Self {
        self.with_dimension(MetricalDimension::new(name, value, unit))
    }

    pub fn build(self) -> MetricalContext {
        MetricalContext {
            inner: Arc::new(ContextInner {
                name: self.name,
                global: self.global,
                dimensions: self.dimensions,
            }),
        }
    }
}
