/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use super::{MetricValue, Unit};

#[derive(Clone, Debug, PartialEq)]
pub struct MetricalMetric {
    name: String,
    value: MetricValue,
    unit: Unit,
}

impl MetricalMetric {
    pub fn new<V: Into<MetricValue>>(name: impl Into<String>, value: V, unit: Unit) -> Self {
        MetricalMetric {
            name: name.into(),
            value: value.into(),
            unit,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> MetricValue {
        self.value
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }
}
