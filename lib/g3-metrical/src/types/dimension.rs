/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use super::{MetricValue, Unit};

#[derive(Clone, Debug, PartialEq)]
pub enum DimensionValue {
    Text(String),
    Number(MetricValue),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricalDimension {
    name: String,
    value: DimensionValue,
    unit: Unit,
}

impl MetricalDimension {
    pub fn new<V: Into<MetricValue>>(name: impl Into<String>, value: V, unit: Unit) -> Self {
        MetricalDimension {
            name: name.into(),
            value: DimensionValue::Number(value.into()),
            unit,
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        MetricalDimension {
            name: name.into(),
            value: DimensionValue::Text(value.into()),
            unit: Unit::None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &DimensionValue {
        &self.value
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }
}
