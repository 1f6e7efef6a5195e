/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod unit;
pub use unit::Unit;

mod value;
pub use value::MetricValue;

mod dimension;
pub use dimension::{DimensionValue, MetricalDimension};

mod context;
pub use context::{MetricalContext, MetricalContextBuilder};

mod metric;
pub use metric::MetricalMetric;

mod event;
pub use event::{MetricalEvent, MetricalEventBuilder};
