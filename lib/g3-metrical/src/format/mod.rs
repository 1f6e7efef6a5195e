/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use crate::MetricalEvent;

mod simple;
pub use simple::{DEFAULT_NAMESPACE, SIMPLE_FORMAT_VERSION, SimpleFormatter};

/// Turns an event, with its metrics and contexts, into text.
///
/// The text for one event may depend on previous events, e.g. a formatter may
/// choose not to repeat contexts that it has already returned.
pub trait MetricalFormatter {
    fn format_event(&mut self, event: &MetricalEvent) -> String;

    /// Forget everything learned from previous events. Later events will be
    /// formatted as if by a newly created formatter.
    fn reset(&mut self);
}

pub type BoxMetricalFormatter = Box<dyn MetricalFormatter + Send>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetricalFormatterKind {
    /// simple line format with namespace
    Simple(String),
}

impl Default for MetricalFormatterKind {
    fn default() -> Self {
        MetricalFormatterKind::Simple(DEFAULT_NAMESPACE.to_string())
    }
}

impl MetricalFormatterKind {
    pub fn build(&self) -> BoxMetricalFormatter {
        match self {
            MetricalFormatterKind::Simple(namespace) => {
                Box::new(SimpleFormatter::with_namespace(namespace.clone()))
            }
        }
    }
}
