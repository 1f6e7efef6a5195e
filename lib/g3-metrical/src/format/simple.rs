/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::HashMap;
use std::fmt::Write;

use super::MetricalFormatter;
use crate::{DimensionValue, MetricalContext, MetricalEvent};

pub const DEFAULT_NAMESPACE: &str = "restlessrobot.metrical";
pub const SIMPLE_FORMAT_VERSION: u32 = 1;

const LINE_PREFIX: char = '@';
const LINE_SEPARATOR: char = '\n';
const FIELD_DELIMITER: char = ':';
const CONTEXT_NAME_DELIMITER: char = ',';

const VERSION_KEY: char = 'v';
const CONTEXT_KEY: char = 'c';
const DIMENSION_KEY: char = 'd';
const EVENT_KEY: char = 'e';
const METRIC_KEY: char = 'm';
const CONTEXT_GLOBAL_FLAG: &str = "g";

/// Line oriented text format.
///
/// ```text
/// @v:<namespace>:<version>
/// @c:<context>:[g]
/// @d:<context>:<dimension>:<value>:<unit>
/// @e:<timestamp>:<event>:<context,...>
/// @m:<timestamp>:<event>:<metric>:<value>:<unit>:<context,...>
/// ```
///
/// The version line starts every session. Context and dimension lines are
/// only written when the context differs from the one last written with the
/// same name.
pub struct SimpleFormatter {
    namespace: String,
    version_line_done: bool,
    contexts_output: HashMap<String, MetricalContext>,
}

impl Default for SimpleFormatter {
    fn default() -> Self {
        SimpleFormatter::with_namespace(DEFAULT_NAMESPACE.to_string())
    }
}

impl SimpleFormatter {
    pub fn with_namespace(namespace: String) -> Self {
        SimpleFormatter {
            namespace,
            version_line_done: false,
            contexts_output: HashMap::new(),
        }
    }

    fn write_version(&self, buf: &mut String) {
        buf.push(LINE_PREFIX);
        buf.push(VERSION_KEY);
        buf.push(FIELD_DELIMITER);
        buf.push_str(&self.namespace);
        buf.push(FIELD_DELIMITER);
        buf.push_str(itoa::Buffer::new().format(SIMPLE_FORMAT_VERSION));
        buf.push(LINE_SEPARATOR);
    }

    fn write_context(buf: &mut String, context: &MetricalContext) {
        buf.push(LINE_PREFIX);
        buf.push(CONTEXT_KEY);
        buf.push(FIELD_DELIMITER);
        buf.push_str(context.name());
        buf.push(FIELD_DELIMITER);
        if context.is_global() {
            buf.push_str(CONTEXT_GLOBAL_FLAG);
        }
        buf.push(LINE_SEPARATOR);

        for dimension in context.dimensions() {
            buf.push(LINE_PREFIX);
            buf.push(DIMENSION_KEY);
            buf.push(FIELD_DELIMITER);
            buf.push_str(context.name());
            buf.push(FIELD_DELIMITER);
            buf.push_str(dimension.name());
            buf.push(FIELD_DELIMITER);
            match dimension.value() {
                DimensionValue::Text(s) => {
                    // the field delimiter should never appear in a value
                    buf.extend(s.chars().map(|c| if c == FIELD_DELIMITER { '_' } else { c }));
                }
                DimensionValue::Number(v) => {
                    let _ = write!(buf, "{}", v.display_simple());
                }
            }
            buf.push(FIELD_DELIMITER);
            buf.push_str(dimension.unit().short_name());
            buf.push(LINE_SEPARATOR);
        }
    }

    fn write_event(buf: &mut String, event: &MetricalEvent, context_names: &str) {
        let mut ts_buf = itoa::Buffer::new();
        let timestamp = ts_buf.format(event.timestamp());

        buf.push(LINE_PREFIX);
        buf.push(EVENT_KEY);
        buf.push(FIELD_DELIMITER);
        buf.push_str(timestamp);
        buf.push(FIELD_DELIMITER);
        buf.push_str(event.name());
        buf.push(FIELD_DELIMITER);
        buf.push_str(context_names);
        buf.push(LINE_SEPARATOR);

        for metric in event.metrics() {
            buf.push(LINE_PREFIX);
            buf.push(METRIC_KEY);
            buf.push(FIELD_DELIMITER);
            buf.push_str(timestamp);
            buf.push(FIELD_DELIMITER);
            buf.push_str(event.name());
            buf.push(FIELD_DELIMITER);
            buf.push_str(metric.name());
            buf.push(FIELD_DELIMITER);
            let _ = write!(buf, "{}", metric.value().display_simple());
            buf.push(FIELD_DELIMITER);
            buf.push_str(metric.unit().short_name());
            buf.push(FIELD_DELIMITER);
            buf.push_str(context_names);
            buf.push(LINE_SEPARATOR);
        }
    }
}

impl MetricalFormatter for SimpleFormatter {
    fn format_event(&mut self, event: &MetricalEvent) -> String {
        let mut buf = String::with_capacity(256);

        if !self.version_line_done {
            self.write_version(&mut buf);
            self.version_line_done = true;
        }

        let mut context_names = String::new();
        for context in event.contexts() {
            if self.contexts_output.get(context.name()) != Some(context) {
                self.contexts_output
                    .insert(context.name().to_string(), context.clone());
                SimpleFormatter::write_context(&mut buf, context);
            }

            if !context_names.is_empty() {
                context_names.push(CONTEXT_NAME_DELIMITER);
            }
            context_names.push_str(context.name());
        }

        SimpleFormatter::write_event(&mut buf, event, &context_names);
        buf
    }

    fn reset(&mut self) {
        self.contexts_output.clear();
        self.version_line_done = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MetricalDimension, Unit};

    const T: i64 = 1_400_000_000_000;

    fn platform() -> MetricalContext {
        MetricalContext::builder("platform")
            .global(true)
            .with_text("screen-size", "1024x768")
            .with_number("ram", 1, Unit::Gigabytes)
            .build()
    }

    #[test]
    fn version_once_per_session() {
        let mut formatter = SimpleFormatter::default();
        let event = MetricalEvent::builder("my-event").build_at(T);
        assert_eq!(
            formatter.format_event(&event),
            "@v:restlessrobot.metrical:1\n@e:1400000000000:my-event:\n"
        );
        assert_eq!(formatter.format_event(&event), "@e:1400000000000:my-event:\n");

        formatter.reset();
        assert_eq!(
            formatter.format_event(&event),
            "@v:restlessrobot.metrical:1\n@e:1400000000000:my-event:\n"
        );
    }

    #[test]
    fn custom_namespace() {
        let mut formatter = SimpleFormatter::with_namespace("g3.test".to_string());
        let event = MetricalEvent::builder("e").build_at(1);
        assert_eq!(formatter.format_event(&event), "@v:g3.test:1\n@e:1:e:\n");
    }

    #[test]
    fn metrics() {
        let mut formatter = SimpleFormatter::default();
        let event = MetricalEvent::builder("my-event")
            .with_value("metric1", 10, Unit::Milliseconds)
            .with_value("metric2", 3.5f32, Unit::Percent)
            .with_value("metric3", 7u64, Unit::None)
            .build_at(T);
        assert_eq!(
            formatter.format_event(&event),
            "@v:restlessrobot.metrical:1\n\
             @e:1400000000000:my-event:\n\
             @m:1400000000000:my-event:metric1:10:ms:\n\
             @m:1400000000000:my-event:metric2:3.500:%:\n\
             @m:1400000000000:my-event:metric3:7::\n"
        );
    }

    #[test]
    fn context_dedup() {
        let mut formatter = SimpleFormatter::default();
        let event = MetricalEvent::builder("event1")
            .with_value("metric1", 1, Unit::Percent)
            .with_contexts([platform()])
            .build_at(T);

        assert_eq!(
            formatter.format_event(&event),
            "@v:restlessrobot.metrical:1\n\
             @c:platform:g\n\
             @d:platform:screen-size:1024x768:\n\
             @d:platform:ram:1:GB\n\
             @e:1400000000000:event1:platform\n\
             @m:1400000000000:event1:metric1:1:%:platform\n"
        );
        assert_eq!(
            formatter.format_event(&event),
            "@e:1400000000000:event1:platform\n\
             @m:1400000000000:event1:metric1:1:%:platform\n"
        );
    }

    #[test]
    fn context_changed_with_same_name() {
        let mut formatter = SimpleFormatter::default();
        let c1 = MetricalContext::builder("request")
            .with_text("operation", "get")
            .build();
        let c2 = MetricalContext::builder("request")
            .with_text("operation", "put")
            .build();

        let _ = formatter.format_event(&MetricalEvent::builder("e").with_contexts([c1]).build_at(1));
        assert_eq!(
            formatter.format_event(&MetricalEvent::builder("e").with_contexts([c2.clone()]).build_at(2)),
            "@c:request:\n@d:request:operation:put:\n@e:2:e:request\n"
        );
        assert_eq!(
            formatter.format_event(&MetricalEvent::builder("e").with_contexts([c2]).build_at(3)),
            "@e:3:e:request\n"
        );
    }

    #[test]
    fn dimension_values() {
        let mut formatter = SimpleFormatter::default();
        let context = MetricalContext::builder("platform")
            .with_dimensions([
                MetricalDimension::text("time", "12:30:00"),
                MetricalDimension::new("ram", 2.4f32, Unit::Gigabytes),
                MetricalDimension::new("my-float", 98.2567f32, Unit::None),
            ])
            .build();
        let event = MetricalEvent::builder("e").with_contexts([context]).build_at(5);
        assert_eq!(
            formatter.format_event(&event),
            "@v:restlessrobot.metrical:1\n\
             @c:platform:\n\
             @d:platform:time:12_30_00:\n\
             @d:platform:ram:2.400:GB\n\
             @d:platform:my-float:98.26:\n\
             @e:5:e:platform\n"
        );
    }

    #[test]
    fn multiple_contexts() {
        let mut formatter = SimpleFormatter::default();
        let request = MetricalContext::builder("request")
            .with_text("operation", "get")
            .with_text("type", "my-type")
            .build();
        let event = MetricalEvent::builder("my-event")
            .with_value("metric1", 10, Unit::Milliseconds)
            .with_contexts([platform(), request])
            .build_at(T);
        assert_eq!(
            formatter.format_event(&event),
            "@v:restlessrobot.metrical:1\n\
             @c:platform:g\n\
             @d:platform:screen-size:1024x768:\n\
             @d:platform:ram:1:GB\n\
             @c:request:\n\
             @d:request:operation:get:\n\
             @d:request:type:my-type:\n\
             @e:1400000000000:my-event:platform,request\n\
             @m:1400000000000:my-event:metric1:10:ms:platform,request\n"
        );
    }

    #[test]
    fn kind_build() {
        let mut formatter = crate::format::MetricalFormatterKind::default().build();
        let event = MetricalEvent::builder("e").build_at(1);
        assert_eq!(
            formatter.format_event(&event),
            "@v:restlessrobot.metrical:1\n@e:1:e:\n"
        );
    }
}
