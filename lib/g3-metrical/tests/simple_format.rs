/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::time::Duration;

use g3_metrical::{
    CaptureBuffer, ManualTimeSource, MetricalClient, MetricalDimension, OutputBackendBuilder,
    TextOutputHandler, Unit, context, dimension, metric, text_dimension,
};

const MOCK_TIME: i64 = 1_400_000_000_000;

struct Fixture {
    time: Arc<ManualTimeSource>,
    buf: CaptureBuffer,
    client: MetricalClient,
}

impl Fixture {
    fn new() -> Self {
        Self::with_size_limit(g3_metrical::DEFAULT_ROTATE_SIZE_LIMIT)
    }

    fn with_size_limit(limit: usize) -> Self {
        let time = Arc::new(ManualTimeSource::new(MOCK_TIME));
        let buf = CaptureBuffer::default();
        let handler =
            TextOutputHandler::new(OutputBackendBuilder::Capture(buf.clone()), time.clone())
                .with_rotate_size_limit(limit);
        let client = MetricalClient::new(Arc::new(handler)).with_time_source(time.clone());
        Fixture { time, buf, client }
    }
}

fn platform() -> g3_metrical::MetricalContext {
    context(
        "platform",
        true,
        [
            text_dimension("screen-size", "1024x768"),
            dimension("ram", 1, Unit::Gigabytes),
        ],
    )
}

fn request() -> g3_metrical::MetricalContext {
    context(
        "request",
        false,
        [
            text_dimension("operation", "get"),
            text_dimension("type", "my-type"),
        ],
    )
}

#[test]
fn simple_event() {
    let f = Fixture::new();
    f.client.bare_event("my-event");
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @e:1400000000000:my-event:\n"
    );
}

#[test]
fn integer_event() {
    let f = Fixture::new();
    f.client
        .event("my-event", [metric("my-metric", 10, Unit::Milliseconds)]);
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @e:1400000000000:my-event:\n\
         @m:1400000000000:my-event:my-metric:10:ms:\n"
    );
}

#[test]
fn float_event() {
    let f = Fixture::new();
    f.client
        .event("my-event", [metric("my-metric", 3.51471f32, Unit::Percent)]);
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @e:1400000000000:my-event:\n\
         @m:1400000000000:my-event:my-metric:3.515:%:\n"
    );
}

#[test]
fn multi_metric_event() {
    let f = Fixture::new();
    f.client.event(
        "my-event",
        [
            metric("metric1", 10, Unit::Milliseconds),
            metric("metric2", 3.5f32, Unit::Percent),
        ],
    );
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @e:1400000000000:my-event:\n\
         @m:1400000000000:my-event:metric1:10:ms:\n\
         @m:1400000000000:my-event:metric2:3.500:%:\n"
    );
}

#[test]
fn single_context_no_dimension() {
    let mut f = Fixture::new();
    f.client
        .add_contexts([context("platform", true, None::<MetricalDimension>)])
        .unwrap();
    f.client
        .event("my-event", [metric("metric1", 10, Unit::Milliseconds)]);
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @c:platform:g\n\
         @e:1400000000000:my-event:platform\n\
         @m:1400000000000:my-event:metric1:10:ms:platform\n"
    );
}

#[test]
fn single_context_dimension_values() {
    let mut f = Fixture::new();
    f.client
        .add_contexts([context(
            "platform",
            true,
            [
                text_dimension("screen-size", "1024x768"),
                dimension("ram", 4, Unit::Gigabytes),
                text_dimension("os", "Android"),
                text_dimension("os-version", "4.4.3"),
                dimension("swap", 2.4f32, Unit::Gigabytes),
                dimension("my-float", 98.2567f32, Unit::None),
                text_dimension("url", "http://example.net"),
            ],
        )])
        .unwrap();
    f.client
        .event("my-event", [metric("metric1", 10, Unit::Milliseconds)]);
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @c:platform:g\n\
         @d:platform:screen-size:1024x768:\n\
         @d:platform:ram:4:GB\n\
         @d:platform:os:Android:\n\
         @d:platform:os-version:4.4.3:\n\
         @d:platform:swap:2.400:GB\n\
         @d:platform:my-float:98.26:\n\
         @d:platform:url:http_//example.net:\n\
         @e:1400000000000:my-event:platform\n\
         @m:1400000000000:my-event:metric1:10:ms:platform\n"
    );
}

#[test]
fn multiple_contexts() {
    let mut f = Fixture::new();
    f.client.add_contexts([platform(), request()]).unwrap();
    f.client
        .event("my-event", [metric("metric1", 10, Unit::Milliseconds)]);
    assert_eq!(
        f.buf.take(),
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
fn derived_client_without_outer_context() {
    let f = Fixture::new();
    let derived = f.client.with_contexts([request()]).unwrap();

    derived.event("event1", [metric("metric1", 10, Unit::Milliseconds)]);
    f.client.event("event2", [metric("metric2", 1, Unit::Percent)]);
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @c:request:\n\
         @d:request:operation:get:\n\
         @d:request:type:my-type:\n\
         @e:1400000000000:event1:request\n\
         @m:1400000000000:event1:metric1:10:ms:request\n\
         @e:1400000000000:event2:\n\
         @m:1400000000000:event2:metric2:1:%:\n"
    );
}

#[test]
fn derived_client_with_outer_context() {
    let mut f = Fixture::new();
    f.client.add_contexts([platform()]).unwrap();
    f.client.event("event1", [metric("metric1", 1, Unit::Percent)]);

    let derived = f.client.with_contexts([request()]).unwrap();
    derived.event("event2", [metric("metric2", 10, Unit::Milliseconds)]);
    f.client.event("event3", [metric("metric3", 1, Unit::Percent)]);
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @c:platform:g\n\
         @d:platform:screen-size:1024x768:\n\
         @d:platform:ram:1:GB\n\
         @e:1400000000000:event1:platform\n\
         @m:1400000000000:event1:metric1:1:%:platform\n\
         @c:request:\n\
         @d:request:operation:get:\n\
         @d:request:type:my-type:\n\
         @e:1400000000000:event2:platform,request\n\
         @m:1400000000000:event2:metric2:10:ms:platform,request\n\
         @e:1400000000000:event3:platform\n\
         @m:1400000000000:event3:metric3:1:%:platform\n"
    );
}

#[test]
fn changed_context_emitted_again() {
    let f = Fixture::new();
    let c1 = f
        .client
        .with_contexts([context("request", false, [text_dimension("op", "get")])])
        .unwrap();
    let c2 = f
        .client
        .with_contexts([context("request", false, [text_dimension("op", "put")])])
        .unwrap();

    c1.bare_event("ev");
    c1.bare_event("ev");
    c2.bare_event("ev");
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @c:request:\n\
         @d:request:op:get:\n\
         @e:1400000000000:ev:request\n\
         @e:1400000000000:ev:request\n\
         @c:request:\n\
         @d:request:op:put:\n\
         @e:1400000000000:ev:request\n"
    );
}

#[test]
fn rotation_by_age() {
    let mut f = Fixture::new();
    f.client.add_contexts([platform()]).unwrap();
    f.client.event("event1", [metric("metric1", 1, Unit::Percent)]);

    f.time.set(MOCK_TIME + 1_000);
    f.client.event("event1", [metric("metric1", 5, Unit::Percent)]);

    f.time.set(MOCK_TIME + 600_000);
    f.client.event("event1", [metric("metric1", 2, Unit::Percent)]);

    assert_eq!(f.buf.sessions(), 2);
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @c:platform:g\n\
         @d:platform:screen-size:1024x768:\n\
         @d:platform:ram:1:GB\n\
         @e:1400000000000:event1:platform\n\
         @m:1400000000000:event1:metric1:1:%:platform\n\
         @e:1400000001000:event1:platform\n\
         @m:1400000001000:event1:metric1:5:%:platform\n\
         @v:restlessrobot.metrical:1\n\
         @c:platform:g\n\
         @d:platform:screen-size:1024x768:\n\
         @d:platform:ram:1:GB\n\
         @e:1400000600000:event1:platform\n\
         @m:1400000600000:event1:metric1:2:%:platform\n"
    );
}

#[test]
fn rotation_by_size() {
    let mut f = Fixture::with_size_limit(5);
    f.client
        .add_contexts([context("platform", true, None::<MetricalDimension>)])
        .unwrap();
    f.client.bare_event("event1");
    f.time.advance(Duration::from_secs(1));
    f.client.bare_event("event2");

    assert_eq!(f.buf.sessions(), 2);
    assert_eq!(
        f.buf.take(),
        "@v:restlessrobot.metrical:1\n\
         @c:platform:g\n\
         @e:1400000000000:event1:platform\n\
         @v:restlessrobot.metrical:1\n\
         @c:platform:g\n\
         @e:1400000001000:event2:platform\n"
    );
}
