/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

pub mod format;

mod timestamp;
pub use timestamp::{format_utc_millis, utc_from_millis};
