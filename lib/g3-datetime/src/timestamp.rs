/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use chrono::{DateTime, Utc};

use crate::format::std::RFC3339_FIXED_MILLISECOND;

/// Convert milliseconds since the unix epoch to a UTC datetime.
///
/// Returns `None` if the value is out of the range chrono could represent.
pub fn utc_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Format a unix epoch millisecond timestamp in RFC3339 format with fixed
/// millisecond precision and a `Z` suffix.
pub fn format_utc_millis(millis: i64) -> Option<String> {
    let datetime = utc_from_millis(millis)?;
    Some(
        datetime
            .format_with_items(RFC3339_FIXED_MILLISECOND.iter())
            .to_string(),
    )
}
