/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    #[default]
    None,
    Percent,
    Seconds,
    Milliseconds,
    PerSecond,
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl Unit {
    pub fn short_name(&self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Percent => "%",
            Unit::Seconds => "s",
            Unit::Milliseconds => "ms",
            Unit::PerSecond => "/s",
            Unit::Bytes => "B",
            Unit::Kilobytes => "kB",
            Unit::Megabytes => "MB",
            Unit::Gigabytes => "GB",
        }
    }

    pub fn is_time_unit(&self) -> bool {
        matches!(self, Unit::Seconds | Unit::Milliseconds)
    }
}
