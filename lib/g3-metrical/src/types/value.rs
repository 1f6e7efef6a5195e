/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;

const SIGNIFICANT_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Double(f64),
    Signed(i64),
    Unsigned(u64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Double(f) => *f,
            MetricValue::Signed(i) => *i as f64,
            MetricValue::Unsigned(u) => *u as f64,
        }
    }

    /// Integers as plain decimal, floats with 4 significant digits.
    pub(crate) fn display_simple(&self) -> DisplaySimpleValue<'_> {
        DisplaySimpleValue(self)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),+) => {
        $(
            impl From<$t> for MetricValue {
                fn from(v: $t) -> Self {
                    MetricValue::Signed(v as i64)
                }
            }
        )+
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),+) => {
        $(
            impl From<$t> for MetricValue {
                fn from(v: $t) -> Self {
                    MetricValue::Unsigned(v as u64)
                }
            }
        )+
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::Double(f64::from(v))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Double(v)
    }
}

pub(crate) struct DisplaySimpleValue<'a>(&'a MetricValue);

impl fmt::Display for DisplaySimpleValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            MetricValue::Unsigned(u) => f.write_str(itoa::Buffer::new().format(*u)),
            MetricValue::Signed(i) => f.write_str(itoa::Buffer::new().format(*i)),
            MetricValue::Double(v) => fmt_significant(*v, f),
        }
    }
}

/// Same layout as the `%.4g` conversion: fixed notation if the rounded value
/// is in [1e-4, 1e4), otherwise `d.ddde+XX`.
///
/// Rounding is half up on the shortest decimal digits that represent `v`, not
/// on its exact binary value, so 1.0005 gives 1.001.
fn fmt_significant(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return if v > 0.0 {
            f.write_str("Infinity")
        } else {
            f.write_str("-Infinity")
        };
    }
    if v == 0.0 {
        return write!(f, "{v:.prec$}", prec = SIGNIFICANT_DIGITS - 1);
    }

    let shortest = format!("{:e}", v.abs());
    let Some((mantissa, exp)) = shortest.split_once('e') else {
        return f.write_str(&shortest);
    };
    let mut exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
    let mut digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let round_up = digits
        .get(SIGNIFICANT_DIGITS)
        .is_some_and(|d| *d >= b'5');
    digits.resize(SIGNIFICANT_DIGITS, b'0');
    if round_up && !increment_digits(&mut digits) {
        // 9.9995 goes to 1.000e1, the exponent is taken after rounding
        digits.rotate_right(1);
        digits[0] = b'1';
        exp += 1;
    }

    let mut out = String::with_capacity(SIGNIFICANT_DIGITS + 8);
    if v < 0.0 {
        out.push('-');
    }
    let push_digits = |out: &mut String, digits: &[u8]| {
        out.extend(digits.iter().map(|d| char::from(*d)));
    };
    if (-4..SIGNIFICANT_DIGITS as i32).contains(&exp) {
        if exp < 0 {
            out.push_str("0.");
            for _ in 0..(-exp - 1) {
                out.push('0');
            }
            push_digits(&mut out, &digits);
        } else {
            let int_len = exp as usize + 1;
            push_digits(&mut out, &digits[..int_len]);
            if int_len < SIGNIFICANT_DIGITS {
                out.push('.');
                push_digits(&mut out, &digits[int_len..]);
            }
        }
        f.write_str(&out)
    } else {
        push_digits(&mut out, &digits[..1]);
        out.push('.');
        push_digits(&mut out, &digits[1..]);
        if exp < 0 {
            write!(f, "{out}e-{:02}", -exp)
        } else {
            write!(f, "{out}e+{exp:02}")
        }
    }
}

/// Add one unit in the last place. Returns false if all digits were 9, in
/// which case they are all 0 now.
fn increment_digits(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return true;
        }
    }
    false
}
