//! Duration literals.
//!
//! A duration literal is a sum of decimal numbers, each with an optional
//! fraction and a mandatory unit, such as `300ms`, `1.5s` or `1h30m`. Valid
//! units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` is also
//! accepted. Durations are unsigned.
//!
//! The module can also be used with `#[serde(with = "linecfg::duration")]` to
//! write a [`Duration`] field as a literal:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use std::time::Duration;
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Client {
//!     #[serde(with = "linecfg::duration")]
//!     timeout: Duration,
//! }
//!
//! let client = Client { timeout: Duration::from_millis(1500) };
//! let line = linecfg::to_string(&client).unwrap();
//! assert_eq!(line, "timeout=1.5s");
//! assert_eq!(linecfg::from_str::<Client>(&line).unwrap(), client);
//! ```

use crate::{Error, Result};
use serde::{de, Deserialize, Deserializer, Serializer};
use std::fmt::Write;
use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

// Fraction digits past this many cannot change a nanosecond count.
const MAX_FRACTION_DIGITS: usize = 21;

const TYPE_NAME: &str = "Duration";

/// Parses a duration literal.
///
/// # Examples
///
/// ```rust
/// use linecfg::duration::parse;
/// use std::time::Duration;
///
/// assert_eq!(parse("5s").unwrap(), Duration::from_secs(5));
/// assert_eq!(parse("1h30m").unwrap(), Duration::from_secs(5400));
/// assert_eq!(parse("1.5ms").unwrap(), Duration::from_micros(1500));
/// assert!(parse("5").is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::UnmarshalType`] when the literal is malformed, negative,
/// has an unknown unit, or overflows.
pub fn parse(literal: &str) -> Result<Duration> {
    let invalid = || Error::unmarshal_type(literal, TYPE_NAME);

    let mut rest = literal.strip_prefix('+').unwrap_or(literal);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        rest = tail;

        let mut fraction = "";
        if let Some(tail) = rest.strip_prefix('.') {
            let (digits, tail) = split_digits(tail);
            fraction = digits;
            rest = tail;
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let scale = unit_scale(&rest[..unit_end]).ok_or_else(invalid)?;
        rest = &rest[unit_end..];

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(invalid)?;

        if !fraction.is_empty() {
            let mut numerator: u128 = 0;
            let mut denominator: u128 = 1;
            for digit in fraction.bytes().take(MAX_FRACTION_DIGITS) {
                numerator = numerator * 10 + u128::from(digit - b'0');
                denominator *= 10;
            }
            nanos = nanos
                .checked_add(numerator * scale / denominator)
                .ok_or_else(invalid)?;
        }

        total = total.checked_add(nanos).ok_or_else(invalid)?;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| invalid())?;
    // Always below one billion.
    let subsec = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, subsec))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Formats a duration as its canonical literal.
///
/// Durations under one second use the largest fitting sub-second unit.
/// Longer durations are written as hours, minutes and (fractional) seconds.
///
/// # Examples
///
/// ```rust
/// use linecfg::duration::format;
/// use std::time::Duration;
///
/// assert_eq!(format(Duration::ZERO), "0s");
/// assert_eq!(format(Duration::from_millis(300)), "300ms");
/// assert_eq!(format(Duration::from_millis(1500)), "1.5s");
/// assert_eq!(format(Duration::from_secs(5400)), "1h30m0s");
/// ```
pub fn format(duration: Duration) -> String {
    let mut out = String::new();
    write_duration(&mut out, duration);
    out
}

pub(crate) fn write_duration(out: &mut String, duration: Duration) {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        out.push_str("0s");
        return;
    }
    if nanos < NANOS_PER_MICRO {
        let _ = write!(out, "{}ns", nanos);
        return;
    }
    if nanos < NANOS_PER_MILLI {
        write_fraction(out, nanos, NANOS_PER_MICRO, 3);
        out.push_str("\u{00b5}s");
        return;
    }
    if nanos < NANOS_PER_SEC {
        write_fraction(out, nanos, NANOS_PER_MILLI, 6);
        out.push_str("ms");
        return;
    }

    let secs = duration.as_secs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    let rem = u128::from(secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos());
    write_fraction(out, rem, NANOS_PER_SEC, 9);
    out.push('s');
}

fn write_fraction(out: &mut String, value: u128, unit: u128, digits: usize) {
    let whole = value / unit;
    let rem = value % unit;
    let _ = write!(out, "{}", whole);
    if rem != 0 {
        let fraction = format!("{:0width$}", rem, width = digits);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
}

/// Serializes a [`Duration`] as a literal, for `#[serde(with = "linecfg::duration")]`.
pub fn serialize<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if duration.is_zero() {
        // Zero durations share the omission rule of other zero scalars.
        return serializer.serialize_str("");
    }
    serializer.serialize_str(&format(*duration))
}

/// Deserializes a [`Duration`] from a literal, for `#[serde(with = "linecfg::duration")]`.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let literal = String::deserialize(deserializer)?;
    if literal.is_empty() {
        return Ok(Duration::ZERO);
    }
    parse(&literal).map_err(|_| {
        de::Error::invalid_value(de::Unexpected::Str(&literal), &"a duration such as 5s")
    })
}
