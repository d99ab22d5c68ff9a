//! Parsing of end-time offsets such as `1h`, `30m` or `1h30m`.
//!
//! The accepted syntax is a sequence of `<decimal><unit>` terms with units
//! `ns`, `us` (`µs`), `ms`, `s`, `m` and `h`. Fractions are allowed (`1.5h`)
//! and a bare `0` means zero. Negative offsets are rejected because an alert
//! cannot end before it starts.

use std::time::Duration;

use crate::error::{AlertError, Result};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Fractional digits beyond this precision are ignored.
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parses a duration string like `1h`, `15s` or `1h30m`.
///
/// # Errors
///
/// Returns `AlertError::InvalidDuration` if the string is empty, negative,
/// has a term without a unit, uses an unknown unit, or overflows.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = |reason: String| AlertError::InvalidDuration {
        input: input.to_string(),
        reason,
    };

    let mut rest = input;
    if let Some(unsigned) = rest.strip_prefix('+') {
        rest = unsigned;
    } else if rest.starts_with('-') {
        return Err(invalid("negative durations are not supported".to_string()));
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration".to_string()));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid(format!("expected a number at {rest:?}")));
        }

        let unit_end = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, remainder) = after_number.split_at(unit_end);
        if unit.is_empty() {
            return Err(invalid("missing unit".to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| invalid(format!("unknown unit {unit:?}")))?;

        let overflow = || invalid("duration out of range".to_string());

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let mut term = whole.checked_mul(scale).ok_or_else(overflow)?;

        if !fraction.is_empty() {
            let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
            let numerator: u128 = digits.parse().map_err(|_| overflow())?;
            let denominator = 10u128.pow(digits.len() as u32);
            term = term
                .checked_add(numerator * scale / denominator)
                .ok_or_else(overflow)?;
        }

        total = total.checked_add(term).ok_or_else(overflow)?;
        rest = remainder;
    }

    let nanos = u64::try_from(total).map_err(|_| invalid("duration out of range".to_string()))?;
    Ok(Duration::from_nanos(nanos))
}
