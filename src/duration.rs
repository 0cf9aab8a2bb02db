//! Compact duration strings (`1d2h3m4s`).
//!
//! The grammar is one or more `<digits><unit>` pairs with no separators,
//! where the unit is one of `d`, `h`, `m` or `s`. Anything else is rejected
//! as a whole; a prefix that happens to be valid is never returned.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::DurationError;

static DURATION_FULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+[dhms])+$").expect("valid regex"));

static DURATION_EACH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)([dhms])").expect("valid regex"));

const SECONDS_PER_UNIT: [(&str, u64); 4] = [("d", 86_400), ("h", 3_600), ("m", 60), ("s", 1)];

/// Parse a compact duration string into the sum of its components.
///
/// # Errors
///
/// Returns `DurationError::InvalidDuration` if the input does not fully match
/// the grammar or if the total overflows.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use migalert::duration::parse_duration;
///
/// assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5_400));
/// assert!(parse_duration("6ms").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::InvalidDuration(input.to_string());

    if !DURATION_FULL.is_match(input) {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    for caps in DURATION_EACH.captures_iter(input) {
        let quantity: u64 = caps[1].parse().map_err(|_| invalid())?;
        let per_unit = SECONDS_PER_UNIT
            .iter()
            .find(|(unit, _)| *unit == &caps[2])
            .map(|(_, secs)| *secs)
            .ok_or_else(invalid)?;
        total = quantity
            .checked_mul(per_unit)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(invalid)?;
    }

    Ok(Duration::from_secs(total))
}

/// Parse a rule-group evaluation interval.
///
/// Accepts the compact grammar of [`parse_duration`] and, failing that,
/// anything `humantime` understands (`1h 30m`, `90sec`, `1day`).
///
/// # Errors
///
/// Returns the compact-grammar error when neither parser accepts the input.
pub fn parse_interval(input: &str) -> Result<Duration, DurationError> {
    parse_duration(input).or_else(|err| humantime::parse_duration(input).map_err(|_| err))
}
