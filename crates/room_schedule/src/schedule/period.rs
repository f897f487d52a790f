//! Parsing of the upstream `Period` field ("HH:MM:SS-HH:MM:SS").

use super::types::ClockTime;
use regex::Regex;
use std::sync::LazyLock;

// Start seconds are matched but discarded. Anything after the end minute,
// including its seconds, is ignored.
static PERIOD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{1,2}):\d+\s*-\s*(\d{1,2}):(\d{1,2})").unwrap());

/// A lesson's time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: ClockTime,
    pub end: ClockTime,
}

/// Parses a period string into its start and end times.
///
/// Returns `None` unless all four hour/minute captures are present and in
/// range. Trailing text after the end minute is accepted, so
/// `"09:00:00-10:30"` and `"09:00:00-10:30:00Z"` both parse. No ordering
/// between start and end is enforced.
pub fn parse_period(raw: &str) -> Option<Period> {
    let caps = PERIOD_REGEX.captures(raw)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u8>().ok());

    let start = ClockTime::new(num(1)?, num(2)?)?;
    let end = ClockTime::new(num(3)?, num(4)?)?;

    Some(Period { start, end })
}
