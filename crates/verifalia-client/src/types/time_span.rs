/*
[INPUT]:  std Duration values and `[days.]hours:minutes:seconds` strings
[OUTPUT]: Time span strings and parsed Durations, plus serde adapters
[POS]:    Data layer - wire codec for retention / ETA / reset countdown fields
[UPDATE]: When the API changes its time span representation
*/

use std::time::Duration;

use crate::http::{Result, VerifaliaError};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Format a duration as `[days.]hours:minutes:seconds`.
///
/// Fields are unpadded; the `days.` prefix is only emitted when the span covers at least
/// one whole day. Sub-second precision is dropped.
pub fn format_time_span(duration: Duration) -> String {
    let mut remaining = duration.as_secs();

    let days = remaining / SECONDS_PER_DAY;
    remaining %= SECONDS_PER_DAY;
    let hours = remaining / SECONDS_PER_HOUR;
    remaining %= SECONDS_PER_HOUR;
    let minutes = remaining / SECONDS_PER_MINUTE;
    let seconds = remaining % SECONDS_PER_MINUTE;

    if days > 0 {
        format!("{days}.{hours}:{minutes}:{seconds}")
    } else {
        format!("{hours}:{minutes}:{seconds}")
    }
}

/// Parse a `[days.]hours:minutes:seconds` string.
///
/// Hours, minutes and seconds take one or two digits. A trailing fractional part on the
/// seconds (`0:0:5.1234567`) is accepted and truncated.
pub fn parse_time_span(value: &str) -> Result<Duration> {
    let invalid = || VerifaliaError::Decoding(format!("invalid time span: {value:?}"));

    let mut fields = value.trim().split(':');
    let (Some(head), Some(minutes), Some(seconds), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(invalid());
    };

    let (days, hours) = match head.split_once('.') {
        Some((days, hours)) => (parse_digits(days, 1, usize::MAX).ok_or_else(invalid)?, hours),
        None => (0, head),
    };
    let hours = parse_digits(hours, 1, 2).ok_or_else(invalid)?;
    let minutes = parse_digits(minutes, 1, 2).ok_or_else(invalid)?;

    let whole_seconds = match seconds.split_once('.') {
        Some((whole, fraction)) => {
            parse_digits(fraction, 1, usize::MAX).ok_or_else(invalid)?;
            whole
        }
        None => seconds,
    };
    let seconds = parse_digits(whole_seconds, 1, 2).ok_or_else(invalid)?;

    let total = days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|total| total.checked_add(hours * SECONDS_PER_HOUR))
        .and_then(|total| total.checked_add(minutes * SECONDS_PER_MINUTE + seconds))
        .ok_or_else(invalid)?;

    Ok(Duration::from_secs(total))
}

fn parse_digits(field: &str, min_len: usize, max_len: usize) -> Option<u64> {
    if field.len() < min_len || field.len() > max_len || !field.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    field.parse().ok()
}

/// Serde adapter for a `Duration` carried as a time span string
pub mod span {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_time_span(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_span(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for an optional time span; `null` and `""` both mean absent
pub mod span_option {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        value: &Option<Duration>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => serializer.serialize_str(&super::format_time_span(*duration)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(span) => super::parse_time_span(span)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
