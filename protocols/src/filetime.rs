//! Decoding of Active Directory FILETIME attributes.
//!
//! `pwdLastSet` and `lastLogonTimestamp` are 64-bit counts of 100-nanosecond
//! intervals since 1601-01-01 UTC, transported as decimal strings.

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

/// 100-ns intervals between 1601-01-01 and the Unix epoch.
const EPOCH_DIFFERENCE: i64 = 116_444_736_000_000_000;
const INTERVALS_PER_SECOND: i64 = 10_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FiletimeError {
    #[error("attribute is missing")]
    Missing,
    #[error("timestamp was never set")]
    Unset,
    #[error("'{0}' is not a FILETIME value")]
    Malformed(String),
}

/// Decodes a FILETIME attribute into a calendar date, discarding the time
/// of day.
///
/// A missing attribute, the literal `0`, and the never-expires marker
/// (`i64::MAX`) all count as unset rather than malformed.
pub fn decode_date(value: Option<&str>) -> Result<NaiveDate, FiletimeError> {
    let raw = value.ok_or(FiletimeError::Missing)?;
    let ticks: i64 = raw
        .trim()
        .parse()
        .map_err(|_| FiletimeError::Malformed(raw.to_string()))?;

    if ticks == 0 || ticks == i64::MAX {
        return Err(FiletimeError::Unset);
    }
    if ticks < EPOCH_DIFFERENCE {
        return Err(FiletimeError::Malformed(raw.to_string()));
    }

    let seconds = (ticks - EPOCH_DIFFERENCE) / INTERVALS_PER_SECOND;
    let when = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| FiletimeError::Malformed(raw.to_string()))?;
    Ok(when.date_naive())
}
