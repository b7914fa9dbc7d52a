//! # Input Boundary
//!
//! Validation of caller-supplied values before they enter the pipeline.
//!
//! Addresses arrive as direct arguments or piped rows; every value must be a
//! parseable IP literal. Zone names are checked against the DNS label
//! grammar. Rejections happen here, with the offending value named, so the
//! resolver only ever sees well-formed input.

use std::net::IpAddr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a valid IPv4 or IPv6 address")]
    BadAddress(String),
    #[error("'{0}' is not a valid DNS zone name")]
    BadZoneName(String),
}

/// Parses one caller-supplied value as an IP literal.
pub fn parse_address(value: &str) -> Result<IpAddr, InputError> {
    let value = value.trim();
    value
        .parse()
        .map_err(|_| InputError::BadAddress(value.to_string()))
}

/// Extracts candidate values from piped rows.
///
/// Takes the first whitespace-separated column of each row; blank rows and
/// `#` comments are skipped.
pub fn first_columns<I, S>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rows.into_iter()
        .filter_map(|row| {
            let row = row.as_ref().trim();
            if row.is_empty() || row.starts_with('#') {
                return None;
            }
            row.split_whitespace().next().map(str::to_string)
        })
        .collect()
}

/// Checks `zone` against the DNS name grammar: two or more dotted labels of
/// 1-63 alphanumeric-or-hyphen characters, no leading or trailing hyphen,
/// and an alphabetic top label at least two characters long.
pub fn validate_zone_name(zone: &str) -> Result<(), InputError> {
    let err = || InputError::BadZoneName(zone.to_string());

    let name = zone.strip_suffix('.').unwrap_or(zone);
    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return Err(err());
    }

    for label in &labels {
        if label.is_empty() || label.len() > 63 {
            return Err(err());
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(err());
        }
        if !label
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
        {
            return Err(err());
        }
    }

    let Some(top) = labels.last() else {
        return Err(err());
    };
    if top.len() < 2 || !top.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(err());
    }

    Ok(())
}
