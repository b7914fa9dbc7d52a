//! Directory-side model: raw and normalized computer records, and the
//! lookup port.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// The attribute bundle exactly as the directory returned it.
///
/// The two timestamp attributes stay as raw strings here; turning them into
/// dates can fail per-record and belongs to the resolver.
#[derive(Clone, Debug, Default)]
pub struct RawComputer {
    pub name: String,
    pub dns_host_name: Option<String>,
    pub operating_system: Option<String>,
    pub pwd_last_set: Option<String>,
    pub last_logon_timestamp: Option<String>,
}

/// A fully populated output record. Either every field is present or no
/// record is emitted for the hostname; there are no partial records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputerRecord {
    pub name: String,
    pub dns_host_name: String,
    pub operating_system: String,
    pub password_last_set: NaiveDate,
    pub last_logon: NaiveDate,
}

/// Short calendar rendering, day precision (`2/21/2023`).
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("could not reach the directory service: {0}")]
    Connection(String),
    #[error("directory query failed: {0}")]
    Query(String),
}

/// Port for per-hostname identity lookups.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// `Ok(None)` when no computer object matches `name`.
    async fn find_computer(&self, name: &str) -> Result<Option<RawComputer>, DirectoryError>;
}
