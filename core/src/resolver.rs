//! # Identity Resolution Service
//!
//! Implements the core two-stage lookup: one zone snapshot for the whole
//! batch, then a directory query per resolved hostname.
//!
//! The service only depends on the [`ZoneEnumerator`] and
//! [`DirectoryRepository`] abstractions, so concrete transports stay
//! swappable and the pipeline is testable without a network.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use adres_common::directory::{
    ComputerRecord, DirectoryRepository, RawComputer,
};
use adres_common::dns::ZoneEnumerator;
use adres_protocols::filetime;
use tracing::{Instrument, debug, info_span};

/// Receives pipeline output as it is produced.
///
/// Records and diagnostics arrive in processing order. Diagnostics never
/// appear in the record stream; the two go to separate channels.
pub trait ResolveSink {
    fn record(&mut self, record: ComputerRecord);
    fn diagnostic(&mut self, diagnostic: Diagnostic);
}

/// A per-item failure, surfaced on the warning channel while the rest of
/// the batch keeps going.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The input address has no record in the zone snapshot.
    UnknownAddress(IpAddr),
    /// The directory has no computer object for this hostname, or the
    /// query failed (treated the same way).
    UnknownComputer(String),
    /// The computer object is missing one of the required attributes.
    MissingAttribute {
        name: String,
        attribute: &'static str,
    },
    /// A timestamp attribute could not be turned into a date.
    BadTimestamp {
        name: String,
        attribute: &'static str,
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownAddress(addr) => {
                write!(f, "could not resolve {addr} to a hostname")
            }
            Diagnostic::UnknownComputer(name) => {
                write!(f, "no computer object found for '{name}'")
            }
            Diagnostic::MissingAttribute { name, attribute } => {
                write!(f, "'{name}': attribute {attribute} is missing")
            }
            Diagnostic::BadTimestamp {
                name,
                attribute,
                reason,
            } => {
                write!(f, "'{name}': {attribute}: {reason}")
            }
        }
    }
}

/// Application service for the resolution pipeline.
///
/// Orchestrates the two stages:
/// 1. delegating the bulk zone fetch to the [`ZoneEnumerator`] port.
/// 2. enriching each resolved hostname through the [`DirectoryRepository`].
pub struct ResolverService {
    zone_source: Box<dyn ZoneEnumerator>,
    directory: Box<dyn DirectoryRepository>,
}

impl ResolverService {
    pub fn new(
        zone_source: Box<dyn ZoneEnumerator>,
        directory: Box<dyn DirectoryRepository>,
    ) -> Self {
        Self {
            zone_source,
            directory,
        }
    }

    /// Resolves a whole batch of addresses against one zone snapshot.
    ///
    /// The snapshot is taken once, up front, so the view of the zone is
    /// consistent across the batch and the transfer cost does not scale
    /// with batch size. Zone-transfer failure is fatal and propagates;
    /// anything scoped to a single address or hostname degrades to a
    /// [`Diagnostic`].
    ///
    /// Hostnames are never deduplicated: two inputs resolving to the same
    /// host trigger two directory queries and may emit two records.
    pub async fn resolve_computers(
        &self,
        addresses: &[IpAddr],
        zone: &str,
        server: SocketAddr,
        sink: &mut dyn ResolveSink,
    ) -> anyhow::Result<()> {
        let span = info_span!("zone transfer", indicatif.pb_show = true);
        let records = self
            .zone_source
            .fetch_records(zone, server)
            .instrument(span)
            .await?;
        let map = crate::addrmap::build_address_map(records);
        debug!("address map holds {} addresses", map.len());

        for addr in addresses {
            let Some(hostnames) = map.lookup(addr) else {
                sink.diagnostic(Diagnostic::UnknownAddress(*addr));
                continue;
            };
            let names: Vec<String> = hostnames.iter().map(str::to_string).collect();
            for name in names {
                self.resolve_one(&name, sink).await;
            }
        }
        Ok(())
    }

    async fn resolve_one(&self, name: &str, sink: &mut dyn ResolveSink) {
        let found = match self.directory.find_computer(name).await {
            Ok(found) => found,
            Err(err) => {
                debug!("directory query for '{name}' failed: {err}");
                sink.diagnostic(Diagnostic::UnknownComputer(name.to_string()));
                return;
            }
        };
        let Some(raw) = found else {
            sink.diagnostic(Diagnostic::UnknownComputer(name.to_string()));
            return;
        };
        match normalize(raw) {
            Ok(record) => sink.record(record),
            Err(diagnostic) => sink.diagnostic(diagnostic),
        }
    }
}

/// Turns a raw attribute bundle into a complete [`ComputerRecord`], or a
/// diagnostic naming the first attribute that prevents one. Nothing partial
/// is ever produced.
fn normalize(raw: RawComputer) -> Result<ComputerRecord, Diagnostic> {
    let name = raw.name;
    let dns_host_name = required(&name, raw.dns_host_name, "dNSHostName")?;
    let operating_system = required(&name, raw.operating_system, "operatingSystem")?;
    let password_last_set = date_attribute(&name, raw.pwd_last_set.as_deref(), "pwdLastSet")?;
    let last_logon = date_attribute(
        &name,
        raw.last_logon_timestamp.as_deref(),
        "lastLogonTimestamp",
    )?;

    Ok(ComputerRecord {
        name,
        dns_host_name,
        operating_system,
        password_last_set,
        last_logon,
    })
}

fn required(
    name: &str,
    value: Option<String>,
    attribute: &'static str,
) -> Result<String, Diagnostic> {
    value.filter(|v| !v.is_empty()).ok_or(Diagnostic::MissingAttribute {
        name: name.to_string(),
        attribute,
    })
}

fn date_attribute(
    name: &str,
    value: Option<&str>,
    attribute: &'static str,
) -> Result<chrono::NaiveDate, Diagnostic> {
    filetime::decode_date(value).map_err(|err| Diagnostic::BadTimestamp {
        name: name.to_string(),
        attribute,
        reason: err.to_string(),
    })
}
