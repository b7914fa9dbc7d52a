//! Zone-side model: address records and the enumeration port.

use std::net::{Ipv4Addr, SocketAddr};

use async_trait::async_trait;

/// Relative name Windows DNS uses for the zone apex.
pub const APEX_NAME: &str = "@";

/// Built-in AD-integrated replication partitions. They surface as address
/// records in the zone but do not denote real machines.
pub const RESERVED_PARTITIONS: [&str; 2] = ["ForestDnsZones", "DomainDnsZones"];

/// One address record from the zone, with its name made zone-relative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressRecord {
    pub name: String,
    pub addr: Ipv4Addr,
}

impl AddressRecord {
    pub fn new(name: impl Into<String>, addr: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            addr,
        }
    }
}

/// Port for the bulk zone fetch. Called exactly once per pipeline run.
///
/// Failure here is fatal for the invocation; there is no retry.
#[async_trait]
pub trait ZoneEnumerator: Send + Sync {
    async fn fetch_records(
        &self,
        zone: &str,
        server: SocketAddr,
    ) -> anyhow::Result<Vec<AddressRecord>>;
}
