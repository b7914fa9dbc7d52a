use std::net::SocketAddr;

/// Settings for one pipeline run, assembled by the CLI from flags and, for
/// anything the caller omitted, from a [`DefaultsProvider`].
pub struct Config {
    /// DNS zone whose address records seed the lookup map.
    pub zone: String,
    /// DNS server answering the zone transfer. The same host is assumed to
    /// answer directory queries.
    pub server: SocketAddr,
    /// Search base for directory queries.
    pub base_dn: String,
    /// Simple-bind credentials for the directory connection; anonymous bind
    /// when absent.
    pub bind: Option<BindCredentials>,
    /// Output verbosity, raised by repeated `-q`.
    pub quiet: u8,
}

#[derive(Clone)]
pub struct BindCredentials {
    pub dn: String,
    pub password: String,
}

/// Supplies environment-discovered values for settings the caller omitted.
///
/// Consulted once while assembling [`Config`] and never again afterwards.
pub trait DefaultsProvider {
    fn default_zone(&self) -> anyhow::Result<String>;
    fn default_server(&self) -> anyhow::Result<SocketAddr>;
}

/// Derives an LDAP search base from a DNS zone name
/// (`corp.example.com` becomes `DC=corp,DC=example,DC=com`).
pub fn base_dn_from_zone(zone: &str) -> String {
    zone.split('.')
        .filter(|label| !label.is_empty())
        .map(|label| format!("DC={label}"))
        .collect::<Vec<_>>()
        .join(",")
}
