//! LDAP implementation of the directory-lookup port.

use std::net::IpAddr;

use adres_common::config::{BindCredentials, Config};
use adres_common::directory::{DirectoryError, DirectoryRepository, RawComputer};
use adres_protocols::ldap as filters;
use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, Scope, SearchEntry};
use tokio::sync::Mutex;
use tracing::debug;

/// Computer lookups against a domain controller.
///
/// The connection is established lazily on the first query and reused for
/// the rest of the batch.
pub struct LdapDirectory {
    url: String,
    base_dn: String,
    bind: Option<BindCredentials>,
    handle: Mutex<Option<Ldap>>,
}

impl LdapDirectory {
    pub fn new(cfg: &Config) -> Self {
        Self {
            url: ldap_url(cfg.server.ip()),
            base_dn: cfg.base_dn.clone(),
            bind: cfg.bind.clone(),
            handle: Mutex::new(None),
        }
    }

    // TODO: support SASL GSSAPI binds (ldap3 `gssapi` feature) so domain
    // members can authenticate without passing --bind-dn.
    async fn connect(&self) -> Result<Ldap, DirectoryError> {
        debug!("connecting to {}", self.url);
        let (conn, mut ldap) = LdapConnAsync::new(&self.url)
            .await
            .map_err(|err| DirectoryError::Connection(err.to_string()))?;
        ldap3::drive!(conn);

        if let Some(bind) = &self.bind {
            ldap.simple_bind(&bind.dn, &bind.password)
                .await
                .map_err(|err| DirectoryError::Connection(err.to_string()))?
                .success()
                .map_err(|err| DirectoryError::Connection(err.to_string()))?;
        }
        Ok(ldap)
    }

    async fn handle(&self) -> Result<Ldap, DirectoryError> {
        let mut guard = self.handle.lock().await;
        match &*guard {
            Some(ldap) => Ok(ldap.clone()),
            None => {
                let ldap = self.connect().await?;
                *guard = Some(ldap.clone());
                Ok(ldap)
            }
        }
    }
}

#[async_trait]
impl DirectoryRepository for LdapDirectory {
    async fn find_computer(&self, name: &str) -> Result<Option<RawComputer>, DirectoryError> {
        let mut ldap = self.handle().await?;

        let filter = filters::computer_filter(name);
        let (entries, _result) = ldap
            .search(
                &self.base_dn,
                Scope::Subtree,
                &filter,
                filters::COMPUTER_ATTRS.to_vec(),
            )
            .await
            .map_err(|err| DirectoryError::Query(err.to_string()))?
            .success()
            .map_err(|err| DirectoryError::Query(err.to_string()))?;

        let Some(entry) = entries.into_iter().next() else {
            return Ok(None);
        };
        Ok(Some(raw_computer(SearchEntry::construct(entry), name)))
    }
}

fn raw_computer(entry: SearchEntry, queried_name: &str) -> RawComputer {
    let attr = |name: &str| filters::first_value(&entry.attrs, name).map(str::to_string);
    RawComputer {
        name: attr("name").unwrap_or_else(|| queried_name.to_string()),
        dns_host_name: attr("dNSHostName"),
        operating_system: attr("operatingSystem"),
        pwd_last_set: attr("pwdLastSet"),
        last_logon_timestamp: attr("lastLogonTimestamp"),
    }
}

fn ldap_url(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => format!("ldap://{v4}"),
        IpAddr::V6(v6) => format!("ldap://[{v6}]"),
    }
}
