//! Environment discovery for settings the caller omitted.
//!
//! The host system already knows a search domain and a resolver; when the
//! caller passes neither `--zone` nor `--server`, those stand in.

use std::net::{IpAddr, SocketAddr};

use adres_common::config::DefaultsProvider;
use anyhow::Context;

const RESOLV_CONF: &str = "/etc/resolv.conf";
const DNS_PORT: u16 = 53;

/// Defaults taken from the system resolver configuration.
pub struct SystemDefaults;

impl DefaultsProvider for SystemDefaults {
    fn default_zone(&self) -> anyhow::Result<String> {
        let text = std::fs::read_to_string(RESOLV_CONF)
            .with_context(|| format!("cannot read {RESOLV_CONF}"))?;
        domain_from_resolv(&text).context("no search domain configured, pass --zone")
    }

    fn default_server(&self) -> anyhow::Result<SocketAddr> {
        let text = std::fs::read_to_string(RESOLV_CONF)
            .with_context(|| format!("cannot read {RESOLV_CONF}"))?;
        nameserver_from_resolv(&text)
            .map(|ip| SocketAddr::new(ip, DNS_PORT))
            .context("no nameserver configured, pass --server")
    }
}

fn domain_from_resolv(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("domain") | Some("search") => fields.next().map(str::to_string),
            _ => None,
        }
    })
}

fn nameserver_from_resolv(text: &str) -> Option<IpAddr> {
    text.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("nameserver") {
            return None;
        }
        fields.next()?.parse().ok()
    })
}
