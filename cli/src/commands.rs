pub mod map;
pub mod resolve;

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use adres_common::config::{self, BindCredentials, Config, DefaultsProvider};
use adres_common::input;
use adres_core::defaults::SystemDefaults;

const DNS_PORT: u16 = 53;

#[derive(Parser)]
#[command(name = "adres")]
#[command(about = "Resolve IP addresses to directory computer records.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve one or more IP addresses to computer records
    #[command(alias = "r")]
    Resolve {
        /// IPv4/IPv6 literals; read from stdin when omitted
        addresses: Vec<String>,
        #[command(flatten)]
        opts: LookupOpts,
    },
    /// Build and print the zone's address map
    #[command(alias = "m")]
    Map {
        #[command(flatten)]
        opts: LookupOpts,
    },
}

#[derive(Args)]
pub struct LookupOpts {
    /// DNS zone to enumerate (default: the system search domain)
    #[arg(long)]
    pub zone: Option<String>,

    /// DNS server answering the zone transfer (default: the system resolver)
    #[arg(long)]
    pub server: Option<String>,

    /// LDAP search base (default: derived from the zone name)
    #[arg(long)]
    pub base_dn: Option<String>,

    /// Simple-bind DN for the directory connection (anonymous when omitted)
    #[arg(long, requires = "password")]
    pub bind_dn: Option<String>,

    /// Simple-bind password
    #[arg(long)]
    pub password: Option<String>,

    /// Lower output verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Completes a [`Config`] from the flags, falling back to the defaults
/// provider for anything omitted, and validates the zone name before any
/// service call is made.
pub fn build_config(opts: &LookupOpts) -> anyhow::Result<Config> {
    let defaults = SystemDefaults;

    let zone = match &opts.zone {
        Some(zone) => zone.clone(),
        None => defaults.default_zone()?,
    };
    input::validate_zone_name(&zone)?;

    let server = match &opts.server {
        Some(server) => parse_server(server)?,
        None => defaults.default_server()?,
    };

    let base_dn = opts
        .base_dn
        .clone()
        .unwrap_or_else(|| config::base_dn_from_zone(&zone));

    let bind = match (&opts.bind_dn, &opts.password) {
        (Some(dn), Some(password)) => Some(BindCredentials {
            dn: dn.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    Ok(Config {
        zone,
        server,
        base_dn,
        bind,
        quiet: opts.quiet,
    })
}

/// Accepts `ip`, `ip:port`, `host` or `host:port`; the port defaults to 53.
fn parse_server(value: &str) -> anyhow::Result<SocketAddr> {
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = value.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DNS_PORT));
    }

    let with_port = if value.contains(':') {
        value.to_string()
    } else {
        format!("{value}:{DNS_PORT}")
    };
    with_port
        .to_socket_addrs()
        .with_context(|| format!("cannot resolve server '{value}'"))?
        .next()
        .with_context(|| format!("server '{value}' resolved to no address"))
}
