//! # Address Map
//!
//! The reverse-lookup structure built from one zone snapshot: every IPv4
//! address in the zone, mapped to the hostname(s) holding a record for it.
//! Built once per run and immutable afterwards.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::slice;

/// The hostname(s) sharing one address.
///
/// A second record for an already-known address widens `One` into `Many`;
/// accumulation order follows the order records arrived from the zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hostnames {
    One(String),
    Many(Vec<String>),
}

impl Hostnames {
    pub fn push(&mut self, name: String) {
        match self {
            Hostnames::One(first) => {
                let first = std::mem::take(first);
                *self = Hostnames::Many(vec![first, name]);
            }
            Hostnames::Many(names) => names.push(name),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            Hostnames::One(one) => slice::from_ref(one),
            Hostnames::Many(many) => many.as_slice(),
        };
        names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        match self {
            Hostnames::One(_) => 1,
            Hostnames::Many(many) => many.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct AddressMap {
    entries: HashMap<Ipv4Addr, Hostnames>,
}

impl AddressMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` as a holder of `addr`. Existing holders are kept;
    /// nothing is ever silently dropped.
    pub fn insert(&mut self, addr: Ipv4Addr, name: String) {
        self.entries
            .entry(addr)
            .and_modify(|names| names.push(name.clone()))
            .or_insert_with(|| Hostnames::One(name));
    }

    /// Looks up an input address. IPv6 inputs always miss: the zone only
    /// carries IPv4 address records.
    pub fn lookup(&self, addr: &IpAddr) -> Option<&Hostnames> {
        match addr {
            IpAddr::V4(v4) => self.entries.get(v4),
            IpAddr::V6(_) => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ipv4Addr, &Hostnames)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
