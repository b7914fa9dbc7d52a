//! End-to-end pipeline tests against in-memory service ports.
//!
//! These exercise the whole resolution flow (zone snapshot, address map,
//! per-hostname directory queries, normalization) with both services
//! mocked, so every ordering and isolation guarantee can be asserted
//! without a network.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use adres_common::directory::{
    ComputerRecord, DirectoryError, DirectoryRepository, RawComputer, short_date,
};
use adres_common::dns::{AddressRecord, ZoneEnumerator};
use adres_common::input;
use adres_core::resolver::{Diagnostic, ResolveSink, ResolverService};

const EPOCH_DIFFERENCE: i64 = 116_444_736_000_000_000;

struct FixedZone {
    records: Vec<AddressRecord>,
    fetches: AtomicUsize,
}

impl FixedZone {
    fn new(records: Vec<AddressRecord>) -> Self {
        Self {
            records,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ZoneEnumerator for FixedZone {
    async fn fetch_records(
        &self,
        _zone: &str,
        _server: SocketAddr,
    ) -> anyhow::Result<Vec<AddressRecord>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.records.clone())
    }
}

#[derive(Default)]
struct MemoryDirectory {
    computers: HashMap<String, RawComputer>,
    queried: Mutex<Vec<String>>,
}

impl MemoryDirectory {
    fn with(mut self, computer: RawComputer) -> Self {
        self.computers.insert(computer.name.clone(), computer);
        self
    }

    fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryRepository for MemoryDirectory {
    async fn find_computer(&self, name: &str) -> Result<Option<RawComputer>, DirectoryError> {
        self.queried.lock().unwrap().push(name.to_string());
        Ok(self.computers.get(name).cloned())
    }
}

#[derive(Default)]
struct Collector {
    records: Vec<ComputerRecord>,
    diagnostics: Vec<Diagnostic>,
}

impl ResolveSink for Collector {
    fn record(&mut self, record: ComputerRecord) {
        self.records.push(record);
    }
    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

fn ip(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
}

fn record(name: &str, last: u8) -> AddressRecord {
    AddressRecord::new(name, Ipv4Addr::new(10, 0, 0, last))
}

fn ticks(y: i32, mo: u32, d: u32, h: u32) -> String {
    let when = Utc.with_ymd_and_hms(y, mo, d, h, 15, 33).unwrap();
    (when.timestamp() * 10_000_000 + EPOCH_DIFFERENCE).to_string()
}

fn computer(name: &str, os: &str, pwd: (i32, u32, u32), logon: (i32, u32, u32)) -> RawComputer {
    RawComputer {
        name: name.to_string(),
        dns_host_name: Some(format!("{name}.corp.example.com")),
        operating_system: Some(os.to_string()),
        pwd_last_set: Some(ticks(pwd.0, pwd.1, pwd.2, 9)),
        last_logon_timestamp: Some(ticks(logon.0, logon.1, logon.2, 22)),
    }
}

fn server() -> SocketAddr {
    "10.0.0.1:53".parse().unwrap()
}

async fn run(
    zone: Vec<AddressRecord>,
    directory: MemoryDirectory,
    addresses: &[IpAddr],
) -> (Collector, Vec<String>) {
    // The service takes ownership of its ports; keep the query log shared.
    let directory = std::sync::Arc::new(directory);
    let service = ResolverService::new(
        Box::new(FixedZone::new(zone)),
        Box::new(SharedDirectory(directory.clone())),
    );
    let mut sink = Collector::default();
    service
        .resolve_computers(addresses, "corp.example.com", server(), &mut sink)
        .await
        .expect("mock zone fetch is infallible");
    (sink, directory.queried())
}

struct SharedDirectory(std::sync::Arc<MemoryDirectory>);

#[async_trait]
impl DirectoryRepository for SharedDirectory {
    async fn find_computer(&self, name: &str) -> Result<Option<RawComputer>, DirectoryError> {
        self.0.find_computer(name).await
    }
}

#[tokio::test]
async fn end_to_end_two_addresses_two_records() {
    // The zone also carries the apex and partition records; neither may
    // leak into the output.
    let zone = vec![
        record("@", 1),
        record("ForestDnsZones", 1),
        record("DomainDnsZones", 1),
        record("cdc2", 83),
        record("win10", 85),
    ];
    let directory = MemoryDirectory::default()
        .with(computer(
            "cdc2",
            "Windows Server 2019 Datacenter",
            (2023, 2, 21),
            (2023, 3, 1),
        ))
        .with(computer(
            "win10",
            "Windows 10 Enterprise",
            (2022, 12, 5),
            (2023, 3, 2),
        ));

    let (sink, _) = run(zone, directory, &[ip(83), ip(85)]).await;

    assert!(sink.diagnostics.is_empty());
    assert_eq!(sink.records.len(), 2);

    let first = &sink.records[0];
    assert_eq!(first.name, "cdc2");
    assert_eq!(first.dns_host_name, "cdc2.corp.example.com");
    assert_eq!(first.operating_system, "Windows Server 2019 Datacenter");
    assert_eq!(
        first.password_last_set,
        NaiveDate::from_ymd_opt(2023, 2, 21).unwrap()
    );
    assert_eq!(short_date(first.password_last_set), "2/21/2023");
    assert_eq!(short_date(first.last_logon), "3/1/2023");

    assert_eq!(sink.records[1].name, "win10");
}

#[tokio::test]
async fn zone_is_fetched_once_for_the_whole_batch() {
    let zone = FixedZone::new(vec![record("cdc2", 83)]);
    let fetch_counter = std::sync::Arc::new(zone);
    let service = ResolverService::new(
        Box::new(CountingZone(fetch_counter.clone())),
        Box::new(MemoryDirectory::default()),
    );
    let mut sink = Collector::default();
    let addresses = [ip(83), ip(84), ip(85)];

    service
        .resolve_computers(&addresses, "corp.example.com", server(), &mut sink)
        .await
        .unwrap();

    assert_eq!(fetch_counter.fetches.load(Ordering::Relaxed), 1);
}

struct CountingZone(std::sync::Arc<FixedZone>);

#[async_trait]
impl ZoneEnumerator for CountingZone {
    async fn fetch_records(
        &self,
        zone: &str,
        server: SocketAddr,
    ) -> anyhow::Result<Vec<AddressRecord>> {
        self.0.fetch_records(zone, server).await
    }
}

#[tokio::test]
async fn shared_address_fans_out_in_record_order() {
    let zone = vec![record("alpha", 85), record("beta", 85)];
    let directory = MemoryDirectory::default()
        .with(computer("alpha", "Windows 11 Pro", (2023, 1, 2), (2023, 1, 3)))
        .with(computer("beta", "Windows 11 Pro", (2023, 1, 4), (2023, 1, 5)));

    let (sink, queried) = run(zone, directory, &[ip(85)]).await;

    assert_eq!(queried, vec!["alpha", "beta"]);
    assert_eq!(sink.records.len(), 2);
    assert_eq!(sink.records[0].name, "alpha");
    assert_eq!(sink.records[1].name, "beta");
}

#[tokio::test]
async fn fan_out_outcomes_stay_independent() {
    let zone = vec![record("alpha", 85), record("beta", 85)];
    // alpha has no computer object; beta must still resolve.
    let directory = MemoryDirectory::default().with(computer(
        "beta",
        "Windows 11 Pro",
        (2023, 1, 4),
        (2023, 1, 5),
    ));

    let (sink, queried) = run(zone, directory, &[ip(85)]).await;

    assert_eq!(queried, vec!["alpha", "beta"]);
    assert_eq!(
        sink.diagnostics,
        vec![Diagnostic::UnknownComputer("alpha".to_string())]
    );
    assert_eq!(sink.records.len(), 1);
    assert_eq!(sink.records[0].name, "beta");
}

#[tokio::test]
async fn unresolvable_address_produces_exactly_one_diagnostic() {
    let zone = vec![record("cdc2", 83)];
    let directory = MemoryDirectory::default().with(computer(
        "cdc2",
        "Windows Server 2019",
        (2023, 2, 21),
        (2023, 3, 1),
    ));

    let (sink, queried) = run(zone, directory, &[ip(99), ip(83)]).await;

    // The miss neither queries the directory nor blocks the next address.
    assert_eq!(
        sink.diagnostics,
        vec![Diagnostic::UnknownAddress(ip(99))]
    );
    assert_eq!(queried, vec!["cdc2"]);
    assert_eq!(sink.records.len(), 1);
}

#[tokio::test]
async fn duplicate_resolutions_are_not_deduplicated() {
    // Two different inputs resolving to the same host query it twice.
    let zone = vec![record("cdc2", 83), record("cdc2", 84)];
    let directory = MemoryDirectory::default().with(computer(
        "cdc2",
        "Windows Server 2019",
        (2023, 2, 21),
        (2023, 3, 1),
    ));

    let (sink, queried) = run(zone, directory, &[ip(83), ip(84)]).await;

    assert_eq!(queried, vec!["cdc2", "cdc2"]);
    assert_eq!(sink.records.len(), 2);
}

#[tokio::test]
async fn boundary_validation_isolates_malformed_inputs() {
    // The boundary rejects the malformed literal; the resolver never sees
    // it and both valid neighbours still produce records.
    let values = ["10.0.0.83", "10.0.0.999", "10.0.0.85"];
    let (valid, rejected): (Vec<_>, Vec<_>) = values
        .iter()
        .map(|value| input::parse_address(value))
        .partition(Result::is_ok);
    let addresses: Vec<IpAddr> = valid.into_iter().map(Result::unwrap).collect();

    assert_eq!(rejected.len(), 1);
    assert_eq!(addresses, vec![ip(83), ip(85)]);

    let zone = vec![record("cdc2", 83), record("win10", 85)];
    let directory = MemoryDirectory::default()
        .with(computer("cdc2", "Windows Server 2019", (2023, 2, 21), (2023, 3, 1)))
        .with(computer("win10", "Windows 10 Enterprise", (2022, 12, 5), (2023, 3, 2)));

    let (sink, _) = run(zone, directory, &addresses).await;

    assert_eq!(sink.records.len(), 2);
    assert!(sink.diagnostics.is_empty());
}
