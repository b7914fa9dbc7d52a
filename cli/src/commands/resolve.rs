use std::io::{self, BufRead};
use std::net::IpAddr;
use std::time::Instant;

use tracing::warn;

use crate::commands::{self, LookupOpts};
use crate::terminal::print;
use adres_common::directory::ComputerRecord;
use adres_common::input;
use adres_core::directory::LdapDirectory;
use adres_core::resolver::{Diagnostic, ResolveSink, ResolverService};
use adres_core::zone::AxfrZoneEnumerator;

/// Streams records to stdout as the resolver produces them; diagnostics go
/// through the warning channel and never pollute the record stream.
struct TerminalSink {
    quiet: u8,
    emitted: usize,
}

impl ResolveSink for TerminalSink {
    fn record(&mut self, record: ComputerRecord) {
        print::computer(self.emitted, &record, self.quiet);
        self.emitted += 1;
    }

    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
    }
}

pub async fn resolve(addresses: Vec<String>, opts: &LookupOpts) -> anyhow::Result<()> {
    let cfg = commands::build_config(opts)?;
    let addresses = gather_addresses(addresses)?;

    let service = ResolverService::new(
        Box::new(AxfrZoneEnumerator),
        Box::new(LdapDirectory::new(&cfg)),
    );

    let start_time = Instant::now();
    let mut sink = TerminalSink {
        quiet: cfg.quiet,
        emitted: 0,
    };
    service
        .resolve_computers(&addresses, &cfg.zone, cfg.server, &mut sink)
        .await?;

    print::resolve_summary(sink.emitted, addresses.len(), start_time.elapsed(), cfg.quiet);
    Ok(())
}

/// Collects addresses from the arguments or, when none were given, from
/// piped rows on stdin. Malformed values are rejected here, each with a
/// warning naming it, without stopping the rest of the batch.
fn gather_addresses(args: Vec<String>) -> anyhow::Result<Vec<IpAddr>> {
    let raw = if args.is_empty() {
        input::first_columns(io::stdin().lock().lines().map_while(Result::ok))
    } else {
        args
    };
    anyhow::ensure!(
        !raw.is_empty(),
        "no addresses given on the command line or stdin"
    );

    let mut addresses = Vec::with_capacity(raw.len());
    for value in &raw {
        match input::parse_address(value) {
            Ok(addr) => addresses.push(addr),
            Err(err) => warn!("{err}"),
        }
    }
    anyhow::ensure!(
        !addresses.is_empty(),
        "none of the given values parsed as an IP address"
    );
    Ok(addresses)
}
