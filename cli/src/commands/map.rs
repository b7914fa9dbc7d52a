use crate::commands::{self, LookupOpts};
use crate::terminal::print;
use adres_common::dns::ZoneEnumerator;
use adres_common::success;
use adres_core::addrmap;
use adres_core::zone::AxfrZoneEnumerator;

/// Runs only stage one of the pipeline and prints the resulting map,
/// sorted by address for stable output.
pub async fn map(opts: &LookupOpts) -> anyhow::Result<()> {
    let cfg = commands::build_config(opts)?;

    let records = AxfrZoneEnumerator
        .fetch_records(&cfg.zone, cfg.server)
        .await?;
    let map = addrmap::build_address_map(records);

    if map.is_empty() {
        print::no_results();
        return Ok(());
    }

    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by_key(|(addr, _)| **addr);
    for (addr, hostnames) in entries {
        let names: Vec<&str> = hostnames.iter().collect();
        print::map_entry(addr, &names.join(", "));
    }

    success!("{} addresses mapped from zone '{}'", map.len(), cfg.zone);
    Ok(())
}
