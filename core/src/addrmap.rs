//! # Address-Map Builder
//!
//! Stage one of the pipeline: fold one zone snapshot into the reverse-lookup
//! map. Infrastructure pseudo-hosts are dropped here, real hosts are all
//! kept, shared addresses included.

use adres_common::dns::{APEX_NAME, AddressRecord, RESERVED_PARTITIONS};
use adres_common::map::AddressMap;

/// Folds eligible zone records into the lookup map.
///
/// The apex record and the AD replication partitions are discarded; every
/// other record lands in the map exactly once, in arrival order, so no
/// address ever maps to fewer hostnames than the zone holds for it.
pub fn build_address_map(records: Vec<AddressRecord>) -> AddressMap {
    let mut map = AddressMap::new();
    for record in records.into_iter().filter(is_eligible) {
        map.insert(record.addr, record.name);
    }
    map
}

fn is_eligible(record: &AddressRecord) -> bool {
    if record.name == APEX_NAME {
        return false;
    }
    !RESERVED_PARTITIONS
        .iter()
        .any(|partition| record.name.eq_ignore_ascii_case(partition))
}
