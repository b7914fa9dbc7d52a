//! DNS zone-transfer wire handling: query construction, response checks,
//! and conversion of answers into [`AddressRecord`]s.

use adres_common::dns::{APEX_NAME, AddressRecord};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Builds the length-prefixed AXFR query that opens a TCP zone transfer.
pub fn axfr_request(origin: &Name, id: u16) -> anyhow::Result<Vec<u8>> {
    let mut message = Message::new();
    message.set_id(id);
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.add_query(Query::query(origin.clone(), RecordType::AXFR));

    let mut body = Vec::new();
    {
        let mut encoder = BinEncoder::new(&mut body);
        message.emit(&mut encoder)?;
    }

    let mut framed = Vec::with_capacity(body.len() + 2);
    framed.extend_from_slice(&(body.len() as u16).to_be_bytes());
    framed.extend_from_slice(&body);
    Ok(framed)
}

/// Maps the response code of a transfer message to an error. Anything but
/// `NoError` aborts the whole run.
pub fn check_response_code(message: &Message) -> anyhow::Result<()> {
    match message.response_code() {
        ResponseCode::NoError => Ok(()),
        ResponseCode::Refused => anyhow::bail!("transfer refused by the server"),
        ResponseCode::NXDomain => anyhow::bail!("zone does not exist"),
        ResponseCode::ServFail => anyhow::bail!("server failure"),
        other => anyhow::bail!("server answered {other}"),
    }
}

/// True for the SOA records that open and close an AXFR stream.
pub fn is_soa(record: &Record) -> bool {
    record.record_type() == RecordType::SOA
}

/// Converts one transfer answer into an [`AddressRecord`].
///
/// Only A records yield a value. The returned name is lowercased and made
/// relative to `origin`; the apex record comes back as `"@"`. Records lying
/// outside the zone are ignored.
pub fn address_record(record: &Record, origin: &Name) -> Option<AddressRecord> {
    if record.record_type() != RecordType::A {
        return None;
    }
    let RData::A(a) = record.data()? else {
        return None;
    };
    let name = relative_name(record.name(), origin)?;
    Some(AddressRecord::new(name, a.0))
}

/// Renders `name` relative to `origin`; `None` when it is not inside the
/// zone, `"@"` when it is the origin itself.
pub fn relative_name(name: &Name, origin: &Name) -> Option<String> {
    if !origin.zone_of(name) {
        return None;
    }
    let extra = usize::from(name.num_labels().checked_sub(origin.num_labels())?);
    if extra == 0 {
        return Some(APEX_NAME.to_string());
    }
    let labels: Vec<String> = name
        .iter()
        .take(extra)
        .map(|label| String::from_utf8_lossy(label).to_ascii_lowercase())
        .collect();
    Some(labels.join("."))
}
