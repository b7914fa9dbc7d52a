//! AXFR implementation of the zone-enumeration port.
//!
//! One TCP zone transfer per run, driven directly over the DNS wire
//! format. The reply is a sequence of length-prefixed messages whose zone
//! data opens and closes with the zone's SOA record.

use std::net::SocketAddr;
use std::time::Duration;

use adres_common::dns::{AddressRecord, ZoneEnumerator};
use adres_protocols::zone;
use anyhow::{Context, bail};
use async_trait::async_trait;
use hickory_proto::op::Message;
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::BinDecodable;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

const IO_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches every address record of a zone with a single zone transfer.
pub struct AxfrZoneEnumerator;

#[async_trait]
impl ZoneEnumerator for AxfrZoneEnumerator {
    async fn fetch_records(
        &self,
        zone: &str,
        server: SocketAddr,
    ) -> anyhow::Result<Vec<AddressRecord>> {
        let fqdn = format!("{}.", zone.trim_end_matches('.'));
        let origin =
            Name::from_ascii(&fqdn).with_context(|| format!("'{zone}' is not a DNS name"))?;

        let stream = timeout(IO_TIMEOUT, TcpStream::connect(server))
            .await
            .with_context(|| format!("timed out connecting to DNS server {server}"))?
            .with_context(|| format!("cannot reach DNS server {server}"))?;

        transfer(stream, &origin)
            .await
            .with_context(|| format!("zone transfer of '{origin}' from {server} failed"))
    }
}

async fn transfer(stream: TcpStream, origin: &Name) -> anyhow::Result<Vec<AddressRecord>> {
    let (mut reader, mut writer) = stream.into_split();

    let request = zone::axfr_request(origin, rand::random::<u16>())?;
    writer.write_all(&request).await?;
    writer.flush().await?;

    let mut records = Vec::new();
    let mut soa_seen = 0u8;

    while soa_seen < 2 {
        let message = read_message(&mut reader).await?;
        zone::check_response_code(&message)?;
        if message.answers().is_empty() {
            bail!("server sent a message without zone data");
        }

        for answer in message.answers() {
            if zone::is_soa(answer) {
                soa_seen += 1;
                if soa_seen == 2 {
                    break;
                }
                continue;
            }
            if let Some(record) = zone::address_record(answer, origin) {
                records.push(record);
            }
        }
    }

    Ok(records)
}

async fn read_message<R>(reader: &mut R) -> anyhow::Result<Message>
where
    R: AsyncRead + Unpin,
{
    let mut length = [0u8; 2];
    timeout(IO_TIMEOUT, reader.read_exact(&mut length))
        .await
        .context("timed out waiting for the server")?
        .context("connection closed mid-transfer")?;

    let mut body = vec![0u8; usize::from(u16::from_be_bytes(length))];
    timeout(IO_TIMEOUT, reader.read_exact(&mut body))
        .await
        .context("timed out waiting for the server")?
        .context("connection closed mid-transfer")?;

    Ok(Message::from_bytes(&body)?)
}
