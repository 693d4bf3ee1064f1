use std::net::Ipv4Addr;

use dns_parser::{Packet as ParsedPacket, RData, ResponseCode};
use thiserror::Error;
use tracing::trace;

use ptrmap_common::utils::ip;

pub const DNS_HDR_LEN: usize = 12;
const FLAGS_RD: u16 = 0x0100;
const TYPE_PTR: u16 = 12;
const CLASS_IN: u16 = 1;
const RCODE_NXDOMAIN: u8 = 3;
const DEFAULT_TTL: u32 = 300;

#[derive(Debug, Error)]
pub enum PacketError {
    #[error("DNS label '{0}' is longer than 63 bytes")]
    LabelTooLong(String),

    #[error("Failed to parse DNS packet: {0}")]
    Malformed(String),

    #[error("Unexpected transaction id {got:#06x}, expected {expected:#06x}")]
    IdMismatch { expected: u16, got: u16 },

    #[error("Packet is a query, not a response")]
    NotAResponse,
}

/// Picks a fresh transaction id for an outgoing query.
pub fn random_transaction_id() -> u16 {
    rand::random()
}

/// Builds a recursive PTR query for `ip_addr`.
pub fn create_ptr_packet(ip_addr: &Ipv4Addr, id: u16) -> Result<Vec<u8>, PacketError> {
    let qname: Vec<u8> = encode_dns_name(&ip::reverse_address_to_ptr(ip_addr))?;
    let mut buffer: Vec<u8> = Vec::with_capacity(DNS_HDR_LEN + qname.len() + 4);

    buffer.extend_from_slice(&id.to_be_bytes());
    buffer.extend_from_slice(&FLAGS_RD.to_be_bytes());
    // One question, no answer, authority or additional records
    buffer.extend_from_slice(&1u16.to_be_bytes());
    buffer.extend_from_slice(&[0u8; 6]);

    buffer.extend_from_slice(&qname);
    buffer.extend_from_slice(&TYPE_PTR.to_be_bytes());
    buffer.extend_from_slice(&CLASS_IN.to_be_bytes());

    Ok(buffer)
}

/// Extracts the hostname from the response to query `expected_id`.
///
/// `Ok(None)` covers NXDOMAIN, any other error rcode and answers without a
/// PTR record. Compressed names are expanded.
pub fn get_hostname(payload: &[u8], expected_id: u16) -> Result<Option<String>, PacketError> {
    let packet: ParsedPacket =
        ParsedPacket::parse(payload).map_err(|e| PacketError::Malformed(e.to_string()))?;

    if packet.header.id != expected_id {
        return Err(PacketError::IdMismatch {
            expected: expected_id,
            got: packet.header.id,
        });
    }
    if packet.header.query {
        return Err(PacketError::NotAResponse);
    }
    if !matches!(packet.header.response_code, ResponseCode::NoError) {
        trace!("Response {expected_id:#06x} carried {:?}", packet.header.response_code);
        return Ok(None);
    }

    let hostname: Option<String> = packet.answers.iter().find_map(|answer| match &answer.data {
        RData::PTR(record) => ip::normalize_hostname(&record.0.to_string()),
        _ => None,
    });

    Ok(hostname)
}

/// Answers a PTR query produced by [`create_ptr_packet`].
///
/// `None` yields an NXDOMAIN response. Used by local test servers.
pub fn create_ptr_response(query: &[u8], hostname: Option<&str>) -> Result<Vec<u8>, PacketError> {
    if query.len() < DNS_HDR_LEN {
        return Err(PacketError::Malformed(String::from("query shorter than header")));
    }

    let mut buffer: Vec<u8> = query.to_vec();
    // QR + RD, then RA + rcode
    buffer[2] = 0x81;
    buffer[3] = 0x80;

    match hostname {
        Some(name) => {
            let rdata: Vec<u8> = encode_dns_name(name)?;
            buffer[6..8].copy_from_slice(&1u16.to_be_bytes());
            // Answer owner name points back at the question name
            buffer.extend_from_slice(&[0xC0, DNS_HDR_LEN as u8]);
            buffer.extend_from_slice(&TYPE_PTR.to_be_bytes());
            buffer.extend_from_slice(&CLASS_IN.to_be_bytes());
            buffer.extend_from_slice(&DEFAULT_TTL.to_be_bytes());
            buffer.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            buffer.extend_from_slice(&rdata);
        }
        None => {
            buffer[3] |= RCODE_NXDOMAIN;
        }
    }

    Ok(buffer)
}

fn encode_dns_name(name: &str) -> Result<Vec<u8>, PacketError> {
    let mut encoded: Vec<u8> = Vec::new();
    for label in name.split('.') {
        if label.is_empty() {
            continue;
        }
        if label.len() > 63 {
            return Err(PacketError::LabelTooLong(label.to_string()));
        }
        encoded.push(label.len() as u8);
        encoded.extend_from_slice(label.as_bytes());
    }
    encoded.push(0);
    Ok(encoded)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use dns_parser::QueryType;

    const HOST: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);

    #[test]
    fn query_carries_reverse_name() {
        let bytes = create_ptr_packet(&HOST, 0x1234).unwrap();
        let parsed = ParsedPacket::parse(&bytes).unwrap();

        assert_eq!(parsed.header.id, 0x1234);
        assert!(parsed.header.query);
        assert!(parsed.header.recursion_desired);
        assert_eq!(parsed.questions.len(), 1);
        assert_eq!(parsed.questions[0].qname.to_string(), "1.0.0.10.in-addr.arpa");
        assert_eq!(parsed.questions[0].qtype, QueryType::PTR);
    }

    #[test]
    fn query_wire_layout() {
        let bytes = create_ptr_packet(&HOST, 0xBEEF).unwrap();

        assert_eq!(&bytes[..DNS_HDR_LEN], &[0xBE, 0xEF, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[DNS_HDR_LEN..DNS_HDR_LEN + 3], &[1, b'1', 1]);
        assert_eq!(&bytes[bytes.len() - 5..], &[0, 0, 12, 0, 1]);
        assert_eq!(bytes.len(), DNS_HDR_LEN + "1.0.0.10.in-addr.arpa".len() + 2 + 4);
    }

    #[test]
    fn hostname_from_answer() {
        let query = create_ptr_packet(&HOST, 7).unwrap();
        let response = create_ptr_response(&query, Some("host1.example.com.")).unwrap();

        assert_eq!(
            get_hostname(&response, 7).unwrap(),
            Some(String::from("host1.example.com"))
        );
    }

    #[test]
    fn nxdomain_is_no_hostname() {
        let query = create_ptr_packet(&HOST, 9).unwrap();
        let response = create_ptr_response(&query, None).unwrap();

        assert_eq!(get_hostname(&response, 9).unwrap(), None);
    }

    #[test]
    fn mismatched_id_is_rejected() {
        let query = create_ptr_packet(&HOST, 1).unwrap();
        let response = create_ptr_response(&query, Some("host1")).unwrap();

        assert!(matches!(
            get_hostname(&response, 2),
            Err(PacketError::IdMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn query_is_not_a_response() {
        let query = create_ptr_packet(&HOST, 3).unwrap();
        assert!(matches!(get_hostname(&query, 3), Err(PacketError::NotAResponse)));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            get_hostname(&[0x00, 0x01, 0x02], 1),
            Err(PacketError::Malformed(_))
        ));
        assert!(create_ptr_response(&[0u8; 4], None).is_err());
    }

    #[test]
    fn oversized_label_is_rejected() {
        let query = create_ptr_packet(&HOST, 4).unwrap();
        let long_label = "a".repeat(64);
        assert!(matches!(
            create_ptr_response(&query, Some(&long_label)),
            Err(PacketError::LabelTooLong(_))
        ));
    }
}
