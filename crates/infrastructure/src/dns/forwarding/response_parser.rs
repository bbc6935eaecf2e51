use super::record_data;
use dnsql_domain::{DomainError, ResourceRecord, ResponseMessage};
use hickory_proto::op::{Header, Message, ResponseCode};
use hickory_proto::rr::{DNSClass, Record, RecordType};
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<ResponseMessage, DomainError> {
        let message = Message::from_vec(response_bytes)
            .map_err(|e| DomainError::MessageDecode(format!("failed to unpack: {}", e)))?;

        let response = ResponseMessage {
            id: message.id(),
            rcode: Self::rcode_to_status(message.response_code()).to_string(),
            truncated: message.truncated(),
            answers: message.answers().iter().map(Self::convert).collect(),
            authority: message.name_servers().iter().map(Self::convert).collect(),
            additional: message.additionals().iter().map(Self::convert).collect(),
        };

        debug!(
            id = response.id,
            rcode = %response.rcode,
            truncated = response.truncated,
            answers = response.answers.len(),
            authority = response.authority.len(),
            additional = response.additional.len(),
            "DNS response parsed"
        );

        Ok(response)
    }

    /// Recovers the header of a reply whose body failed to decode.
    ///
    /// Only a reply with the TC bit set is accepted; it comes back without
    /// records so the caller can retry over a stream transport.
    pub fn parse_truncated(response_bytes: &[u8]) -> Option<ResponseMessage> {
        let mut decoder = BinDecoder::new(response_bytes);
        let header = Header::read(&mut decoder).ok()?;

        if !header.truncated() {
            return None;
        }

        Some(ResponseMessage {
            id: header.id(),
            rcode: Self::rcode_to_status(header.response_code()).to_string(),
            truncated: true,
            ..Default::default()
        })
    }

    fn convert(record: &Record) -> ResourceRecord {
        ResourceRecord {
            name: record.name().to_utf8().into(),
            record_type: type_token(record.record_type()),
            class: class_token(record.dns_class()),
            ttl: record.ttl(),
            data: record_data::render(record.data()),
        }
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}

/// Mnemonic, or `TYPEn` (RFC 3597) for codes hickory has no name for.
fn type_token(record_type: RecordType) -> String {
    match record_type {
        RecordType::Unknown(code) => format!("TYPE{}", code),
        known => known.to_string(),
    }
}

/// Mnemonic for the registered classes, `CLASSn` (RFC 3597) otherwise.
fn class_token(class: DNSClass) -> String {
    match class {
        DNSClass::IN | DNSClass::CH | DNSClass::HS | DNSClass::NONE | DNSClass::ANY => {
            class.to_string()
        }
        other => format!("CLASS{}", u16::from(other)),
    }
}
