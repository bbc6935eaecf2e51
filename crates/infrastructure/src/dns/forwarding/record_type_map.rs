//! Mapping between dnsql record tokens and `hickory_proto` types.

use dnsql_domain::{RecordClass, RecordType};
use hickory_proto::rr::{DNSClass, RecordType as HickoryRecordType};

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Known codes come back as hickory's named variants, the rest as
    /// `Unknown(code)`; either way the wire code is preserved.
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn class_to_hickory(class: &RecordClass) -> DNSClass {
        match class {
            RecordClass::IN => DNSClass::IN,
            RecordClass::CH => DNSClass::CH,
            RecordClass::HS => DNSClass::HS,
            RecordClass::NONE => DNSClass::NONE,
            RecordClass::ANY => DNSClass::ANY,
        }
    }
}
