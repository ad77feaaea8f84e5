use hearth_dns_domain::RecordType;
use hickory_proto::rr::RecordType as WireRecordType;

/// Conversions between the domain record types and hickory's wire types.
///
/// Only the five locally-authoritative types map; everything else is
/// `None` and belongs to the forwarding path.
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn from_wire(record_type: WireRecordType) -> Option<RecordType> {
        match record_type {
            WireRecordType::A => Some(RecordType::A),
            WireRecordType::AAAA => Some(RecordType::AAAA),
            WireRecordType::CNAME => Some(RecordType::CNAME),
            WireRecordType::MX => Some(RecordType::MX),
            WireRecordType::PTR => Some(RecordType::PTR),
            _ => None,
        }
    }

    pub fn to_wire(record_type: RecordType) -> WireRecordType {
        match record_type {
            RecordType::A => WireRecordType::A,
            RecordType::AAAA => WireRecordType::AAAA,
            RecordType::CNAME => WireRecordType::CNAME,
            RecordType::MX => WireRecordType::MX,
            RecordType::PTR => WireRecordType::PTR,
        }
    }
}
