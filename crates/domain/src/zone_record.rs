use super::RecordType;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A row from the zone record store.
///
/// Which optional fields are populated depends on `record_type`. A row
/// missing the field its type requires is a data-integrity defect the
/// resolution handlers tolerate by skipping the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub name: String,
    pub record_type: RecordType,
    pub ipv4_address: Option<Ipv4Addr>,
    pub ipv6_address: Option<Ipv6Addr>,
    pub target: Option<String>,
    pub priority: Option<u16>,
}

impl ZoneRecord {
    pub fn a(name: impl Into<String>, address: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::A,
            ipv4_address: Some(address),
            ipv6_address: None,
            target: None,
            priority: None,
        }
    }

    pub fn aaaa(name: impl Into<String>, address: Ipv6Addr) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::AAAA,
            ipv4_address: None,
            ipv6_address: Some(address),
            target: None,
            priority: None,
        }
    }

    pub fn cname(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::CNAME,
            ipv4_address: None,
            ipv6_address: None,
            target: Some(target.into()),
            priority: None,
        }
    }

    pub fn mx(name: impl Into<String>, exchange: impl Into<String>, priority: u16) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::MX,
            ipv4_address: None,
            ipv6_address: None,
            target: Some(exchange.into()),
            priority: Some(priority),
        }
    }
}
