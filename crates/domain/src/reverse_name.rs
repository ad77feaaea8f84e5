//! Reverse-lookup (PTR) name normalization.
//!
//! Wire-format reverse names arrive with their labels in reversed order:
//! `4.3.2.1.in-addr.arpa` for `1.2.3.4`, and one nibble per label under
//! `ip6.arpa`. Normalization turns them back into canonical address
//! strings to probe the record store with.

use crate::errors::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr};

pub const V4_ARPA_SUFFIX: &str = ".in-addr.arpa";
pub const V6_ARPA_SUFFIX: &str = ".ip6.arpa";

/// Canonical address strings to probe the store with, in probe order.
///
/// Always contains the canonical form; for an IPv4-mapped IPv6 address
/// it additionally carries the embedded dotted quad, since the store may
/// index such hosts under either representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtrCandidates {
    pub addresses: Vec<String>,
}

impl PtrCandidates {
    fn single(address: String) -> Self {
        Self {
            addresses: vec![address],
        }
    }
}

/// Normalize a `<reversed-octets>.in-addr.arpa` name into a dotted quad.
pub fn parse_v4(name: &str) -> Result<PtrCandidates, DomainError> {
    let octets = name
        .strip_suffix(V4_ARPA_SUFFIX)
        .ok_or_else(|| DomainError::MalformedAddress(name.to_string()))?;

    let mut labels: Vec<&str> = octets.split('.').collect();
    labels.reverse();

    let candidate = labels.join(".");
    let address: Ipv4Addr = candidate
        .parse()
        .map_err(|_| DomainError::MalformedAddress(name.to_string()))?;

    Ok(PtrCandidates::single(address.to_string()))
}

/// Normalize a `<reversed-nibbles>.ip6.arpa` name into a canonical IPv6
/// string, plus the embedded dotted quad when the address is IPv4-mapped.
pub fn parse_v6(name: &str) -> Result<PtrCandidates, DomainError> {
    let nibbles = name
        .strip_suffix(V6_ARPA_SUFFIX)
        .ok_or_else(|| DomainError::MalformedAddress(name.to_string()))?;

    let labels: Vec<&str> = nibbles.split('.').collect();
    if labels.len() != 32 {
        return Err(DomainError::MalformedAddress(name.to_string()));
    }

    let mut hex = String::with_capacity(32);
    for label in labels.iter().rev() {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_hexdigit() => hex.push(c),
            _ => return Err(DomainError::MalformedAddress(name.to_string())),
        }
    }

    let grouped = hex
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(":");

    let address: Ipv6Addr = grouped
        .parse()
        .map_err(|_| DomainError::MalformedAddress(name.to_string()))?;

    let mut candidates = PtrCandidates::single(address.to_string());
    if let Some(mapped) = address.to_ipv4_mapped() {
        candidates.addresses.push(mapped.to_string());
    }

    Ok(candidates)
}
