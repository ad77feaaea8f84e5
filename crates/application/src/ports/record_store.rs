use async_trait::async_trait;
use hearth_dns_domain::{DomainError, RecordType, ZoneRecord};

/// Read-only view over the zone record store.
///
/// An empty result set is a normal, successful return. Every underlying
/// storage fault surfaces uniformly as `DomainError::StoreUnavailable`,
/// so handlers have a single failure path to reason about.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_by_name_and_type(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<ZoneRecord>, DomainError>;

    async fn find_by_ipv4(&self, address: &str) -> Result<Vec<ZoneRecord>, DomainError>;

    /// Probe by IPv6 address. `candidates` holds one or two canonical
    /// strings (the second is the embedded dotted quad of an IPv4-mapped
    /// address); a record matching any candidate counts as a hit.
    async fn find_by_ipv6(&self, candidates: &[String]) -> Result<Vec<ZoneRecord>, DomainError>;
}
