#![allow(dead_code)]

use async_trait::async_trait;
use hearth_dns_application::ports::RecordStore;
use hearth_dns_domain::{DomainError, RecordType, ZoneRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-memory record store double. Counts lookups so tests can assert
/// which handlers touch the store at all.
pub struct MockRecordStore {
    by_name: RwLock<HashMap<(String, RecordType), Vec<ZoneRecord>>>,
    by_address: RwLock<HashMap<String, Vec<ZoneRecord>>>,
    unavailable: AtomicBool,
    lookups: AtomicUsize,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            by_name: RwLock::new(HashMap::new()),
            by_address: RwLock::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn insert(&self, record: ZoneRecord) {
        self.by_name
            .write()
            .unwrap()
            .entry((record.name.clone(), record.record_type))
            .or_default()
            .push(record);
    }

    pub fn insert_for_address(&self, address: &str, record: ZoneRecord) {
        self.by_address
            .write()
            .unwrap()
            .entry(address.to_string())
            .or_default()
            .push(record);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn fail_if_unavailable(&self) -> Result<(), DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DomainError::StoreUnavailable("mock outage".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn find_by_name_and_type(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<ZoneRecord>, DomainError> {
        self.fail_if_unavailable()?;
        Ok(self
            .by_name
            .read()
            .unwrap()
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or_default())
    }

    async fn find_by_ipv4(&self, address: &str) -> Result<Vec<ZoneRecord>, DomainError> {
        self.fail_if_unavailable()?;
        Ok(self
            .by_address
            .read()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_by_ipv6(&self, candidates: &[String]) -> Result<Vec<ZoneRecord>, DomainError> {
        self.fail_if_unavailable()?;
        let map = self.by_address.read().unwrap();
        let mut records = Vec::new();
        for candidate in candidates {
            if let Some(found) = map.get(candidate) {
                records.extend(found.iter().cloned());
            }
        }
        Ok(records)
    }
}
