use async_trait::async_trait;
use hearth_dns_application::ports::RecordStore;
use hearth_dns_domain::{DomainError, RecordType, ZoneRecord};
use sqlx::SqlitePool;
use tracing::{error, warn};

const COLUMNS: &str = "name, record_type, ipv4_address, ipv6_address, target, priority";

type ZoneRecordRow = (
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<i64>,
);

/// SQLite-backed record store.
///
/// Read-only at query time; the pool is safe for concurrent use from
/// all in-flight query tasks. Every sqlx fault is collapsed into
/// `DomainError::StoreUnavailable` before it leaves this type.
pub struct SqliteZoneRecordRepository {
    pool: SqlitePool,
}

impl SqliteZoneRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: ZoneRecordRow) -> Option<ZoneRecord> {
        let (name, type_str, ipv4, ipv6, target, priority) = row;

        let Some(record_type) = RecordType::from_str(&type_str) else {
            warn!(name = %name, record_type = %type_str, "skipping row with unknown record type");
            return None;
        };

        let ipv4_address = match ipv4 {
            Some(s) => match s.parse() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    warn!(name = %name, address = %s, "skipping unparseable IPv4 address");
                    None
                }
            },
            None => None,
        };
        let ipv6_address = match ipv6 {
            Some(s) => match s.parse() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    warn!(name = %name, address = %s, "skipping unparseable IPv6 address");
                    None
                }
            },
            None => None,
        };

        Some(ZoneRecord {
            name,
            record_type,
            ipv4_address,
            ipv6_address,
            target,
            priority: priority.and_then(|p| u16::try_from(p).ok()),
        })
    }

    fn store_error(context: &str, e: sqlx::Error) -> DomainError {
        error!(error = %e, context, "record store query failed");
        DomainError::StoreUnavailable(e.to_string())
    }
}

#[async_trait]
impl RecordStore for SqliteZoneRecordRepository {
    async fn find_by_name_and_type(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<ZoneRecord>, DomainError> {
        let rows = sqlx::query_as::<_, ZoneRecordRow>(&format!(
            "SELECT {COLUMNS} FROM zone_records WHERE name = ? AND record_type = ? ORDER BY id"
        ))
        .bind(name)
        .bind(record_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::store_error("by name and type", e))?;

        Ok(rows.into_iter().filter_map(Self::row_to_record).collect())
    }

    async fn find_by_ipv4(&self, address: &str) -> Result<Vec<ZoneRecord>, DomainError> {
        let rows = sqlx::query_as::<_, ZoneRecordRow>(&format!(
            "SELECT {COLUMNS} FROM zone_records WHERE ipv4_address = ? ORDER BY id"
        ))
        .bind(address)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::store_error("by ipv4", e))?;

        Ok(rows.into_iter().filter_map(Self::row_to_record).collect())
    }

    async fn find_by_ipv6(&self, candidates: &[String]) -> Result<Vec<ZoneRecord>, DomainError> {
        let rows = match candidates {
            [] => Vec::new(),
            [only] => sqlx::query_as::<_, ZoneRecordRow>(&format!(
                "SELECT {COLUMNS} FROM zone_records WHERE ipv6_address = ? ORDER BY id"
            ))
            .bind(only)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::store_error("by ipv6", e))?,
            // An IPv4-mapped address may be indexed under either
            // representation.
            _ => sqlx::query_as::<_, ZoneRecordRow>(&format!(
                "SELECT {COLUMNS} FROM zone_records \
                 WHERE ipv6_address IN (?, ?) OR ipv4_address IN (?, ?) ORDER BY id"
            ))
            .bind(&candidates[0])
            .bind(&candidates[1])
            .bind(&candidates[0])
            .bind(&candidates[1])
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::store_error("by ipv6 candidates", e))?,
        };

        Ok(rows.into_iter().filter_map(Self::row_to_record).collect())
    }
}
