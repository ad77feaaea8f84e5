pub mod zone_record_repository;

pub use zone_record_repository::SqliteZoneRecordRepository;
