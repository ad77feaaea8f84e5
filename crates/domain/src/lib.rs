//! Hearth DNS Domain Layer
pub mod config;
pub mod dns_query;
pub mod errors;
pub mod record_type;
pub mod resolution;
pub mod reverse_name;
pub mod zone_record;

pub use config::{CliOverrides, Config, TransportProtocol, UpstreamEndpoint};
pub use dns_query::DnsQuery;
pub use errors::DomainError;
pub use record_type::RecordType;
pub use resolution::{Answer, ResolutionOutcome, ResponseFailure};
pub use reverse_name::PtrCandidates;
pub use zone_record::ZoneRecord;
