use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Malformed reverse-lookup name: {0}")]
    MalformedAddress(String),

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("All upstream endpoints exhausted")]
    UpstreamExhausted,

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("I/O error: {0}")]
    IoError(String),
}
