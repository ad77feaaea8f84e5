use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportProtocol {
    Udp,
    Tcp,
}

impl TransportProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
        }
    }
}

/// One transport endpoint in the failover chain. The chain is built once
/// at startup and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamEndpoint {
    pub protocol: TransportProtocol,
    pub address: SocketAddr,
}

impl fmt::Display for UpstreamEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol.as_str(), self.address)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Primary upstream resolver, `ip:port`.
    #[serde(default = "default_primary")]
    pub primary: String,

    /// Secondary upstream resolver, tried once the primary is exhausted.
    #[serde(default = "default_secondary")]
    pub secondary: String,

    /// Per-endpoint attempt timeout in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl UpstreamConfig {
    /// Failover chain in fixed attempt order: UDP before TCP for each
    /// upstream, primary upstream before secondary.
    pub fn failover_chain(&self) -> Result<Vec<UpstreamEndpoint>, ConfigError> {
        let primary = parse_addr("upstream.primary", &self.primary)?;
        let secondary = parse_addr("upstream.secondary", &self.secondary)?;

        Ok(vec![
            UpstreamEndpoint {
                protocol: TransportProtocol::Udp,
                address: primary,
            },
            UpstreamEndpoint {
                protocol: TransportProtocol::Tcp,
                address: primary,
            },
            UpstreamEndpoint {
                protocol: TransportProtocol::Udp,
                address: secondary,
            },
            UpstreamEndpoint {
                protocol: TransportProtocol::Tcp,
                address: secondary,
            },
        ])
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn parse_addr(field: &str, value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .parse()
        .map_err(|e| ConfigError::Validation(format!("{field} '{value}': {e}")))
}

fn default_primary() -> String {
    "1.1.1.1:53".to_string()
}

fn default_secondary() -> String {
    "8.8.8.8:53".to_string()
}

fn default_query_timeout_ms() -> u64 {
    2_000
}
