//! Upstream forwarding with failover.
//!
//! Each forwarded query walks the endpoint chain in its fixed order and
//! stops at the first endpoint that yields a parseable response. Nothing
//! is cached between queries.

use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use hearth_dns_domain::{DomainError, TransportProtocol, UpstreamEndpoint};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{Record, RecordType as WireRecordType};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tracing::{debug, warn};

/// What the transport layer relays back to the client after a
/// successful forward.
#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub response_code: ResponseCode,
    pub answers: Vec<Record>,
    pub name_servers: Vec<Record>,
}

pub struct FailoverForwarder {
    endpoints: Vec<UpstreamEndpoint>,
    attempt_timeout: Duration,
}

impl FailoverForwarder {
    pub fn new(endpoints: Vec<UpstreamEndpoint>, attempt_timeout_ms: u64) -> Self {
        Self {
            endpoints,
            attempt_timeout: Duration::from_millis(attempt_timeout_ms),
        }
    }

    /// Forward a query, advancing through the endpoint chain on any
    /// transport failure or timeout. Only full exhaustion is an error.
    pub async fn forward(
        &self,
        name: &str,
        record_type: WireRecordType,
    ) -> Result<ForwardedResponse, DomainError> {
        let request_bytes = MessageBuilder::build_query(name, record_type)?;

        for endpoint in &self.endpoints {
            let attempt = match endpoint.protocol {
                TransportProtocol::Udp => self.query_udp(endpoint.address, &request_bytes).await,
                TransportProtocol::Tcp => self.query_tcp(endpoint.address, &request_bytes).await,
            };

            match attempt {
                Ok(response_bytes) => match ResponseParser::parse(&response_bytes) {
                    Ok(response) => {
                        debug!(endpoint = %endpoint, name, "forwarded query answered");
                        return Ok(response);
                    }
                    Err(e) => {
                        warn!(endpoint = %endpoint, error = %e, "unparseable upstream response");
                    }
                },
                Err(e) => {
                    debug!(endpoint = %endpoint, error = %e, "upstream attempt failed");
                }
            }
        }

        warn!(name, "all upstream endpoints exhausted");
        Err(DomainError::UpstreamExhausted)
    }

    async fn query_udp(&self, server: SocketAddr, request: &[u8]) -> io::Result<Vec<u8>> {
        let exchange = async {
            let bind_addr: SocketAddr = if server.is_ipv4() {
                SocketAddr::from(([0, 0, 0, 0], 0))
            } else {
                SocketAddr::from(([0u16; 8], 0))
            };
            let socket = UdpSocket::bind(bind_addr).await?;
            socket.connect(server).await?;
            socket.send(request).await?;

            let mut buf = vec![0u8; 4096];
            let len = socket.recv(&mut buf).await?;
            buf.truncate(len);
            Ok(buf)
        };

        tokio::time::timeout(self.attempt_timeout, exchange)
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "upstream attempt timed out"))?
    }

    async fn query_tcp(&self, server: SocketAddr, request: &[u8]) -> io::Result<Vec<u8>> {
        let exchange = async {
            let mut stream = TcpStream::connect(server).await?;

            let request_len = u16::try_from(request.len())
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "query too large"))?;
            stream.write_all(&request_len.to_be_bytes()).await?;
            stream.write_all(request).await?;

            let mut len_buf = [0u8; 2];
            stream.read_exact(&mut len_buf).await?;
            let response_len = usize::from(u16::from_be_bytes(len_buf));
            let mut buf = vec![0u8; response_len];
            stream.read_exact(&mut buf).await?;
            Ok(buf)
        };

        tokio::time::timeout(self.attempt_timeout, exchange)
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "upstream attempt timed out"))?
    }
}
