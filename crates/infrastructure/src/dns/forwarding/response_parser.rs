use super::forwarder::ForwardedResponse;
use hearth_dns_domain::DomainError;
use hickory_proto::op::Message;

pub struct ResponseParser;

impl ResponseParser {
    /// Parse an upstream wire response into the pieces the transport
    /// layer relays back: answers, authority records and response code.
    pub fn parse(response_bytes: &[u8]) -> Result<ForwardedResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to parse DNS response: {e}"))
        })?;

        Ok(ForwardedResponse {
            response_code: message.response_code(),
            answers: message.answers().to_vec(),
            name_servers: message.name_servers().to_vec(),
        })
    }
}
