//! Constructs forwarded DNS query messages in wire format.

use hearth_dns_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType as WireRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query (random ID, RD set) and serialize it.
    pub fn build_query(
        name: &str,
        record_type: WireRecordType,
    ) -> Result<Vec<u8>, DomainError> {
        let name = Name::from_str(name).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid name '{name}': {e}"))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new();
        message.set_id(fastrand::u16(..));
        message.set_message_type(MessageType::Query);
        message.set_op_code(OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS message: {e}"))
        })?;

        Ok(buf)
    }
}
