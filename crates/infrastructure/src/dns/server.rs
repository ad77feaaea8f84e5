use crate::dns::forwarding::{FailoverForwarder, ForwardedResponse, RecordTypeMapper};
use hearth_dns_application::ResolveQueryUseCase;
use hearth_dns_domain::{Answer, DnsQuery, ResolutionOutcome, ResponseFailure};
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::{rdata, Name, RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Transport-facing request handler.
///
/// Decodes the wire query, runs the resolution engine and encodes the
/// outcome. A `Forwarded` outcome is executed here against the upstream
/// chain; exhaustion surfaces to the client as SERVFAIL.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<ResolveQueryUseCase>,
    forwarder: Arc<FailoverForwarder>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveQueryUseCase>, forwarder: Arc<FailoverForwarder>) -> Self {
        Self {
            use_case,
            forwarder,
        }
    }

    /// Build wire rdata for one synthesized answer. Answers carrying an
    /// unparseable target name are dropped with a warning.
    fn rdata_for(answer: &Answer) -> Option<RData> {
        match answer {
            Answer::A(address) => Some(RData::A(rdata::A(*address))),
            Answer::Aaaa(address) => Some(RData::AAAA(rdata::AAAA(*address))),
            Answer::Cname(target) => match Name::from_str(target) {
                Ok(name) => Some(RData::CNAME(rdata::CNAME(name))),
                Err(e) => {
                    warn!(target = %target, error = %e, "dropping CNAME answer with bad target");
                    None
                }
            },
            Answer::Mx { priority, exchange } => match Name::from_str(exchange) {
                Ok(name) => Some(RData::MX(rdata::MX::new(*priority, name))),
                Err(e) => {
                    warn!(exchange = %exchange, error = %e, "dropping MX answer with bad exchange");
                    None
                }
            },
            Answer::Ptr(target) => match Name::from_str(target) {
                Ok(name) => Some(RData::PTR(rdata::PTR(name))),
                Err(e) => {
                    warn!(target = %target, error = %e, "dropping PTR answer with bad target");
                    None
                }
            },
        }
    }

    fn failure_code(failure: ResponseFailure) -> ResponseCode {
        match failure {
            ResponseFailure::NxDomain => ResponseCode::NXDomain,
            ResponseFailure::ServFail => ResponseCode::ServFail,
            ResponseFailure::Refused => ResponseCode::Refused,
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let query = request.query();
        let name = DnsQuery::normalize_name(&query.name().to_string());
        let wire_type = query.query_type();

        debug!(name = %name, record_type = %wire_type, client = %request.src(), "query received");

        // Types outside local authority skip the engine and go straight
        // to the catch-all disposition.
        let outcome = match RecordTypeMapper::from_wire(wire_type) {
            Some(record_type) => {
                self.use_case
                    .execute(&DnsQuery::new(name.clone(), record_type))
                    .await
            }
            None => ResolutionOutcome::Forwarded,
        };

        match outcome {
            ResolutionOutcome::Answered { answers, ttl } => {
                let owner = Name::from(query.name().clone());
                let records: Vec<Record> = answers
                    .iter()
                    .filter_map(Self::rdata_for)
                    .map(|rdata| Record::from_rdata(owner.clone(), ttl, rdata))
                    .collect();

                debug!(name = %name, answers = records.len(), "answering from local zone");
                send_answers(request, &mut response_handle, records, true).await
            }
            ResolutionOutcome::Failed(failure) => {
                send_error_response(request, &mut response_handle, Self::failure_code(failure))
                    .await
            }
            ResolutionOutcome::Forwarded => {
                match self.forwarder.forward(&name, wire_type).await {
                    Ok(response) => {
                        send_forwarded(request, &mut response_handle, response).await
                    }
                    Err(e) => {
                        error!(name = %name, error = %e, "forwarding failed");
                        send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                            .await
                    }
                }
            }
        }
    }
}

async fn send_answers<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    records: Vec<Record>,
    authoritative: bool,
) -> ResponseInfo {
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_recursion_available(true);
    header.set_authoritative(authoritative);

    let response = builder.build(
        header,
        records.iter(),
        std::iter::empty(),
        std::iter::empty(),
        std::iter::empty(),
    );

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "failed to send response");
            ResponseInfo::from(*request.header())
        }
    }
}

async fn send_forwarded<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    forwarded: ForwardedResponse,
) -> ResponseInfo {
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_recursion_available(true);
    header.set_response_code(forwarded.response_code);

    let response = builder.build(
        header,
        forwarded.answers.iter(),
        forwarded.name_servers.iter(),
        std::iter::empty(),
        std::iter::empty(),
    );

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "failed to relay forwarded response");
            ResponseInfo::from(*request.header())
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    header.set_recursion_available(true);

    let response = builder.build(
        header,
        std::iter::empty(),
        std::iter::empty(),
        std::iter::empty(),
        std::iter::empty(),
    );

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
