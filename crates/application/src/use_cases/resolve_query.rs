use crate::ports::RecordStore;
use crate::router::{QueryRouter, Route};
use hearth_dns_domain::{
    reverse_name, Answer, DnsQuery, DomainError, RecordType, ResolutionOutcome, ResponseFailure,
    ZoneRecord,
};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use tracing::{debug, warn};

/// The query-resolution engine.
///
/// Routes a query, runs the matched handler against the record store and
/// folds every possible error into a definite `ResolutionOutcome` — no
/// fault escapes to the transport layer unmapped.
pub struct ResolveQueryUseCase {
    store: Arc<dyn RecordStore>,
    router: QueryRouter,
    ttl: u32,
}

impl ResolveQueryUseCase {
    pub fn new(store: Arc<dyn RecordStore>, router: QueryRouter, ttl: u32) -> Self {
        Self { store, router, ttl }
    }

    pub async fn execute(&self, query: &DnsQuery) -> ResolutionOutcome {
        match self.router.route(query) {
            Route::LocalhostV4 => {
                ResolutionOutcome::answered(vec![Answer::A(Ipv4Addr::LOCALHOST)], self.ttl)
            }
            Route::LocalhostV6 => {
                ResolutionOutcome::answered(vec![Answer::Aaaa(Ipv6Addr::LOCALHOST)], self.ttl)
            }
            Route::LocalA { label } => self.local_zone(&label, RecordType::A).await,
            Route::LocalAaaa { label } => self.local_zone(&label, RecordType::AAAA).await,
            Route::LocalCname { label } => self.local_cname(&label).await,
            Route::LocalMx { label } => self.local_zone(&label, RecordType::MX).await,
            Route::PtrV4 => self.reverse_v4(query.name.as_ref()).await,
            Route::PtrV6 => self.reverse_v6(query.name.as_ref()).await,
            Route::Forward => ResolutionOutcome::Forwarded,
        }
    }

    /// Local-zone policy: fail closed. Zero usable records is NXDOMAIN,
    /// a store outage is SERVFAIL.
    async fn local_zone(&self, label: &str, record_type: RecordType) -> ResolutionOutcome {
        let records = match self.store.find_by_name_and_type(label, record_type).await {
            Ok(records) => records,
            Err(e) => return Self::store_failure(label, e),
        };

        let answers: Vec<Answer> = records.iter().filter_map(Self::answer_from).collect();
        if answers.is_empty() {
            debug!(label, record_type = %record_type, "no local records");
            ResolutionOutcome::Failed(ResponseFailure::NxDomain)
        } else {
            ResolutionOutcome::answered(answers, self.ttl)
        }
    }

    /// Multiple CNAMEs for one name are not a valid zone state; at most
    /// the first usable record is answered.
    async fn local_cname(&self, label: &str) -> ResolutionOutcome {
        let records = match self
            .store
            .find_by_name_and_type(label, RecordType::CNAME)
            .await
        {
            Ok(records) => records,
            Err(e) => return Self::store_failure(label, e),
        };

        match records.iter().find_map(Self::answer_from) {
            Some(answer) => ResolutionOutcome::answered(vec![answer], self.ttl),
            None => ResolutionOutcome::Failed(ResponseFailure::NxDomain),
        }
    }

    async fn reverse_v4(&self, name: &str) -> ResolutionOutcome {
        let candidates = match reverse_name::parse_v4(name) {
            Ok(candidates) => candidates,
            Err(_) => {
                debug!(name, "malformed in-addr.arpa name");
                return ResolutionOutcome::Failed(ResponseFailure::Refused);
            }
        };

        let result = self.store.find_by_ipv4(&candidates.addresses[0]).await;
        self.ptr_outcome(result)
    }

    async fn reverse_v6(&self, name: &str) -> ResolutionOutcome {
        let candidates = match reverse_name::parse_v6(name) {
            Ok(candidates) => candidates,
            Err(_) => {
                debug!(name, "malformed ip6.arpa name");
                return ResolutionOutcome::Failed(ResponseFailure::Refused);
            }
        };

        let result = self.store.find_by_ipv6(&candidates.addresses).await;
        self.ptr_outcome(result)
    }

    /// Reverse-lookup policy: fail open. External addresses routinely
    /// miss the local store, so both a miss and an outage delegate to
    /// the upstream resolver instead of failing the query.
    fn ptr_outcome(&self, result: Result<Vec<ZoneRecord>, DomainError>) -> ResolutionOutcome {
        let records = match result {
            Ok(records) => records,
            Err(e) => {
                debug!(error = %e, "store fault on reverse lookup, delegating upstream");
                return ResolutionOutcome::Forwarded;
            }
        };

        if records.is_empty() {
            return ResolutionOutcome::Forwarded;
        }

        let suffix = self.router.suffix();
        let answers = records
            .iter()
            .map(|record| Answer::Ptr(format!("{}.{}", record.name, suffix)))
            .collect();
        ResolutionOutcome::answered(answers, self.ttl)
    }

    fn store_failure(label: &str, error: DomainError) -> ResolutionOutcome {
        warn!(label, error = %error, "record store unavailable");
        ResolutionOutcome::Failed(ResponseFailure::ServFail)
    }

    /// Synthesize the answer for one store row. A row missing the field
    /// its type requires is skipped, not fatal.
    fn answer_from(record: &ZoneRecord) -> Option<Answer> {
        let answer = match record.record_type {
            RecordType::A => record.ipv4_address.map(Answer::A),
            RecordType::AAAA => record.ipv6_address.map(Answer::Aaaa),
            RecordType::CNAME => record.target.clone().map(Answer::Cname),
            RecordType::MX => match (&record.target, record.priority) {
                (Some(exchange), Some(priority)) => Some(Answer::Mx {
                    priority,
                    exchange: exchange.clone(),
                }),
                _ => None,
            },
            RecordType::PTR => None,
        };

        if answer.is_none() {
            warn!(
                name = %record.name,
                record_type = %record.record_type,
                "skipping zone record with missing data"
            );
        }
        answer
    }
}
