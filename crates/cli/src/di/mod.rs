use hearth_dns_application::{QueryRouter, ResolveQueryUseCase};
use hearth_dns_domain::Config;
use hearth_dns_infrastructure::dns::{DnsServerHandler, FailoverForwarder};
use hearth_dns_infrastructure::repositories::SqliteZoneRecordRepository;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

/// Wires the process-wide, read-only service graph once at startup.
pub struct Services {
    pub handler: DnsServerHandler,
}

impl Services {
    pub fn new(config: &Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let store = Arc::new(SqliteZoneRecordRepository::new(pool));
        let router = QueryRouter::new(&config.zone.suffix);
        let use_case = Arc::new(ResolveQueryUseCase::new(store, router, config.zone.ttl));

        let chain = config.upstream.failover_chain()?;
        info!(
            endpoints = %chain
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            "Upstream failover chain"
        );
        let forwarder = Arc::new(FailoverForwarder::new(
            chain,
            config.upstream.query_timeout_ms,
        ));

        Ok(Self {
            handler: DnsServerHandler::new(use_case, forwarder),
        })
    }
}
