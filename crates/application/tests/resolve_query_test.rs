mod helpers;

use hearth_dns_application::{QueryRouter, ResolveQueryUseCase};
use hearth_dns_domain::{
    Answer, DnsQuery, RecordType, ResolutionOutcome, ResponseFailure, ZoneRecord,
};
use helpers::MockRecordStore;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

const TTL: u32 = 300;

fn make_use_case(store: Arc<MockRecordStore>) -> ResolveQueryUseCase {
    ResolveQueryUseCase::new(store, QueryRouter::new("lan"), TTL)
}

fn reversed_v6_name(address: Ipv6Addr) -> String {
    let hex: String = address
        .octets()
        .iter()
        .map(|o| format!("{o:02x}"))
        .collect();
    let mut labels: Vec<String> = hex.chars().map(|c| c.to_string()).collect();
    labels.reverse();
    format!("{}.ip6.arpa", labels.join("."))
}

// ── localhost rules ────────────────────────────────────────────────────────

#[tokio::test]
async fn localhost_a_answers_loopback_without_store_access() {
    let store = Arc::new(MockRecordStore::new());
    let use_case = make_use_case(store.clone());

    let outcome = use_case
        .execute(&DnsQuery::new("localhost", RecordType::A))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![Answer::A(Ipv4Addr::LOCALHOST)],
            ttl: TTL
        }
    );
    assert_eq!(store.lookup_count(), 0);
}

#[tokio::test]
async fn localhost_aaaa_answers_v6_loopback() {
    let store = Arc::new(MockRecordStore::new());
    let use_case = make_use_case(store.clone());

    let outcome = use_case
        .execute(&DnsQuery::new("localhost", RecordType::AAAA))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![Answer::Aaaa(Ipv6Addr::LOCALHOST)],
            ttl: TTL
        }
    );
    assert_eq!(store.lookup_count(), 0);
}

// ── local zone: A / AAAA ───────────────────────────────────────────────────

#[tokio::test]
async fn local_a_answers_every_matching_record() {
    let store = Arc::new(MockRecordStore::new());
    store.insert(ZoneRecord::a("printer", Ipv4Addr::new(10, 0, 0, 9)));
    store.insert(ZoneRecord::a("printer", Ipv4Addr::new(10, 0, 0, 10)));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new("printer.lan", RecordType::A))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![
                Answer::A(Ipv4Addr::new(10, 0, 0, 9)),
                Answer::A(Ipv4Addr::new(10, 0, 0, 10)),
            ],
            ttl: TTL
        }
    );
}

#[tokio::test]
async fn local_a_with_no_records_is_nxdomain() {
    let use_case = make_use_case(Arc::new(MockRecordStore::new()));
    let outcome = use_case
        .execute(&DnsQuery::new("ghost.lan", RecordType::A))
        .await;
    assert_eq!(outcome, ResolutionOutcome::Failed(ResponseFailure::NxDomain));
}

#[tokio::test]
async fn aaaa_lookup_uses_its_own_type_tag() {
    // An A record for the label must not satisfy an AAAA query.
    let store = Arc::new(MockRecordStore::new());
    store.insert(ZoneRecord::a("printer", Ipv4Addr::new(10, 0, 0, 9)));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new("printer.lan", RecordType::AAAA))
        .await;
    assert_eq!(outcome, ResolutionOutcome::Failed(ResponseFailure::NxDomain));
}

#[tokio::test]
async fn local_aaaa_answers_v6_record() {
    let store = Arc::new(MockRecordStore::new());
    let addr: Ipv6Addr = "fd00::9".parse().unwrap();
    store.insert(ZoneRecord::aaaa("printer", addr));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new("printer.lan", RecordType::AAAA))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![Answer::Aaaa(addr)],
            ttl: TTL
        }
    );
}

#[tokio::test]
async fn store_outage_on_local_zone_is_servfail() {
    let store = Arc::new(MockRecordStore::new());
    store.set_unavailable(true);

    let use_case = make_use_case(store);
    for record_type in [
        RecordType::A,
        RecordType::AAAA,
        RecordType::CNAME,
        RecordType::MX,
    ] {
        let outcome = use_case
            .execute(&DnsQuery::new("printer.lan", record_type))
            .await;
        assert_eq!(
            outcome,
            ResolutionOutcome::Failed(ResponseFailure::ServFail),
            "type {record_type:?}"
        );
    }
}

#[tokio::test]
async fn defective_rows_are_skipped_not_fatal() {
    let store = Arc::new(MockRecordStore::new());
    let mut broken = ZoneRecord::a("printer", Ipv4Addr::new(10, 0, 0, 9));
    broken.ipv4_address = None;
    store.insert(broken);
    store.insert(ZoneRecord::a("printer", Ipv4Addr::new(10, 0, 0, 10)));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new("printer.lan", RecordType::A))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![Answer::A(Ipv4Addr::new(10, 0, 0, 10))],
            ttl: TTL
        }
    );
}

// ── local zone: CNAME / MX ─────────────────────────────────────────────────

#[tokio::test]
async fn cname_answers_at_most_one_record() {
    let store = Arc::new(MockRecordStore::new());
    store.insert(ZoneRecord::cname("www", "web01.lan"));
    store.insert(ZoneRecord::cname("www", "web02.lan"));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new("www.lan", RecordType::CNAME))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![Answer::Cname("web01.lan".to_string())],
            ttl: TTL
        }
    );
}

#[tokio::test]
async fn cname_with_no_records_is_nxdomain() {
    let use_case = make_use_case(Arc::new(MockRecordStore::new()));
    let outcome = use_case
        .execute(&DnsQuery::new("www.lan", RecordType::CNAME))
        .await;
    assert_eq!(outcome, ResolutionOutcome::Failed(ResponseFailure::NxDomain));
}

#[tokio::test]
async fn mx_answers_with_priority_and_exchange() {
    let store = Arc::new(MockRecordStore::new());
    store.insert(ZoneRecord::mx("mail", "smtp.lan", 10));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new("mail.lan", RecordType::MX))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![Answer::Mx {
                priority: 10,
                exchange: "smtp.lan".to_string()
            }],
            ttl: TTL
        }
    );
}

// ── reverse lookups ────────────────────────────────────────────────────────

#[tokio::test]
async fn ptr_v4_hit_synthesizes_name_under_suffix() {
    let store = Arc::new(MockRecordStore::new());
    store.insert_for_address("10.0.0.9", ZoneRecord::a("printer", Ipv4Addr::new(10, 0, 0, 9)));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new("9.0.0.10.in-addr.arpa", RecordType::PTR))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![Answer::Ptr("printer.lan".to_string())],
            ttl: TTL
        }
    );
}

#[tokio::test]
async fn ptr_miss_fails_open_to_forwarding() {
    let use_case = make_use_case(Arc::new(MockRecordStore::new()));
    let outcome = use_case
        .execute(&DnsQuery::new("4.3.2.1.in-addr.arpa", RecordType::PTR))
        .await;
    assert_eq!(outcome, ResolutionOutcome::Forwarded);
}

#[tokio::test]
async fn ptr_store_outage_fails_open_to_forwarding() {
    let store = Arc::new(MockRecordStore::new());
    store.set_unavailable(true);

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new("4.3.2.1.in-addr.arpa", RecordType::PTR))
        .await;
    assert_eq!(outcome, ResolutionOutcome::Forwarded);
}

#[tokio::test]
async fn ptr_v6_probes_mapped_v4_candidate() {
    // Host indexed under its dotted quad, queried via the reverse name
    // of the IPv4-mapped IPv6 form.
    let store = Arc::new(MockRecordStore::new());
    store.insert_for_address("1.2.3.4", ZoneRecord::a("gateway", Ipv4Addr::new(1, 2, 3, 4)));

    let mapped: Ipv6Addr = "::ffff:1.2.3.4".parse().unwrap();
    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new(reversed_v6_name(mapped), RecordType::PTR))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![Answer::Ptr("gateway.lan".to_string())],
            ttl: TTL
        }
    );
}

#[tokio::test]
async fn ptr_v6_hit_on_canonical_address() {
    let store = Arc::new(MockRecordStore::new());
    let addr: Ipv6Addr = "fd00::9".parse().unwrap();
    store.insert_for_address(&addr.to_string(), ZoneRecord::aaaa("printer", addr));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&DnsQuery::new(reversed_v6_name(addr), RecordType::PTR))
        .await;

    assert_eq!(
        outcome,
        ResolutionOutcome::Answered {
            answers: vec![Answer::Ptr("printer.lan".to_string())],
            ttl: TTL
        }
    );
}

#[tokio::test]
async fn malformed_ptr_names_are_refused() {
    let store = Arc::new(MockRecordStore::new());
    let use_case = make_use_case(store.clone());

    for name in [
        "256.0.0.10.in-addr.arpa",
        "0.10.in-addr.arpa",
        "x.y.z.w.in-addr.arpa",
        "g.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.ip6.arpa",
        "1.2.3.ip6.arpa",
    ] {
        let outcome = use_case.execute(&DnsQuery::new(name, RecordType::PTR)).await;
        assert_eq!(
            outcome,
            ResolutionOutcome::Failed(ResponseFailure::Refused),
            "name {name}"
        );
    }
    // Refusal happens before any store probe.
    assert_eq!(store.lookup_count(), 0);
}

// ── catch-all ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn foreign_names_forward_without_store_access() {
    let store = Arc::new(MockRecordStore::new());
    let use_case = make_use_case(store.clone());

    let outcome = use_case
        .execute(&DnsQuery::new("example.com", RecordType::A))
        .await;

    assert_eq!(outcome, ResolutionOutcome::Forwarded);
    assert_eq!(store.lookup_count(), 0);
}
