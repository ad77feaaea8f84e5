//! Query routing.
//!
//! An incoming query is matched against a fixed rule order; the first
//! rule that matches wins and no later rule is consulted. Matching is
//! structural (exact name, anchored suffix, arpa shape) rather than
//! regex-based.

use hearth_dns_domain::{reverse_name, DnsQuery, RecordType};

/// The handler a query dispatches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `localhost`/A, answered without touching the store.
    LocalhostV4,
    /// `localhost`/AAAA, answered without touching the store.
    LocalhostV6,
    /// `<label>.<suffix>` local-zone lookup; `label` is the store key
    /// with the suffix already stripped.
    LocalA { label: String },
    LocalAaaa { label: String },
    LocalCname { label: String },
    LocalMx { label: String },
    /// Reverse lookup under `in-addr.arpa`.
    PtrV4,
    /// Reverse lookup under `ip6.arpa`.
    PtrV6,
    /// Catch-all: not locally authoritative, delegate upstream.
    Forward,
}

pub struct QueryRouter {
    suffix: String,
}

impl QueryRouter {
    pub fn new(suffix: &str) -> Self {
        Self {
            suffix: suffix.trim_matches('.').to_ascii_lowercase(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Match `query` against the rules in declared order.
    pub fn route(&self, query: &DnsQuery) -> Route {
        let name = query.name.as_ref();

        if name == "localhost" {
            match query.record_type {
                RecordType::A => return Route::LocalhostV4,
                RecordType::AAAA => return Route::LocalhostV6,
                _ => {}
            }
        }

        if let Some(label) = self.local_label(name) {
            match query.record_type {
                RecordType::A => return Route::LocalA { label },
                RecordType::AAAA => return Route::LocalAaaa { label },
                RecordType::CNAME => return Route::LocalCname { label },
                RecordType::MX => return Route::LocalMx { label },
                RecordType::PTR => {}
            }
        }

        if query.record_type == RecordType::PTR {
            if name.ends_with(reverse_name::V4_ARPA_SUFFIX) {
                return Route::PtrV4;
            }
            if name.ends_with(reverse_name::V6_ARPA_SUFFIX) {
                return Route::PtrV6;
            }
        }

        Route::Forward
    }

    /// Anchored suffix match. The bare suffix itself does not match;
    /// the returned label never carries the suffix.
    fn local_label(&self, name: &str) -> Option<String> {
        let stem = name.strip_suffix(self.suffix.as_str())?;
        let label = stem.strip_suffix('.')?;
        if label.is_empty() {
            None
        } else {
            Some(label.to_string())
        }
    }
}
