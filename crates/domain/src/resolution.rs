use std::net::{Ipv4Addr, Ipv6Addr};

/// Failure codes a handler can map a query to. These are the only
/// response codes the resolution engine produces itself; everything
/// else comes back from an upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFailure {
    NxDomain,
    ServFail,
    Refused,
}

/// A single synthesized answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(String),
    Mx { priority: u16, exchange: String },
    Ptr(String),
}

/// The one definite disposition every query resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Answered { answers: Vec<Answer>, ttl: u32 },
    Failed(ResponseFailure),
    Forwarded,
}

impl ResolutionOutcome {
    pub fn answered(answers: Vec<Answer>, ttl: u32) -> Self {
        ResolutionOutcome::Answered { answers, ttl }
    }
}
