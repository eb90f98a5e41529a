//! Per-protocol reachability strategies.
//!
//! Each strategy answers one question for one target: "is it reachable
//! right now?". A strategy performs a single bounded attempt; repeating
//! attempts and deciding when to give up belong to the caller. Strategies
//! never classify failures beyond a human-readable detail string.

use std::time::Duration;

use async_trait::async_trait;
use waitr_common::target::{Protocol, Target};

pub mod dsn;
pub mod http;
pub mod sql;
pub mod stream;

pub use http::HttpProbe;
pub use sql::SqlProbe;
pub use stream::StreamProbe;

/// Result of a single reachability attempt. The detail is diagnostic text
/// for debug logs; callers treat every unreachable outcome the same way.
#[derive(Debug)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable { detail: String },
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable)
    }

    pub(crate) fn unreachable(detail: impl Into<String>) -> Self {
        Self::Unreachable {
            detail: detail.into(),
        }
    }
}

/// A single reachability check appropriate to a target's protocol family.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Attempts to reach the target once, bounded by `attempt_timeout`.
    async fn attempt(&self, target: &Target, attempt_timeout: Duration) -> ProbeOutcome;
}

/// Selects the strategy matching a target's protocol.
pub fn for_protocol(protocol: Protocol) -> Box<dyn Probe> {
    match protocol {
        Protocol::Tcp | Protocol::Udp => Box::new(StreamProbe),
        Protocol::Http | Protocol::Https => Box::new(HttpProbe),
        Protocol::Mysql | Protocol::Postgres => Box::new(SqlProbe),
    }
}
