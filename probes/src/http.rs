//! HTTP(S) reachability: GET the target URI, accept any 2xx.

use std::time::Duration;

use async_trait::async_trait;
use waitr_common::target::Target;

use crate::{Probe, ProbeOutcome};

/// Issues a GET against the full descriptor URI. A non-2xx status and a
/// transport error are the same "not yet reachable" class.
pub struct HttpProbe;

#[async_trait]
impl Probe for HttpProbe {
    async fn attempt(&self, target: &Target, attempt_timeout: Duration) -> ProbeOutcome {
        let client = match reqwest::Client::builder().timeout(attempt_timeout).build() {
            Ok(client) => client,
            Err(err) => return ProbeOutcome::unreachable(format!("http client: {err}")),
        };

        match client.get(&target.raw).send().await {
            Ok(response) if response.status().is_success() => ProbeOutcome::Reachable,
            Ok(response) => {
                ProbeOutcome::unreachable(format!("GET {}: status {}", target.raw, response.status()))
            }
            Err(err) => ProbeOutcome::unreachable(format!("GET {}: {err}", target.raw)),
        }
    }
}
