//! The per-target retry loop: probe, sleep a fixed delay, probe again,
//! until the target answers.
//!
//! There is deliberately no maximum attempt count. A bounded local retry
//! would force callers to tell "slow" apart from "broken", a distinction
//! this tool pushes entirely to the coordinator's global deadline. The
//! loop ends only on success or when its task is dropped.

use tokio::time::sleep;
use tracing::{debug, warn};
use waitr_common::config::Config;
use waitr_common::target::Target;
use waitr_probes::{Probe, ProbeOutcome};

/// Probes `target` until it is reachable, with the strategy matching its
/// protocol.
pub async fn run(target: Target, config: Config) {
    let probe = waitr_probes::for_protocol(target.protocol);
    run_with(target, probe.as_ref(), &config).await;
}

/// Same loop with the probe injected, the seam tests use to count
/// attempts and delays.
pub async fn run_with(target: Target, probe: &dyn Probe, config: &Config) {
    loop {
        match probe.attempt(&target, config.attempt_timeout).await {
            ProbeOutcome::Reachable => {
                debug!("Dependency reachable: {}", target);
                return;
            }
            ProbeOutcome::Unreachable { detail } => {
                warn!("Unable to connect: {}", target);
                debug!("Probe failed for {}: {}", target, detail);
                sleep(config.retry_delay).await;
            }
        }
    }
}
