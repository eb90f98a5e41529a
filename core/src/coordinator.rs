//! Fans out one retry loop per target and arbitrates their joint
//! completion against the global deadline.
//!
//! The coordinator does no probing itself. Targets are fully independent:
//! the only ordering contract is that `wait` resolves once every loop is
//! done or the deadline elapses, whichever is first.

use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::sleep;
use waitr_common::config::Config;
use waitr_common::target::Target;

use crate::retry;

/// The only externally observable result. Per-target failure causes are
/// surfaced as log lines while probing, never aggregated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorResult {
    pub all_reachable: bool,
}

/// Waits until every target is reachable or the deadline passes.
///
/// Each target gets its own concurrently spawned retry loop; the
/// [`JoinSet`] is the counting join over them. When the deadline fires
/// first, dropping the set aborts the straggling loops, so embedders do
/// not rely on process exit to reclaim them.
pub async fn wait(targets: Vec<Target>, config: &Config) -> CoordinatorResult {
    let mut loops = JoinSet::new();
    for target in targets {
        loops.spawn(retry::run(target, config.clone()));
    }

    join_or_deadline(loops, config.wait_timeout).await
}

/// Races "every spawned loop has joined" against the deadline. `biased`
/// polls the completion arm first, so an exactly coincident completion
/// resolves as success.
async fn join_or_deadline(mut loops: JoinSet<()>, deadline: Duration) -> CoordinatorResult {
    let all_done = async move { while loops.join_next().await.is_some() {} };

    tokio::select! {
        biased;
        _ = all_done => CoordinatorResult { all_reachable: true },
        _ = sleep(deadline) => CoordinatorResult { all_reachable: false },
    }
}
