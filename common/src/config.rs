use std::time::Duration;

/// Fixed pause between two probe attempts against the same target.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Default value for the single `--timeout` flag.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Runtime knobs shared by the retry loops and the coordinator.
///
/// The attempt timeout and the wait deadline are independent fields even
/// though the CLI defaults both from one flag; callers embedding the core
/// as a library can set them separately.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on a single reachability attempt (dial, GET, ping).
    pub attempt_timeout: Duration,
    /// Global deadline for all targets to become reachable.
    pub wait_timeout: Duration,
    /// Pause between consecutive attempts of one retry loop.
    pub retry_delay: Duration,
}

impl Config {
    /// Config the CLI uses: one duration seeds both timeouts.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            attempt_timeout: timeout,
            wait_timeout: timeout,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_WAIT_TIMEOUT)
    }
}
