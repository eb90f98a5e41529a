use std::time::Duration;

use clap::Parser;

#[derive(Parser)]
#[command(name = "waitr")]
#[command(about = "Block until every declared dependency is reachable.")]
pub struct CommandLine {
    /// Dependency descriptors, e.g. tcp://db:5432, https://api/health,
    /// postgres://user:pw@db/
    #[arg(required = true, value_name = "DESCRIPTOR")]
    pub dependencies: Vec<String>,

    /// Per-attempt and overall wait timeout (e.g. 30s, 1m)
    #[arg(long, default_value = "1m", value_parser = humantime::parse_duration)]
    pub timeout: Duration,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
