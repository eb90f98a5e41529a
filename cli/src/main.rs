mod commands;
mod terminal;

use std::process::ExitCode;

use commands::CommandLine;
use tracing::error;
use waitr_common::config::Config;
use waitr_common::target::Target;
use waitr_core::coordinator;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    terminal::logging::init();

    // All-or-nothing parse gate: every descriptor must parse before any
    // probe is spawned.
    let mut targets = Vec::with_capacity(commands.dependencies.len());
    for descriptor in &commands.dependencies {
        match Target::parse(descriptor) {
            Ok(target) => targets.push(target),
            Err(err) => {
                error!("{}", err);
                return ExitCode::FAILURE;
            }
        }
    }

    let config = Config::with_timeout(commands.timeout);
    let result = coordinator::wait(targets, &config).await;

    if result.all_reachable {
        ExitCode::SUCCESS
    } else {
        error!(
            "Timeout after {} waiting on dependencies to become available",
            humantime::format_duration(commands.timeout)
        );
        ExitCode::FAILURE
    }
}
