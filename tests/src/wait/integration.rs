//! End-to-end coordinator runs against real loopback sockets.

use std::time::{Duration, Instant};

use tokio::net::TcpListener;
use waitr_common::config::Config;
use waitr_common::target::Target;
use waitr_core::coordinator;

/// Short retry delay so deadline-bound tests finish fast.
fn quick_config(wait_timeout: Duration) -> Config {
    Config {
        attempt_timeout: Duration::from_secs(1),
        wait_timeout,
        retry_delay: Duration::from_millis(100),
    }
}

async fn reserved_free_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}

#[tokio::test]
async fn all_reachable_targets_resolve_well_before_the_deadline() -> anyhow::Result<()> {
    let first = TcpListener::bind("127.0.0.1:0").await?;
    let second = TcpListener::bind("127.0.0.1:0").await?;

    let targets = vec![
        Target::parse(&format!("tcp://127.0.0.1:{}", first.local_addr()?.port()))?,
        Target::parse(&format!("tcp://127.0.0.1:{}", second.local_addr()?.port()))?,
        Target::parse("udp://127.0.0.1:8125")?,
    ];

    let started = Instant::now();
    let result = coordinator::wait(targets, &quick_config(Duration::from_secs(10))).await;

    assert!(result.all_reachable);
    // First-attempt successes resolve without a single retry delay.
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "took {:?}",
        started.elapsed()
    );
    Ok(())
}

#[tokio::test]
async fn one_unreachable_target_fails_the_run_at_the_deadline() -> anyhow::Result<()> {
    let reachable = TcpListener::bind("127.0.0.1:0").await?;
    let dead_port = reserved_free_port().await?;

    let targets = vec![
        Target::parse(&format!("tcp://127.0.0.1:{}", reachable.local_addr()?.port()))?,
        Target::parse(&format!("tcp://127.0.0.1:{dead_port}"))?,
    ];

    let deadline = Duration::from_millis(600);
    let started = Instant::now();
    let result = coordinator::wait(targets, &quick_config(deadline)).await;

    assert!(!result.all_reachable);
    // The quick success on the first target does not shorten the wait.
    assert!(started.elapsed() >= deadline, "took {:?}", started.elapsed());
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "took {:?}",
        started.elapsed()
    );
    Ok(())
}

#[tokio::test]
async fn a_port_becoming_reachable_mid_run_succeeds() -> anyhow::Result<()> {
    let port = reserved_free_port().await?;

    // The dependency comes up a few retries in.
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        let listener = TcpListener::bind(("127.0.0.1", port)).await.unwrap();
        loop {
            let _ = listener.accept().await;
        }
    });

    let targets = vec![Target::parse(&format!("tcp://127.0.0.1:{port}"))?];

    let started = Instant::now();
    let result = coordinator::wait(targets, &quick_config(Duration::from_secs(10))).await;

    assert!(result.all_reachable);
    assert!(
        started.elapsed() >= Duration::from_millis(300),
        "took {:?}",
        started.elapsed()
    );
    Ok(())
}

#[tokio::test]
async fn no_targets_is_a_successful_run() -> anyhow::Result<()> {
    let result = coordinator::wait(Vec::new(), &quick_config(Duration::from_secs(1))).await;
    assert!(result.all_reachable);
    Ok(())
}
