//! Raw socket reachability for `tcp://` and `udp://` targets.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::timeout;
use waitr_common::target::{Protocol, Target};

use crate::{Probe, ProbeOutcome};

/// Dials `host:port` and reports whether a connection establishes within
/// the attempt timeout.
pub struct StreamProbe;

#[async_trait]
impl Probe for StreamProbe {
    async fn attempt(&self, target: &Target, attempt_timeout: Duration) -> ProbeOutcome {
        let endpoint = target.endpoint();
        let dial = async {
            match target.protocol {
                Protocol::Udp => datagram_dial(&endpoint).await,
                _ => TcpStream::connect(&endpoint).await.map(|_| ()),
            }
        };

        match timeout(attempt_timeout, dial).await {
            Ok(Ok(())) => ProbeOutcome::Reachable,
            Ok(Err(err)) => ProbeOutcome::unreachable(format!("dial {endpoint}: {err}")),
            Err(_) => ProbeOutcome::unreachable(format!(
                "dial {endpoint}: no connection within {attempt_timeout:?}"
            )),
        }
    }
}

/// UDP has no handshake, so a successful `connect` only confirms the
/// datagram socket could be bound and directed at the peer address. Peer
/// liveness is not observable at this layer.
async fn datagram_dial(endpoint: &str) -> std::io::Result<()> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(endpoint).await
}
