use std::io::ErrorKind;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time;
use tracing::{info, warn};

use crate::types::PortState;

/// Attempt one TCP connect to `host:port`, bounded by `timeout`.
///
/// - A completed handshake classifies as [`PortState::Open`]; the stream is
///   dropped before returning so no handle outlives its probe.
/// - Connection refused and connect timeout classify as [`PortState::Closed`].
/// - Any other transport fault (unreachable network, unresolvable address)
///   classifies as [`PortState::Error`], which is logged louder but counts
///   the same as closed for reporting.
///
/// Each attempt emits exactly one log line. There are no retries.
pub async fn probe(host: &str, port: u16, timeout: Duration) -> PortState {
    match time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => {
            drop(stream);
            info!(host, port, "port open");
            PortState::Open
        }
        Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => {
            info!(host, port, "port closed");
            PortState::Closed
        }
        Ok(Err(e)) => {
            warn!(host, port, error = %e, "probe failed");
            PortState::Error
        }
        Err(_) => {
            info!(host, port, "port closed (connect timed out)");
            PortState::Closed
        }
    }
}
