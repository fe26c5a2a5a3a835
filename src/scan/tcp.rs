use std::{
    net::{SocketAddr, SocketAddrV4, TcpStream},
    time::Duration,
};

use crate::error::ScanError;

use super::{ProbeResult, Prober};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Full TCP handshake against the target port.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnect {
    timeout: Duration,
}

impl TcpConnect {
    /// A zero timeout is rejected: `connect_timeout` refuses it without ever
    /// trying to connect, so every port would look closed.
    pub fn new(timeout: Duration) -> Result<Self, ScanError> {
        if timeout.is_zero() {
            return Err(ScanError::InvalidTimeout);
        }

        Ok(Self { timeout })
    }
}

impl Default for TcpConnect {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Prober for TcpConnect {
    // Refused, timed out and unreachable all end up as closed. The stream is
    // dropped right away, closing the socket.
    fn probe(&self, addr: SocketAddrV4) -> ProbeResult {
        TcpStream::connect_timeout(&SocketAddr::V4(addr), self.timeout)
            .map_or(ProbeResult::Closed, |_| ProbeResult::Open(addr.port()))
    }
}
