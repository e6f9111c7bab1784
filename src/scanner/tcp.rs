//! TCP connect prober.
//!
//! Performs a full TCP handshake through the operating system's socket API
//! and closes the connection straight away. Needs no special privileges.

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::{PortResult, Prober};
use crate::types::Port;
use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// TCP connect prober for a single host.
#[derive(Debug, Clone)]
pub struct TcpConnectProber {
    target: IpAddr,
    timeout: Duration,
}

impl TcpConnectProber {
    /// Create a new prober.
    ///
    /// # Arguments
    /// * `target` - Host to connect to
    /// * `timeout` - Upper bound on each connection attempt
    pub fn new(target: IpAddr, timeout: Duration) -> Self {
        Self { target, timeout }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, port: Port) -> ScanResult<PortResult> {
        let addr = SocketAddr::new(self.target, port.as_u16());

        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                trace!(%port, "open");
                Ok(PortResult::open(port))
            }
            Ok(Err(e)) if is_resource_exhaustion(&e) => Err(ScanError::ResourceExhausted {
                port: port.as_u16(),
                source: e,
            }),
            Ok(Err(e)) => {
                trace!(%port, error = %e, "connect failed");
                Ok(PortResult::closed(port))
            }
            Err(_) => {
                trace!(%port, "connect timed out");
                Ok(PortResult::closed(port))
            }
        }
    }

    fn target(&self) -> IpAddr {
        self.target
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Errors that say more about this machine than about the target port.
fn is_resource_exhaustion(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::OutOfMemory {
        return true;
    }

    #[cfg(unix)]
    {
        matches!(
            e.raw_os_error(),
            Some(
                libc::EMFILE | libc::ENFILE | libc::ENOBUFS | libc::ENOMEM | libc::EADDRNOTAVAIL
            )
        )
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    fn localhost_prober(timeout_ms: u64) -> TcpConnectProber {
        TcpConnectProber::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            Duration::from_millis(timeout_ms),
        )
    }

    #[tokio::test]
    async fn test_listening_port_is_open() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        let result = localhost_prober(500).probe(port).await.unwrap();
        assert!(result.is_open());
        assert_eq!(result.port, port);
    }

    #[tokio::test]
    async fn test_released_port_is_closed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
        drop(listener);

        let result = localhost_prober(500).probe(port).await.unwrap();
        assert!(!result.is_open());
    }

    #[test]
    fn test_refused_is_not_exhaustion() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert!(!is_resource_exhaustion(&refused));
        let timed_out = io::Error::from(io::ErrorKind::TimedOut);
        assert!(!is_resource_exhaustion(&timed_out));
    }

    #[cfg(unix)]
    #[test]
    fn test_fd_exhaustion_detected() {
        let emfile = io::Error::from_raw_os_error(libc::EMFILE);
        assert!(is_resource_exhaustion(&emfile));
        let enobufs = io::Error::from_raw_os_error(libc::ENOBUFS);
        assert!(is_resource_exhaustion(&enobufs));
    }

    #[cfg(unix)]
    #[test]
    fn test_ephemeral_port_exhaustion_detected() {
        // connect() reports a drained local port pool as EADDRNOTAVAIL
        let no_local_port = io::Error::from_raw_os_error(libc::EADDRNOTAVAIL);
        assert!(is_resource_exhaustion(&no_local_port));

        let err = ScanError::ResourceExhausted {
            port: 8080,
            source: no_local_port,
        };
        assert!(err.to_string().starts_with("system resources exhausted while probing port 8080"));
    }
}
