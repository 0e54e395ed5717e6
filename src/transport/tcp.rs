//! # TCP Transport
//!
//! Network printer transport for JetDirect-style raw printing (usually
//! port 9100).
//!
//! ## Timeout Semantics
//!
//! Four knobs, all optional, combined per I/O call:
//!
//! - `timeout`: general limit for any single read or write
//! - `read_timeout` / `write_timeout`: operation-specific limits that take
//!   priority over the general one
//! - `deadline`: an absolute instant after which every operation fails
//!
//! The effective limit is recomputed and applied to the socket *before
//! every individual read and write*, never once at connect time: a
//! long-lived session must not inherit a stale deadline remainder, and the
//! specific-beats-general priority has to hold per call. An expired
//! deadline fails the operation without touching the socket.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use super::Transport;

/// Optional time limits for a [`TcpTransport`].
///
/// The zero value applies no limits (blocking I/O).
#[derive(Debug, Clone, Copy, Default)]
pub struct Timeouts {
    /// General per-operation limit for reads and writes.
    pub timeout: Option<Duration>,
    /// Read-specific limit; overrides `timeout` for reads.
    pub read_timeout: Option<Duration>,
    /// Write-specific limit; overrides `timeout` for writes.
    pub write_timeout: Option<Duration>,
    /// Absolute cutoff for all operations on this connection.
    pub deadline: Option<Instant>,
}

/// A TCP connection to a network printer.
///
/// ## Example
///
/// ```no_run
/// use std::time::Duration;
/// use recibo::transport::{TcpTransport, Timeouts};
///
/// let transport = TcpTransport::connect_with(
///     "192.168.1.50:9100",
///     Timeouts {
///         timeout: Some(Duration::from_secs(5)),
///         read_timeout: Some(Duration::from_millis(500)),
///         ..Default::default()
///     },
/// )?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct TcpTransport {
    stream: TcpStream,
    timeouts: Timeouts,
}

impl TcpTransport {
    /// Connect with no time limits.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        Self::connect_with(addr, Timeouts::default())
    }

    /// Connect with the given time limits.
    pub fn connect_with<A: ToSocketAddrs>(addr: A, timeouts: Timeouts) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        log::debug!("connected to {:?}", stream.peer_addr());
        Ok(TcpTransport { stream, timeouts })
    }

    /// Replace the time limits for subsequent operations.
    pub fn set_timeouts(&mut self, timeouts: Timeouts) {
        self.timeouts = timeouts;
    }

    fn apply_read_limit(&self) -> io::Result<()> {
        let limit = effective_limit(
            self.timeouts.read_timeout,
            self.timeouts.timeout,
            self.timeouts.deadline,
            Instant::now(),
        )?;
        self.stream.set_read_timeout(limit)
    }

    fn apply_write_limit(&self) -> io::Result<()> {
        let limit = effective_limit(
            self.timeouts.write_timeout,
            self.timeouts.timeout,
            self.timeouts.deadline,
            Instant::now(),
        )?;
        self.stream.set_write_timeout(limit)
    }
}

/// Resolve the limit for one I/O call.
///
/// The specific limit beats the general one; the deadline's remaining time
/// caps whichever applies. A deadline at or before `now` is an immediate
/// timeout error.
fn effective_limit(
    specific: Option<Duration>,
    general: Option<Duration>,
    deadline: Option<Instant>,
    now: Instant,
) -> io::Result<Option<Duration>> {
    let limit = specific.or(general);

    let Some(deadline) = deadline else {
        return Ok(limit);
    };

    let remaining = deadline.checked_duration_since(now).ok_or_else(|| {
        io::Error::new(io::ErrorKind::TimedOut, "connection deadline exceeded")
    })?;
    if remaining.is_zero() {
        return Err(io::Error::new(
            io::ErrorKind::TimedOut,
            "connection deadline exceeded",
        ));
    }

    Ok(Some(match limit {
        Some(limit) => limit.min(remaining),
        None => remaining,
    }))
}

impl Read for TcpTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.apply_read_limit()?;
        self.stream.read(buf)
    }
}

impl Write for TcpTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.apply_write_limit()?;
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl Transport for TcpTransport {
    fn close(&mut self) -> io::Result<()> {
        self.stream.shutdown(Shutdown::Both)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_no_limits_by_default() {
        let now = Instant::now();
        assert_eq!(effective_limit(None, None, None, now).unwrap(), None);
    }

    #[test]
    fn test_general_timeout_applies() {
        let now = Instant::now();
        let limit = effective_limit(None, Some(Duration::from_secs(2)), None, now).unwrap();
        assert_eq!(limit, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_specific_timeout_wins_over_general() {
        let now = Instant::now();
        let limit = effective_limit(
            Some(Duration::from_millis(50)),
            Some(Duration::from_millis(200)),
            None,
            now,
        )
        .unwrap();
        assert_eq!(limit, Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_deadline_caps_timeout() {
        let now = Instant::now();
        let limit = effective_limit(
            None,
            Some(Duration::from_secs(10)),
            Some(now + Duration::from_secs(1)),
            now,
        )
        .unwrap();
        assert_eq!(limit, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_deadline_alone_becomes_the_limit() {
        let now = Instant::now();
        let limit =
            effective_limit(None, None, Some(now + Duration::from_secs(3)), now).unwrap();
        assert_eq!(limit, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_expired_deadline_errors_before_io() {
        let now = Instant::now();
        let err = effective_limit(None, None, Some(now - Duration::from_secs(1)), now)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_connect_write_read_roundtrip() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut buf = [0u8; 16];
            let n = conn.read(&mut buf).unwrap();
            conn.write_all(&buf[..n]).unwrap();
        });

        let mut transport = TcpTransport::connect(addr).unwrap();
        transport.write_all(b"ping").unwrap();
        let mut buf = [0u8; 4];
        transport.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ping");

        transport.close().unwrap();
        server.join().unwrap();
    }

    #[test]
    fn test_read_times_out_on_silent_peer() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept but never respond
        let server = thread::spawn(move || {
            let (conn, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_millis(300));
            drop(conn);
        });

        let mut transport = TcpTransport::connect_with(
            addr,
            Timeouts {
                read_timeout: Some(Duration::from_millis(50)),
                ..Default::default()
            },
        )
        .unwrap();

        let mut buf = [0u8; 1];
        let err = transport.read(&mut buf).unwrap_err();
        assert!(
            matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut),
            "unexpected error kind: {:?}",
            err.kind()
        );
        server.join().unwrap();
    }

    #[test]
    fn test_expired_deadline_fails_write() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let mut transport = TcpTransport::connect_with(
            addr,
            Timeouts {
                deadline: Some(Instant::now() - Duration::from_secs(1)),
                ..Default::default()
            },
        )
        .unwrap();

        let err = transport.write(b"late").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }
}
