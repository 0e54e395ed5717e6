//! # Printer Transport Layer
//!
//! Duplex byte channels for talking to a physical printer.
//!
//! ## Available Transports
//!
//! - [`tcp`]: network printers (JetDirect-style port 9100), with
//!   per-operation timeout and deadline handling
//! - [`serial`]: raw-mode character devices (USB serial, RS-232, RFCOMM)
//!
//! Anything implementing [`Transport`] works — the session layer only
//! needs `Read + Write` plus an explicit close.

pub mod serial;
pub mod tcp;

pub use serial::SerialTransport;
pub use tcp::{TcpTransport, Timeouts};

use std::io::{Read, Write};

/// A duplex byte channel to a printer.
///
/// Writes must report short counts accurately (the session relies on
/// `write_all` semantics composed from honest partial writes), and reads
/// may legitimately return `Ok(0)` when the device has nothing to say.
pub trait Transport: Read + Write {
    /// Close the channel, releasing the underlying device or socket.
    fn close(&mut self) -> std::io::Result<()>;
}
