//! # Serial Device Transport
//!
//! Talks to printers attached as character devices: USB serial adapters,
//! RS-232 ports, or Bluetooth RFCOMM bindings (`/dev/rfcomm0`).
//!
//! ## TTY Configuration
//!
//! The device is switched to raw mode so binary command data passes
//! through unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR,
//!   IGNCR, ICRNL disabled
//! - **No software flow control**: IXON/IXOFF/IXANY disabled — 0x11 (XON)
//!   and 0x13 (XOFF) occur routinely in raster data
//! - **No output processing**: OPOST disabled (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **No echo, non-canonical**: ECHO, ECHONL, ICANON, ISIG, IEXTEN
//!   disabled
//! - **Polling reads**: VMIN=0, VTIME=1 — a read returns within ~100 ms,
//!   with zero bytes when the printer has nothing to say (the status
//!   protocol treats that as "no response", not an error)
//!
//! ## Chunked Writes
//!
//! Serial printers have small input buffers; large raster frames are
//! written in chunks with a short pause between them so the device can
//! drain. Defaults: 4096-byte chunks, 2 ms apart.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use super::Transport;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// A raw-mode serial connection to a printer.
///
/// ## Example
///
/// ```no_run
/// use recibo::transport::SerialTransport;
///
/// let transport = SerialTransport::open("/dev/usb/lp0")?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct SerialTransport {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl SerialTransport {
    /// Open a serial device and configure it for raw binary I/O.
    ///
    /// ## Errors
    ///
    /// Fails when the device does not exist, the process lacks permission
    /// (dialout/lp group membership is the usual fix), or the TTY cannot
    /// be reconfigured.
    pub fn open<P: AsRef<Path>>(device: P) -> io::Result<Self> {
        let path = device.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        configure_tty_raw(&file)?;
        log::debug!("opened serial device {}", path.display());

        Ok(SerialTransport {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Set the chunk size for large writes.
    ///
    /// Larger chunks are faster but can overflow the printer's buffer.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the pause between chunks.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Read for SerialTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for SerialTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.len() <= self.chunk_size {
            return self.file.write(buf);
        }

        // Pace large frames so the printer's input buffer can drain.
        let mut written = 0;
        for chunk in buf.chunks(self.chunk_size) {
            self.file.write_all(chunk)?;
            written += chunk.len();
            log::trace!("serial: wrote chunk of {} bytes", chunk.len());
            if !self.chunk_delay.is_zero() {
                thread::sleep(self.chunk_delay);
            }
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Transport for SerialTransport {
    fn close(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Switch a TTY file descriptor to raw mode.
///
/// Input/output processing, echo, canonical buffering, and XON/XOFF flow
/// control are all disabled; characters are 8-bit with no parity. VMIN=0
/// with VTIME=1 makes reads poll: at most ~100 ms blocking, zero bytes
/// when the line is silent.
#[cfg(unix)]
fn configure_tty_raw(file: &File) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    // Polling reads: return after ~100ms with whatever arrived (or nothing)
    termios.c_cc[libc::VMIN] = 0;
    termios.c_cc[libc::VTIME] = 1;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> io::Result<()> {
    // No termios on this platform; the device may already be raw.
    Ok(())
}

// Transport tests require actual hardware; the session layer is exercised
// against an in-memory transport instead.
