//! # Recibo - ESC/POS Thermal Printer Library
//!
//! Recibo is a Rust library for driving ESC/POS-compatible thermal receipt
//! printers over TCP or serial connections. It provides:
//!
//! - **Protocol implementation**: byte-exact ESC/POS command builders
//! - **Session layer**: buffered command queue with text-style state
//! - **Barcodes**: validated 1D barcodes and multi-frame QR sequences
//! - **Images**: threshold and Floyd-Steinberg raster conversion
//! - **Status**: real-time online and paper-sensor queries
//!
//! ## Quick Start
//!
//! ```no_run
//! use recibo::{Printer, transport::TcpTransport};
//! use recibo::protocol::text::Justify;
//!
//! // Open connection to printer
//! let transport = TcpTransport::connect("192.168.1.50:9100")?;
//! let mut printer = Printer::new(transport);
//!
//! // Build the receipt in the output queue
//! printer.initialize()?;
//! printer.set_justify(Justify::Center)?;
//! printer.set_bold(true)?;
//! printer.write("THANK YOU\n");
//! printer.ean13("1234567890128")?;
//!
//! // Commit to the wire and cut
//! printer.print_and_cut()?;
//! # Ok::<(), recibo::ReciboError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`printer`] | Printer session, style state, configuration |
//! | [`render`] | Raster conversion (threshold, dithering) |
//! | [`encoding`] | Unicode to code-page conversion |
//! | [`transport`] | TCP and serial byte channels |
//! | [`error`] | Error types |
//!
//! ## Buffering
//!
//! Commands accumulate in the session's queue; nothing reaches the printer
//! until [`Printer::print`] (or `print_and_cut`) flushes it. Real-time
//! status queries are the single exception — they flush immediately and
//! read the one-byte response.

pub mod encoding;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::ReciboError;
pub use printer::{Printer, PrinterConfig, Style};
pub use render::ImageProcessing;
pub use transport::{SerialTransport, TcpTransport, Transport};
