//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! used by line-oriented thermal receipt printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, cut, feed, drawer, code page)
//! - [`text`]: Text styling (bold, underline, justify, size, HRI settings)
//! - [`barcode`]: 1D barcodes and QR codes
//! - [`status`]: Real-time status requests and response bitmasks
//! - [`codepage`]: Code-page register values for `ESC t`
//!
//! ## Usage Example
//!
//! ```
//! use recibo::protocol::{commands, text};
//!
//! // Build a simple print sequence
//! let mut data = Vec::new();
//!
//! // Initialize printer
//! data.extend(commands::init());
//!
//! // Set text style
//! data.extend(text::justify(text::Justify::Center));
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold(false));
//!
//! // Cut the receipt
//! data.extend(commands::cut());
//!
//! // Send `data` to printer via transport...
//! ```
//!
//! ## Protocol Reference
//!
//! Commands follow the ESC/POS convention: an escape byte (`ESC` 0x1B,
//! `GS` 0x1D, `FS` 0x1C, or `DLE` 0x10 for real-time requests) followed by
//! a one-letter opcode and zero or more parameter bytes. Multi-byte
//! integers are little-endian.

pub mod barcode;
pub mod codepage;
pub mod commands;
pub mod status;
pub mod text;
