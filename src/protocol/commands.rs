//! # ESC/POS Basic Commands
//!
//! This module implements the fixed-length control commands shared by
//! ESC/POS-compatible thermal receipt printers.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Two bytes: `ESC @`, `ESC 2`
//! - Multi-byte with parameters: `ESC d n`, `GS P x y`
//! - Real-time (bypass the print buffer): `DLE EOT n`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

use crate::error::ReciboError;

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Prefixes barcode, raster graphics, size, and cutter commands.
/// Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// FS (Field Separator) - NV image command prefix
///
/// Prefixes commands operating on non-volatile bit images.
/// Hex: 0x1C, Decimal: 28
pub const FS: u8 = 0x1C;

/// DLE (Data Link Escape) - Real-time command prefix
///
/// Real-time requests are answered immediately by the printer instead of
/// being queued with print data. Hex: 0x10, Decimal: 16
pub const DLE: u8 = 0x10;

/// NUL - terminator byte for variable-length payloads (barcodes)
pub const NUL: u8 = 0x00;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. Clears the print
/// buffer and resets text formatting, character size, and alignment.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Full Cut (GS V A 0)
///
/// Feeds the paper to the cutting position and performs a full cut.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS V A NUL |
/// | Hex     | 1D 56 41 00 |
/// | Decimal | 29 86 65 0 |
#[inline]
pub fn cut() -> Vec<u8> {
    vec![GS, b'V', b'A', 0x00]
}

/// # Partial Cut (GS V B 0)
///
/// Feeds the paper to the cutting position and performs a partial cut,
/// leaving a small uncut hinge so the receipt does not fall.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS V B NUL |
/// | Hex     | 1D 56 42 00 |
/// | Decimal | 29 86 66 0 |
#[inline]
pub fn partial_cut() -> Vec<u8> {
    vec![GS, b'V', b'B', 0x00]
}

// ============================================================================
// PAPER FEED AND SPACING
// ============================================================================

/// # Print and Feed n Lines (ESC d n)
///
/// Prints any buffered data and feeds the paper `n` lines.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC d n |
/// | Hex     | 1B 64 n |
/// | Decimal | 27 100 n |
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// # Default Line Spacing (ESC 2)
///
/// Resets the line spacing to the printer default (1/6 inch).
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC 2 |
/// | Hex     | 1B 32 |
/// | Decimal | 27 50 |
#[inline]
pub fn default_line_spacing() -> Vec<u8> {
    vec![ESC, b'2']
}

/// # Set Line Spacing (ESC 3 n)
///
/// Sets the line spacing to `n` motion units (n/180 inch on most models).
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC 3 n |
/// | Hex     | 1B 33 n |
/// | Decimal | 27 51 n |
#[inline]
pub fn line_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b'3', n]
}

/// # Set Motion Units (GS P x y)
///
/// Sets the horizontal and vertical motion units to 25.4/x mm and
/// 25.4/y mm. These are the base units for spacing and feed commands.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS P x y |
/// | Hex     | 1D 50 x y |
/// | Decimal | 29 80 x y |
#[inline]
pub fn motion_units(x: u8, y: u8) -> Vec<u8> {
    vec![GS, b'P', x, y]
}

// ============================================================================
// CASH DRAWER
// ============================================================================

/// # Generate Drawer Pulse (ESC p m t1 t2)
///
/// Sends a pulse to the cash drawer connected to the printer's drawer
/// kick-out connector.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC p m t1 t2 |
/// | Hex     | 1B 70 m t1 t2 |
/// | Decimal | 27 112 m t1 t2 |
///
/// ## Parameters
///
/// - `pin`: drawer connector pin, 0 or 1; any other value falls back to 0
/// - `duration`: pulse length in units of 100 ms, clamped to `[1, 8]`;
///   emitted as both the on-time and off-time byte
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// assert_eq!(commands::drawer_pulse(0, 2), vec![0x1B, 0x70, 0, 2, 2]);
/// // Invalid pin falls back to 0, long duration clamps to 8
/// assert_eq!(commands::drawer_pulse(5, 20), vec![0x1B, 0x70, 0, 8, 8]);
/// ```
pub fn drawer_pulse(pin: u8, duration: u8) -> Vec<u8> {
    let pin = if pin > 1 { 0 } else { pin };
    let t = duration.clamp(1, 8);
    vec![ESC, b'p', pin, t, t]
}

// ============================================================================
// CODE PAGE SELECTION
// ============================================================================

/// # Select Character Code Table (ESC t n)
///
/// Selects the code page used to render byte values 0x80-0xFF. The set of
/// supported pages varies by printer model; see [`codepage`] for the
/// register values.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC t n |
/// | Hex     | 1B 74 n |
/// | Decimal | 27 116 n |
///
/// [`codepage`]: crate::protocol::codepage
#[inline]
pub fn select_code_page(n: u8) -> Vec<u8> {
    vec![ESC, b't', n]
}

// ============================================================================
// NV BIT IMAGES
// ============================================================================

/// # Print NV Bit Image (FS d n m)
///
/// Prints a bit image previously stored in the printer's non-volatile
/// memory.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | FS d n m |
/// | Hex     | 1C 64 n m |
/// | Decimal | 28 100 n m |
///
/// ## Parameters
///
/// - `index`: stored image number, 1-based; 0 is rejected
/// - `mode`: print mode 0-3 (normal, double-width, double-height, quadruple);
///   values above 3 are rejected
pub fn nv_bit_image(index: u8, mode: u8) -> Result<Vec<u8>, ReciboError> {
    if index == 0 {
        return Err(ReciboError::InvalidParameter(
            "NV bit image index must be at least 1".into(),
        ));
    }
    if mode > 3 {
        return Err(ReciboError::InvalidParameter(
            "NV bit image mode must be between 0-3".into(),
        ));
    }
    Ok(vec![FS, b'd', index, mode])
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ESC/POS uses little-endian encoding for multi-byte integers.
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(384), [0x80, 0x01]); // 384 = 0x0180
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
