//! # ESC/POS Text Styling Commands
//!
//! This module implements text formatting commands and the barcode
//! appearance registers (HRI position/font, module height/width).
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text (1 or 2 dots) |
//! | Reverse | GS B n | White on black |
//! | Rotate | ESC V n | 90° clockwise rotation |
//! | Upside down | ESC { n | 180° rotation |
//! | Justify | ESC a n | Left / center / right |
//! | Size | GS ! n | 1x-8x width and height |
//!
//! ## Write-Through Registers
//!
//! Each setter independently re-validates its input and emits a complete
//! command frame; the printer's style registers are write-through, so no
//! delta tracking against a previous value is needed.

use super::commands::{ESC, GS};

// ============================================================================
// JUSTIFICATION
// ============================================================================

/// Text justification (alignment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Justify {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Justify {
    /// Normalize a raw register value; anything unknown falls back to Left.
    pub fn from_u8(n: u8) -> Self {
        match n {
            1 => Justify::Center,
            2 => Justify::Right,
            _ => Justify::Left,
        }
    }
}

/// # Select Justification (ESC a n)
///
/// Sets the alignment for subsequent lines.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::{justify, Justify};
///
/// assert_eq!(justify(Justify::Center), vec![0x1B, 0x61, 0x01]);
/// ```
#[inline]
pub fn justify(j: Justify) -> Vec<u8> {
    vec![ESC, b'a', j as u8]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Character font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Font {
    /// Font A: 12x24 dots
    #[default]
    A = 0,
    /// Font B: 9x24 dots
    B = 1,
}

impl Font {
    /// Normalize a raw register value; anything unknown falls back to Font A.
    pub fn from_u8(n: u8) -> Self {
        match n {
            1 => Font::B,
            _ => Font::A,
        }
    }
}

/// # Select Character Font (ESC M n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC M n |
/// | Hex     | 1B 4D n |
/// | Decimal | 27 77 n |
#[inline]
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// EMPHASIS, UNDERLINE, REVERSE, ORIENTATION
// ============================================================================

/// # Set Emphasis Mode (ESC E n)
///
/// Turns bold printing on or off for subsequent text.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E n |
/// | Hex     | 1B 45 n |
/// | Decimal | 27 69 n |
#[inline]
pub fn bold(on: bool) -> Vec<u8> {
    vec![ESC, b'E', on as u8]
}

/// # Set Underline Mode (ESC - n)
///
/// Sets the underline thickness in dots.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC - n |
/// | Hex     | 1B 2D n |
/// | Decimal | 27 45 n |
///
/// ## Parameters
///
/// - `n = 0`: underline off
/// - `n = 1`: 1-dot underline
/// - `n = 2`: 2-dot underline
/// - `n > 2`: treated as invalid and reset to 0 (off), not ceiling-clamped
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::underline;
///
/// assert_eq!(underline(1), vec![0x1B, 0x2D, 0x01]);
/// assert_eq!(underline(3), vec![0x1B, 0x2D, 0x00]);
/// ```
#[inline]
pub fn underline(n: u8) -> Vec<u8> {
    let n = if n > 2 { 0 } else { n };
    vec![ESC, b'-', n]
}

/// # Set Reverse Printing (GS B n)
///
/// White text on a black background.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS B n |
/// | Hex     | 1D 42 n |
/// | Decimal | 29 66 n |
#[inline]
pub fn reverse(on: bool) -> Vec<u8> {
    vec![GS, b'B', on as u8]
}

/// # Set 90° Rotation (ESC V n)
///
/// Rotates subsequent characters 90° clockwise.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC V n |
/// | Hex     | 1B 56 n |
/// | Decimal | 27 86 n |
#[inline]
pub fn rotate(on: bool) -> Vec<u8> {
    vec![ESC, b'V', on as u8]
}

/// # Set Upside-Down Mode (ESC { n)
///
/// Prints subsequent lines rotated 180°.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC { n |
/// | Hex     | 1B 7B n |
/// | Decimal | 27 123 n |
#[inline]
pub fn upside_down(on: bool) -> Vec<u8> {
    vec![ESC, b'{', on as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// Sets the width and height multipliers for subsequent characters.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS ! n |
/// | Hex     | 1D 21 n |
/// | Decimal | 29 33 n |
///
/// ## Size Register Encoding
///
/// The size byte packs the width multiplier in the high nibble and the
/// height multiplier in the low nibble:
///
/// ```text
/// n = (2 << 3) * (width - 1) + (height - 1)
/// ```
///
/// Both multipliers clamp to `[1, 8]` before encoding, so no out-of-range
/// register value is ever emitted.
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::size;
///
/// // 2x2: (2<<3)*1 + 1 = 17
/// assert_eq!(size(2, 2), vec![0x1D, 0x21, 17]);
/// // Clamped to width 8, height 1: (2<<3)*7 + 0 = 112
/// assert_eq!(size(9, 0), vec![0x1D, 0x21, 112]);
/// ```
pub fn size(width: u8, height: u8) -> Vec<u8> {
    let (width, height) = clamp_size(width, height);
    let n = (2u8 << 3) * (width - 1) + (height - 1);
    vec![GS, b'!', n]
}

/// Clamp width and height multipliers into the legal `[1, 8]` range.
#[inline]
pub fn clamp_size(width: u8, height: u8) -> (u8, u8) {
    (width.clamp(1, 8), height.clamp(1, 8))
}

// ============================================================================
// BARCODE APPEARANCE REGISTERS
// ============================================================================

/// # Select HRI Position (GS H n)
///
/// Chooses where the Human Readable Interpretation characters are printed
/// relative to a barcode.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS H n |
/// | Hex     | 1D 48 n |
/// | Decimal | 29 72 n |
///
/// ## Parameters
///
/// - `n = 0`: not printed
/// - `n = 1`: above the barcode
/// - `n = 2`: below the barcode
/// - `n = 3`: both above and below
///
/// Unlike the clamped registers, an out-of-range position is rejected: the
/// register has no safe fallback, so the frame is built only for `n <= 3`.
/// Callers surface this as an `InvalidParameter` error.
#[inline]
pub fn hri_position(n: u8) -> Option<Vec<u8>> {
    if n > 3 {
        return None;
    }
    Some(vec![GS, b'H', n])
}

/// # Select HRI Font (GS f n)
///
/// `false` selects Font A (12x24), `true` selects Font B (9x24).
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS f n |
/// | Hex     | 1D 66 n |
/// | Decimal | 29 102 n |
#[inline]
pub fn hri_font(font_b: bool) -> Vec<u8> {
    vec![GS, b'f', font_b as u8]
}

/// # Set Barcode Height (GS h n)
///
/// Height in dots. The register accepts the full byte range, so no
/// clamping is applied. Most printers default to 162.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS h n |
/// | Hex     | 1D 68 n |
/// | Decimal | 29 104 n |
#[inline]
pub fn barcode_height(n: u8) -> Vec<u8> {
    vec![GS, b'h', n]
}

/// # Set Barcode Module Width (GS w n)
///
/// Width of one barcode module in dots, clamped to `[2, 6]` (default 3).
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS w n |
/// | Hex     | 1D 77 n |
/// | Decimal | 29 119 n |
#[inline]
pub fn barcode_width(n: u8) -> Vec<u8> {
    vec![GS, b'w', n.clamp(2, 6)]
}

// ============================================================================
// TESTS
// ============================================================================
