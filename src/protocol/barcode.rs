//! # ESC/POS Barcode Commands
//!
//! This module implements 1D barcode and QR code framing.
//!
//! ## 1D Barcodes
//!
//! One self-contained frame per barcode: `GS k` followed by the type byte,
//! the payload, and a NUL terminator. The payload is validated against
//! per-type length and charset rules before any bytes are produced.
//!
//! ```
//! use recibo::protocol::barcode::{frame, BarcodeType};
//!
//! let cmd = frame(BarcodeType::Ean13, "1234567890128").unwrap();
//! assert_eq!(&cmd[..3], &[0x1D, b'k', 2]);
//! assert_eq!(cmd.last(), Some(&0x00));
//! ```
//!
//! ## QR Codes
//!
//! QR codes are a multi-step protocol exchange (`GS ( k` function codes):
//!
//! 1. Select model
//! 2. Select module size
//! 3. Select error correction level
//! 4. Store data in the symbol buffer
//! 5. Print the stored symbol
//!
//! Each step is an independent frame; see [`qr`].

use crate::error::ReciboError;

use super::commands::{GS, NUL};

// ============================================================================
// 1D BARCODES (GS k)
// ============================================================================

/// 1D barcode symbologies and their `GS k` type bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BarcodeType {
    /// UPC-A (11-12 digits)
    UpcA = 0,
    /// UPC-E (11-12 digits)
    UpcE = 1,
    /// EAN-13 / JAN-13 (12-13 digits)
    Ean13 = 2,
    /// EAN-8 / JAN-8 (7-8 digits)
    Ean8 = 3,
    /// Code39 (alphanumeric, unvalidated)
    Code39 = 4,
    /// ITF / Interleaved 2 of 5 (even digit count)
    Itf = 5,
    /// Codabar / NW-7 (unvalidated)
    Codabar = 6,
}

impl BarcodeType {
    /// Resolve a raw type byte.
    ///
    /// Values above the highest known type are unknown symbologies and
    /// must be rejected before any payload validation happens.
    pub fn from_u8(n: u8) -> Option<Self> {
        match n {
            0 => Some(BarcodeType::UpcA),
            1 => Some(BarcodeType::UpcE),
            2 => Some(BarcodeType::Ean13),
            3 => Some(BarcodeType::Ean8),
            4 => Some(BarcodeType::Code39),
            5 => Some(BarcodeType::Itf),
            6 => Some(BarcodeType::Codabar),
            _ => None,
        }
    }

    /// Validate a payload against this symbology's length and charset rules.
    ///
    /// Length and charset violations produce distinct messages so callers
    /// (and tests) can tell which rule was broken. Code39 and Codabar have
    /// printer-defined charsets and are passed through unvalidated.
    pub fn validate(&self, payload: &str) -> Result<(), ReciboError> {
        match self {
            BarcodeType::UpcA | BarcodeType::UpcE => {
                if payload.len() != 11 && payload.len() != 12 {
                    return Err(ReciboError::Barcode(
                        "UPC code should have 11 or 12 digits".into(),
                    ));
                }
                if !only_digits(payload) {
                    return Err(ReciboError::Barcode(
                        "UPC code can only contain digits".into(),
                    ));
                }
            }
            BarcodeType::Ean13 => {
                if payload.len() != 12 && payload.len() != 13 {
                    return Err(ReciboError::Barcode(
                        "EAN-13 code should have 12 or 13 digits".into(),
                    ));
                }
                if !only_digits(payload) {
                    return Err(ReciboError::Barcode(
                        "EAN-13 code can only contain digits".into(),
                    ));
                }
            }
            BarcodeType::Ean8 => {
                if payload.len() != 7 && payload.len() != 8 {
                    return Err(ReciboError::Barcode(
                        "EAN-8 code should have 7 or 8 digits".into(),
                    ));
                }
                if !only_digits(payload) {
                    return Err(ReciboError::Barcode(
                        "EAN-8 code can only contain digits".into(),
                    ));
                }
            }
            BarcodeType::Itf => {
                if payload.len() < 2 || payload.len() % 2 != 0 {
                    return Err(ReciboError::Barcode(
                        "ITF code must have an even number of digits (at least 2)".into(),
                    ));
                }
                if !only_digits(payload) {
                    return Err(ReciboError::Barcode(
                        "ITF code can only contain digits".into(),
                    ));
                }
            }
            BarcodeType::Code39 | BarcodeType::Codabar => {}
        }
        Ok(())
    }
}

/// # Print Barcode (GS k n data NUL)
///
/// Validates the payload and builds the complete barcode frame.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS k n data NUL |
/// | Hex     | 1D 6B n data 00 |
/// | Decimal | 29 107 n data 0 |
///
/// The frame is only produced once validation passes; a failed call emits
/// nothing, so a partially-valid barcode never reaches the wire.
pub fn frame(kind: BarcodeType, payload: &str) -> Result<Vec<u8>, ReciboError> {
    kind.validate(payload)?;

    let mut cmd = Vec::with_capacity(3 + payload.len() + 1);
    cmd.push(GS);
    cmd.push(b'k');
    cmd.push(kind as u8);
    cmd.extend_from_slice(payload.as_bytes());
    cmd.push(NUL);
    Ok(cmd)
}

/// Build a barcode frame from a raw type byte.
///
/// Unknown type bytes fail with "invalid barcode type" before the payload
/// is looked at.
pub fn frame_raw(kind: u8, payload: &str) -> Result<Vec<u8>, ReciboError> {
    let kind = BarcodeType::from_u8(kind)
        .ok_or_else(|| ReciboError::Barcode(format!("invalid barcode type: {kind}")))?;
    frame(kind, payload)
}

fn only_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// QR CODES (GS ( k)
// ============================================================================

/// QR code command builders
///
/// The register values below are the raw wire bytes: models are 49/50
/// (`'1'`/`'2'`) and error correction levels 48-51 (`'0'`-`'3'`), matching
/// the printer's `GS ( k` function 165/169 encoding.
pub mod qr {
    use super::GS;
    use crate::error::ReciboError;
    use crate::protocol::commands::u16_le;

    /// QR Model 1 (original, smaller capacity)
    pub const MODEL_1: u8 = 49;
    /// QR Model 2 (enhanced, recommended)
    pub const MODEL_2: u8 = 50;

    /// Error correction level L: ~7% recovery
    pub const EC_LEVEL_L: u8 = 48;
    /// Error correction level M: ~15% recovery
    pub const EC_LEVEL_M: u8 = 49;
    /// Error correction level Q: ~25% recovery
    pub const EC_LEVEL_Q: u8 = 50;
    /// Error correction level H: ~30% recovery
    pub const EC_LEVEL_H: u8 = 51;

    /// Maximum payload length for a model (binary capacity at level L).
    ///
    /// The unrecognized-model fallback mirrors [`select_model`]: capacity
    /// is checked against the model that will actually be selected.
    pub fn capacity(model: u8) -> usize {
        if model == MODEL_1 { 1167 } else { 7089 }
    }

    /// Check the payload against the capacity of the selected model.
    ///
    /// Oversize payloads are a hard error, never truncated: a silently
    /// shortened QR code scans as the wrong content.
    pub fn validate_capacity(payload: &str, model: u8) -> Result<(), ReciboError> {
        let max = capacity(model);
        if payload.len() > max {
            return Err(ReciboError::Barcode(format!(
                "QR code data too long (max {max} characters for the selected model)"
            )));
        }
        Ok(())
    }

    /// # Select QR Model (GS ( k ... 0x41)
    ///
    /// ## Protocol Details
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B 04 00 31 41 n 00 |
    /// | Decimal | 29 40 107 4 0 49 65 n 0 |
    ///
    /// Unrecognized models select Model 2; Model 1 only when explicitly
    /// requested. Note the fallback direction differs from
    /// [`error_correction`], which falls back to the *lowest* level —
    /// per-register policy, not an inconsistency.
    pub fn select_model(model: u8) -> Vec<u8> {
        let model = if model == MODEL_1 || model == MODEL_2 {
            model
        } else {
            MODEL_2
        };
        vec![GS, b'(', b'k', 4, 0, 0x31, 0x41, model, 0]
    }

    /// # Select Module Size (GS ( k ... 0x43)
    ///
    /// Module (cell) size in dots, clamped to `[1, 16]`.
    ///
    /// ## Protocol Details
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B 03 00 31 43 n |
    /// | Decimal | 29 40 107 3 0 49 67 n |
    pub fn module_size(n: u8) -> Vec<u8> {
        vec![GS, b'(', b'k', 3, 0, 0x31, 0x43, n.clamp(1, 16)]
    }

    /// # Select Error Correction Level (GS ( k ... 0x45)
    ///
    /// Levels are the raw register bytes 48-51; anything outside that range
    /// falls back to level L (48), the lowest-recovery level.
    ///
    /// ## Protocol Details
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B 03 00 31 45 n |
    /// | Decimal | 29 40 107 3 0 49 69 n |
    pub fn error_correction(level: u8) -> Vec<u8> {
        let level = if (EC_LEVEL_L..=EC_LEVEL_H).contains(&level) {
            level
        } else {
            EC_LEVEL_L
        };
        vec![GS, b'(', b'k', 3, 0, 0x31, 0x45, level]
    }

    /// # Store Symbol Data (GS ( k ... 0x50)
    ///
    /// Stores the payload in the printer's symbol buffer. The two-byte
    /// little-endian length field counts the payload plus the three
    /// function bytes `0x31 0x50 0x30`.
    ///
    /// ## Protocol Details
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B pL pH 31 50 30 data... |
    /// | Decimal | 29 40 107 pL pH 49 80 48 data... |
    pub fn store_data(payload: &[u8]) -> Vec<u8> {
        let [pl, ph] = u16_le((payload.len() + 3) as u16);

        let mut cmd = Vec::with_capacity(8 + payload.len());
        cmd.extend_from_slice(&[GS, b'(', b'k', pl, ph, 0x31, 0x50, 0x30]);
        cmd.extend_from_slice(payload);
        cmd
    }

    /// # Print Stored Symbol (GS ( k ... 0x51)
    ///
    /// Prints the symbol stored by [`store_data`] using the current model,
    /// module size, and correction level registers.
    ///
    /// ## Protocol Details
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B 03 00 31 51 30 |
    /// | Decimal | 29 40 107 3 0 49 81 48 |
    #[inline]
    pub fn print_stored() -> Vec<u8> {
        vec![GS, b'(', b'k', 3, 0, 0x31, 0x51, 0x30]
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_ean13() {
        let cmd = frame(BarcodeType::Ean13, "1234567890128").unwrap();
        let mut expected = vec![0x1D, b'k', 2];
        expected.extend_from_slice(b"1234567890128");
        expected.push(0x00);
        assert_eq!(cmd, expected);
    }

    #[test]
    fn test_ean13_charset_error() {
        let err = frame(BarcodeType::Ean13, "12345X7890128").unwrap_err();
        assert!(err.to_string().contains("can only contain digits"));
    }

    #[test]
    fn test_ean13_length_error() {
        let err = frame(BarcodeType::Ean13, "123456789").unwrap_err();
        assert!(err.to_string().contains("should have 12 or 13 digits"));
    }

    #[test]
    fn test_upc_rules() {
        assert!(frame(BarcodeType::UpcA, "01234567890").is_ok()); // 11
        assert!(frame(BarcodeType::UpcA, "012345678905").is_ok()); // 12
        assert!(frame(BarcodeType::UpcE, "0123456789").is_err()); // 10
        assert!(frame(BarcodeType::UpcA, "0123456789X").is_err());
    }

    #[test]
    fn test_ean8_rules() {
        assert!(frame(BarcodeType::Ean8, "1234567").is_ok());
        assert!(frame(BarcodeType::Ean8, "12345678").is_ok());
        assert!(frame(BarcodeType::Ean8, "123456").is_err());
    }

    #[test]
    fn test_itf_rules() {
        assert!(frame(BarcodeType::Itf, "12").is_ok());
        assert!(frame(BarcodeType::Itf, "1234").is_ok());
        // Odd length
        assert!(frame(BarcodeType::Itf, "123").is_err());
        // Too short
        assert!(frame(BarcodeType::Itf, "").is_err());
        // Non-digits
        assert!(frame(BarcodeType::Itf, "12AB").is_err());
    }

    #[test]
    fn test_code39_and_codabar_unvalidated() {
        let cmd = frame(BarcodeType::Code39, "HELLO-123").unwrap();
        assert_eq!(cmd[2], 4);
        let cmd = frame(BarcodeType::Codabar, "A1234B").unwrap();
        assert_eq!(cmd[2], 6);
    }

    #[test]
    fn test_frame_raw_rejects_unknown_type() {
        let err = frame_raw(7, "1234").unwrap_err();
        assert!(err.to_string().contains("invalid barcode type"));
        // Type check happens before payload validation
        let err = frame_raw(200, "not-even-digits").unwrap_err();
        assert!(err.to_string().contains("invalid barcode type"));
    }

    #[test]
    fn test_qr_select_model() {
        assert_eq!(
            qr::select_model(qr::MODEL_2),
            vec![0x1D, b'(', b'k', 4, 0, 49, 65, 50, 0]
        );
        assert_eq!(
            qr::select_model(qr::MODEL_1),
            vec![0x1D, b'(', b'k', 4, 0, 49, 65, 49, 0]
        );
        // Unknown models fall back to Model 2
        assert_eq!(qr::select_model(48)[7], qr::MODEL_2);
        assert_eq!(qr::select_model(0)[7], qr::MODEL_2);
    }

    #[test]
    fn test_qr_module_size_clamps() {
        assert_eq!(qr::module_size(5), vec![0x1D, b'(', b'k', 3, 0, 49, 67, 5]);
        assert_eq!(qr::module_size(0)[7], 1);
        assert_eq!(qr::module_size(40)[7], 16);
    }

    #[test]
    fn test_qr_error_correction_defaults_low() {
        assert_eq!(
            qr::error_correction(qr::EC_LEVEL_M),
            vec![0x1D, b'(', b'k', 3, 0, 49, 69, 49]
        );
        // Out of range falls back to L (48), the lowest-recovery level
        assert_eq!(qr::error_correction(0)[7], qr::EC_LEVEL_L);
        assert_eq!(qr::error_correction(52)[7], qr::EC_LEVEL_L);
    }

    #[test]
    fn test_qr_store_data_length_prefix() {
        let payload = b"https://example.com";
        let cmd = qr::store_data(payload);
        assert_eq!(&cmd[..3], &[0x1D, b'(', b'k']);
        // Length field is len(payload) + 3, little-endian
        let len = cmd[3] as usize + cmd[4] as usize * 256;
        assert_eq!(len, payload.len() + 3);
        assert_eq!(&cmd[5..8], &[49, 80, 48]);
        assert_eq!(&cmd[8..], payload);
    }

    #[test]
    fn test_qr_store_data_length_prefix_two_bytes() {
        let payload = vec![b'x'; 300];
        let cmd = qr::store_data(&payload);
        let len = cmd[3] as usize + cmd[4] as usize * 256;
        assert_eq!(len, 303);
    }

    #[test]
    fn test_qr_print_stored() {
        assert_eq!(qr::print_stored(), vec![0x1D, b'(', b'k', 3, 0, 49, 81, 48]);
    }

    #[test]
    fn test_qr_capacity() {
        assert_eq!(qr::capacity(qr::MODEL_1), 1167);
        assert_eq!(qr::capacity(qr::MODEL_2), 7089);
        // Unknown models will be normalized to Model 2
        assert_eq!(qr::capacity(0), 7089);
    }

    #[test]
    fn test_qr_validate_capacity() {
        let big = "x".repeat(2000);
        assert!(qr::validate_capacity(&big, qr::MODEL_2).is_ok());
        let err = qr::validate_capacity(&big, qr::MODEL_1).unwrap_err();
        assert!(err.to_string().contains("QR code data too long"));
    }
}
