//! # Text Encoding
//!
//! Converts Unicode strings to the single- and multi-byte encodings that
//! thermal printers render through their code-page tables.
//!
//! Two paths:
//!
//! - [`cp437`]: a static table for IBM Code Page 437, the ESC/POS default
//!   code page, which `encoding_rs` does not cover.
//! - [`encode`]: any [`encoding_rs::Encoding`] (GBK, WINDOWS-1252, ...),
//!   with an unsupported-character substitution pass.
//!
//! Both paths substitute unmappable characters with `'?'` rather than
//! failing; the printer has no protocol-level way to report a bad byte, so
//! a visible placeholder beats silent corruption.

use encoding_rs::Encoding;

use crate::error::ReciboError;

/// CP437 upper half: byte `0x80 + i` renders as `CP437_UPPER[i]`.
///
/// Reference: IBM Code Page 437 character set.
const CP437_UPPER: [char; 128] = [
    // 0x80-0x8F: accented Latin
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90-0x9F: more accents, currency
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0-0xAF: Spanish, fractions, punctuation
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0-0xBF: shades, box drawing
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0-0xCF
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0-0xDF
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0-0xEF: Greek, math
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0-0xFF
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];

/// Encode a Unicode string as CP437 bytes.
///
/// ASCII passes through unchanged; the 128 mapped code points of the upper
/// half become their single byte; anything else is substituted with `'?'`
/// and logged.
pub fn cp437(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if (ch as u32) < 0x80 {
            out.push(ch as u8);
        } else if let Some(i) = CP437_UPPER.iter().position(|&c| c == ch) {
            out.push(0x80 + i as u8);
        } else {
            log::warn!(
                "cp437: unmapped character '{}' (U+{:04X}), substituting '?'",
                ch,
                ch as u32
            );
            out.push(b'?');
        }
    }
    out
}

/// Encode a Unicode string with an `encoding_rs` encoding.
///
/// Characters the target encoding cannot represent are substituted with
/// `'?'` in a second char-by-char pass (the library's own fallback emits
/// numeric character references, which would print as literal `&#...;`
/// noise). Encodings that cannot serve as output encodings (the UTF-16
/// family) are rejected.
pub fn encode(text: &str, enc: &'static Encoding) -> Result<Vec<u8>, ReciboError> {
    if enc.output_encoding() != enc {
        return Err(ReciboError::Encoding(format!(
            "{} cannot be used as a printer output encoding",
            enc.name()
        )));
    }

    let (bytes, _, had_errors) = enc.encode(text);
    if !had_errors {
        return Ok(bytes.into_owned());
    }

    // Substitution pass
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let (bytes, _, bad) = enc.encode(ch.encode_utf8(&mut buf));
        if bad {
            log::warn!(
                "{}: unmapped character '{}' (U+{:04X}), substituting '?'",
                enc.name(),
                ch,
                ch as u32
            );
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    Ok(out)
}
