//! # Raster Image Conversion
//!
//! This module turns an [`image::DynamicImage`] into a `GS v 0` raster
//! frame: a header with density and dimensions, followed by the bitmap
//! packed one bit per pixel.
//!
//! ## Bit Packing
//!
//! - Bit 7 (MSB) = leftmost pixel
//! - Bit 0 (LSB) = rightmost pixel
//! - 1 = black (print dot), 0 = white (no dot)
//! - Rows are padded with white to a byte boundary
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! ## Pixel Reduction Strategies
//!
//! Two strategies reduce grayscale to binary, selected by an explicit
//! [`ImageProcessing`] parameter:
//!
//! | Strategy | Method | Best For |
//! |----------|--------|----------|
//! | Threshold | Fixed luminance cutoff at 128 | Line art, text, logos |
//! | Dither | Floyd-Steinberg error diffusion | Photos, gradients |
//!
//! Both are fully deterministic: the same image and mode always produce
//! the same bytes. The error-diffusion pass visits pixels row-major,
//! left-to-right, top-to-bottom; the diffusion kernel depends on that
//! order, so the loop must stay sequential.

use image::DynamicImage;

use crate::protocol::commands::{GS, u16_le};

/// Pixel-reduction strategy for image printing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageProcessing {
    /// Floyd-Steinberg error-diffusion dithering
    #[default]
    Dither,
    /// Fixed luminance cutoff
    Threshold,
}

/// Luminance cutoff shared by both strategies (0-255 scale).
const CUTOFF: i32 = 128;

// ============================================================================
// FRAMING
// ============================================================================

/// # Threshold Raster Frame (GS v 0)
///
/// Binarizes the image with a fixed luminance cutoff and frames it for
/// printing at normal density.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 76 30 00 xL xH yL yH data... |
/// | Decimal | 29 118 48 0 xL xH yL yH data... |
///
/// - `xL xH`: width in *bytes*, little-endian
/// - `yL yH`: height in dots, little-endian
/// - data length = width_bytes × height
pub fn threshold_frame(img: &DynamicImage) -> Vec<u8> {
    let (width, height, luma) = luminance_over_white(img);
    let bits: Vec<bool> = luma.iter().map(|&l| (l as i32) < CUTOFF).collect();
    let data = pack_bits(&bits, width);

    let width_bytes = width.div_ceil(8);
    let mut frame = Vec::with_capacity(8 + data.len());
    frame.extend_from_slice(&[GS, b'v', b'0', 0]);
    frame.extend_from_slice(&u16_le(width_bytes.min(u16::MAX as usize) as u16));
    frame.extend_from_slice(&u16_le(height.min(u16::MAX as usize) as u16));
    frame.extend_from_slice(&data);
    frame
}

/// # Dithered Raster Frame (GS v 0 with density)
///
/// Applies Floyd-Steinberg dithering and frames the result. The density
/// byte encodes the high-density flags *inverted*: a set bit selects the
/// low-density (double-size) mode for that axis.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 76 30 m xL xH yL yH data... |
/// | Decimal | 29 118 48 m xL xH yL yH data... |
///
/// - `m` bit 0: set when `high_density_horizontal` is false
/// - `m` bit 1: set when `high_density_vertical` is false
/// - `xL xH` / `yL yH`: width in bytes / height in dots, little-endian
pub fn dither_frame(
    img: &DynamicImage,
    high_density_vertical: bool,
    high_density_horizontal: bool,
) -> Vec<u8> {
    let (width, height, luma) = luminance_over_white(img);
    let bits = floyd_steinberg(&luma, width, height);
    let data = pack_bits(&bits, width);

    let mut density = 0u8;
    if !high_density_horizontal {
        density += 1;
    }
    if !high_density_vertical {
        density += 2;
    }

    let width_bytes = width.div_ceil(8);
    let mut frame = Vec::with_capacity(8 + data.len());
    frame.extend_from_slice(&[GS, b'v', b'0', density]);
    frame.extend_from_slice(&u16_le(width_bytes.min(u16::MAX as usize) as u16));
    frame.extend_from_slice(&u16_le(height.min(u16::MAX as usize) as u16));
    frame.extend_from_slice(&data);
    frame
}

// ============================================================================
// PIXEL REDUCTION
// ============================================================================

/// Flatten transparency against an opaque white background and convert to
/// 8-bit luminance (299/587/114 integer weights).
///
/// Returns `(width, height, luma)` with `luma.len() == width * height`.
fn luminance_over_white(img: &DynamicImage) -> (usize, usize, Vec<u8>) {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut luma = Vec::with_capacity((width * height) as usize);

    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let (r, g, b) = (
            composite(r, a),
            composite(g, a),
            composite(b, a),
        );
        let l = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000;
        luma.push(l as u8);
    }

    (width as usize, height as usize, luma)
}

/// Alpha-composite one channel over white.
#[inline]
fn composite(channel: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((channel as u32 * a + 255 * (255 - a)) / 255) as u8
}

/// Floyd-Steinberg error diffusion over an inverted luminance buffer.
///
/// Luminance is inverted first (dark source pixels become high values), so
/// quantizing to 255 means "print a dot". Each pixel's quantization error
/// spreads to its unvisited neighbors:
///
/// ```text
///             x    7/16
///  3/16    5/16    1/16
/// ```
///
/// The error buffer has the same dimensions as the image and accumulates
/// fractional carry-over, so the traversal order (row-major, left-to-right)
/// is part of the algorithm's definition.
fn floyd_steinberg(luma: &[u8], width: usize, height: usize) -> Vec<bool> {
    let mut errors = vec![0.0f32; width * height];
    let mut bits = vec![false; width * height];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let inverted = 255.0 - luma[idx] as f32;
            let old = inverted + errors[idx];
            let new = if old >= CUTOFF as f32 { 255.0 } else { 0.0 };
            bits[idx] = new != 0.0;

            let err = old - new;
            if x + 1 < width {
                errors[idx + 1] += err * 7.0 / 16.0;
            }
            if y + 1 < height {
                if x > 0 {
                    errors[idx + width - 1] += err * 3.0 / 16.0;
                }
                errors[idx + width] += err * 5.0 / 16.0;
                if x + 1 < width {
                    errors[idx + width + 1] += err * 1.0 / 16.0;
                }
            }
        }
    }

    bits
}

/// Pack row-major pixel bits into bytes, MSB first, rows padded to a byte
/// boundary.
fn pack_bits(bits: &[bool], width: usize) -> Vec<u8> {
    let width_bytes = width.div_ceil(8);
    let height = if width == 0 { 0 } else { bits.len() / width };
    let mut data = vec![0u8; width_bytes * height];

    for y in 0..height {
        for x in 0..width {
            if bits[y * width + x] {
                data[y * width_bytes + x / 8] |= 1 << (7 - (x % 8));
            }
        }
    }

    data
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// Black-on-white diagonal cross test image.
    fn test_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            if x == y || x + y == height - 1 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(pixel)))
    }

    #[test]
    fn test_threshold_header() {
        let frame = threshold_frame(&test_image(16, 4));
        assert_eq!(&frame[..4], &[0x1D, b'v', b'0', 0]);
        // 16 pixels = 2 bytes wide, 4 rows, little-endian dimensions
        assert_eq!(&frame[4..8], &[2, 0, 4, 0]);
        assert_eq!(frame.len(), 8 + 2 * 4);
    }

    #[test]
    fn test_threshold_black_and_white() {
        let black = threshold_frame(&solid(8, 2, [0, 0, 0, 255]));
        assert_eq!(&black[8..], &[0xFF, 0xFF]);
        let white = threshold_frame(&solid(8, 2, [255, 255, 255, 255]));
        assert_eq!(&white[8..], &[0x00, 0x00]);
    }

    #[test]
    fn test_threshold_pads_rows_to_byte_boundary() {
        // 12 pixels wide -> 2 bytes per row, low 4 bits of the second padded
        let frame = threshold_frame(&solid(12, 1, [0, 0, 0, 255]));
        assert_eq!(&frame[4..8], &[2, 0, 1, 0]);
        assert_eq!(&frame[8..], &[0xFF, 0xF0]);
    }

    #[test]
    fn test_transparency_flattens_to_white() {
        // Fully transparent black must read as white paper, not ink
        let frame = threshold_frame(&solid(8, 1, [0, 0, 0, 0]));
        assert_eq!(&frame[8..], &[0x00]);
    }

    #[test]
    fn test_dither_density_byte_inverts_flags() {
        let img = solid(8, 1, [255, 255, 255, 255]);
        assert_eq!(dither_frame(&img, true, true)[3], 0);
        assert_eq!(dither_frame(&img, true, false)[3], 1);
        assert_eq!(dither_frame(&img, false, true)[3], 2);
        assert_eq!(dither_frame(&img, false, false)[3], 3);
    }

    #[test]
    fn test_dither_header_dimensions_little_endian() {
        let frame = dither_frame(&solid(520, 300, [128, 128, 128, 255]), true, true);
        // 520 pixels = 65 bytes per row
        assert_eq!(&frame[4..8], &[65, 0, 44, 1]); // 300 = 0x012C
        assert_eq!(frame.len(), 8 + 65 * 300);
    }

    #[test]
    fn test_dither_extremes() {
        let black = dither_frame(&solid(16, 2, [0, 0, 0, 255]), true, true);
        assert!(black[8..].iter().all(|&b| b == 0xFF));
        let white = dither_frame(&solid(16, 2, [255, 255, 255, 255]), true, true);
        assert!(white[8..].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_dither_midtone_prints_roughly_half() {
        let frame = dither_frame(&solid(64, 64, [128, 128, 128, 255]), true, true);
        let ones: u32 = frame[8..].iter().map(|b| b.count_ones()).sum();
        let total = 64 * 64;
        assert!(
            ones > total / 3 && ones < 2 * total / 3,
            "50% gray should print roughly half the dots, got {ones}/{total}"
        );
    }

    #[test]
    fn test_dither_deterministic() {
        let img = test_image(64, 64);
        let first = dither_frame(&img, true, false);
        let second = dither_frame(&img, true, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_threshold_deterministic() {
        let img = test_image(48, 48);
        assert_eq!(threshold_frame(&img), threshold_frame(&img));
    }

    #[test]
    fn test_error_diffusion_moves_error_rightward() {
        // A uniform 40% gray row: threshold alone would print nothing,
        // diffusion must accumulate enough error to print some dots.
        let gray = solid(32, 1, [102, 102, 102, 255]);
        let frame = dither_frame(&gray, true, true);
        let ones: u32 = frame[8..].iter().map(|b| b.count_ones()).sum();
        assert!(ones > 0, "diffused error should print dots on a gray row");
        assert!(ones < 32, "40% gray must not print every dot");
    }
}
