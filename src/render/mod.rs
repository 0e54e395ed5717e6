//! # Raster Conversion
//!
//! Converts bitmap images into the printer's 1-bit raster format.
//!
//! - [`raster`]: threshold and error-diffusion binarization plus `GS v 0`
//!   framing

pub mod raster;

pub use raster::ImageProcessing;
