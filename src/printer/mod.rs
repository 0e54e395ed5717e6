//! # Printer Session
//!
//! [`Printer`] owns a transport and an output queue, and exposes the
//! public command operations: style setters, text writing, barcodes, QR
//! codes, image printing, drawer control, and real-time status queries.
//!
//! ## Buffering Model
//!
//! Every operation validates its parameters, builds one or more complete
//! command frames, and appends them to an internal queue. Nothing touches
//! the wire until [`Printer::print`] flushes the queue — with one
//! exception: real-time status queries flush immediately, because their
//! response is read synchronously.
//!
//! ## Example
//!
//! ```no_run
//! use recibo::printer::Printer;
//! use recibo::transport::TcpTransport;
//!
//! let transport = TcpTransport::connect("192.168.1.50:9100")?;
//! let mut printer = Printer::new(transport);
//!
//! printer.initialize()?;
//! printer.set_bold(true)?;
//! printer.write("TOTAL: $12.50\n");
//! printer.qr_code("https://example.com/r/123", 50, 5, 49)?;
//! printer.print_and_cut()?;
//! # Ok::<(), recibo::ReciboError>(())
//! ```
//!
//! ## Concurrency
//!
//! A session is single-threaded and synchronous. Every operation takes
//! `&mut self`, so sharing a session across threads requires external
//! synchronization (one mutex per session); the session itself provides
//! none.

mod config;

pub use config::PrinterConfig;

use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use image::DynamicImage;

use crate::encoding;
use crate::error::ReciboError;
use crate::protocol::barcode::{self, BarcodeType, qr};
use crate::protocol::codepage::CodePage;
use crate::protocol::commands;
use crate::protocol::status::{self, PaperLevel};
use crate::protocol::text::{self, Font, Justify};
use crate::render::raster::{self, ImageProcessing};
use crate::transport::Transport;

/// Time the printer is given to answer a real-time status request before
/// the single response read.
const STATUS_SETTLE: Duration = Duration::from_millis(100);

// ============================================================================
// STYLE STATE
// ============================================================================

/// Current text-style state of a session.
///
/// Mutated only by the style setters; reset only by [`Printer::initialize`]
/// or [`Printer::default_style`]. The style registers on the printer are
/// write-through: [`Printer::write`] re-emits the full current style before
/// every text payload instead of diffing against a previous value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub bold: bool,
    /// Width multiplier, 1-8
    pub width: u8,
    /// Height multiplier, 1-8
    pub height: u8,
    pub reverse: bool,
    /// Underline thickness in dots: 0 (off), 1, or 2
    pub underline: u8,
    pub upside_down: bool,
    pub rotate: bool,
    pub justify: Justify,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            bold: false,
            width: 1,
            height: 1,
            reverse: false,
            underline: 0,
            upside_down: false,
            rotate: false,
            justify: Justify::Left,
        }
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// An ESC/POS printer session over a duplex transport.
///
/// Owns the transport exclusively: all writes go through the internal
/// queue, and the single status-response read shares the same connection.
pub struct Printer<T: Transport> {
    transport: T,
    /// Output queue; flushed to the transport by [`Printer::print`].
    queue: Vec<u8>,
    /// Current style, re-emitted by [`Printer::write`].
    pub style: Style,
    config: PrinterConfig,
}

impl<T: Transport> Printer<T> {
    /// Create a session with default style and no features disabled.
    pub fn new(transport: T) -> Self {
        Printer {
            transport,
            queue: Vec::new(),
            style: Style::default(),
            config: PrinterConfig::default(),
        }
    }

    /// Set the feature-disable configuration.
    pub fn set_config(&mut self, config: PrinterConfig) {
        self.config = config;
    }

    /// Reset the style state to defaults without emitting anything.
    pub fn default_style(&mut self) -> &mut Self {
        self.style = Style::default();
        self
    }

    // ------------------------------------------------------------------
    // Queue and flush
    // ------------------------------------------------------------------

    /// Append raw bytes to the output queue.
    ///
    /// Returns the number of bytes queued. Nothing reaches the transport
    /// until [`Printer::print`].
    pub fn write_raw(&mut self, data: &[u8]) -> usize {
        self.queue.extend_from_slice(data);
        data.len()
    }

    /// Flush all queued data to the transport.
    ///
    /// This is the only synchronization point: operations before a flush
    /// have no observable effect on the wire. On a transport error the
    /// queue is left intact and the connection state is unknown; callers
    /// should reinitialize.
    pub fn print(&mut self) -> Result<(), ReciboError> {
        self.flush_queue("print")
    }

    /// Queue a full cut, then flush.
    pub fn print_and_cut(&mut self) -> Result<(), ReciboError> {
        self.write_raw(&commands::cut());
        self.flush_queue("print")
    }

    /// Flush any queued data and close the transport.
    pub fn close(mut self) -> Result<(), ReciboError> {
        self.flush_queue("close")?;
        self.transport
            .close()
            .map_err(|e| ReciboError::transport("close", e))
    }

    fn flush_queue(&mut self, op: &'static str) -> Result<(), ReciboError> {
        self.transport
            .write_all(&self.queue)
            .map_err(|e| ReciboError::transport(op, e))?;
        self.transport
            .flush()
            .map_err(|e| ReciboError::transport(op, e))?;
        log::trace!("{op}: flushed {} bytes", self.queue.len());
        self.queue.clear();
        Ok(())
    }

    fn ensure_enabled(&self, disabled: bool, feature: &'static str) -> Result<(), ReciboError> {
        if disabled {
            Err(ReciboError::FeatureDisabled(feature))
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Text writing
    // ------------------------------------------------------------------

    /// Write text using the current style.
    ///
    /// Re-emits every non-disabled style register (disabled features are
    /// skipped here — only the explicit setters error), then the size
    /// register, then the text bytes. The bytes pass through verbatim;
    /// use the encoding variants for non-ASCII text.
    ///
    /// Returns the number of text bytes queued (style frames excluded).
    pub fn write(&mut self, text: &str) -> usize {
        self.write_styled(text.as_bytes())
    }

    /// Queue a newline through the styled-write path.
    pub fn line_feed(&mut self) -> usize {
        self.write("\n")
    }

    fn write_styled(&mut self, data: &[u8]) -> usize {
        let config = self.config;
        let style = self.style;

        if !config.disable_bold {
            self.write_raw(&text::bold(style.bold));
        }
        if !config.disable_underline {
            self.write_raw(&text::underline(style.underline));
        }
        if !config.disable_reverse {
            self.write_raw(&text::reverse(style.reverse));
        }
        if !config.disable_rotate {
            self.write_raw(&text::rotate(style.rotate));
        }
        if !config.disable_upside_down {
            self.write_raw(&text::upside_down(style.upside_down));
        }
        if !config.disable_justify {
            self.write_raw(&text::justify(style.justify));
        }
        self.write_raw(&text::size(style.width, style.height));

        self.write_raw(data)
    }

    /// Select a code page, convert the text with the given encoding, and
    /// write it through the styled path.
    ///
    /// Characters the encoding cannot represent are substituted with `'?'`;
    /// see [`crate::encoding::encode`].
    pub fn write_with_encoding(
        &mut self,
        text: &str,
        enc: &'static encoding_rs::Encoding,
        codepage: CodePage,
    ) -> Result<usize, ReciboError> {
        self.set_code_page(codepage);
        let bytes = encoding::encode(text, enc)?;
        Ok(self.write_styled(&bytes))
    }

    /// Write text in GBK (simplified Chinese multi-byte mode).
    pub fn write_gbk(&mut self, text: &str) -> Result<usize, ReciboError> {
        self.write_with_encoding(text, encoding_rs::GBK, CodePage::PC437)
    }

    /// Write Western European text (WINDOWS-1252 code page).
    pub fn write_weu(&mut self, text: &str) -> Result<usize, ReciboError> {
        self.write_with_encoding(text, encoding_rs::WINDOWS_1252, CodePage::WPC1252)
    }

    /// Write text in CP437, the ESC/POS default code page.
    pub fn write_cp437(&mut self, text: &str) -> usize {
        self.set_code_page(CodePage::PC437);
        let bytes = encoding::cp437(text);
        self.write_styled(&bytes)
    }

    // ------------------------------------------------------------------
    // Style setters
    // ------------------------------------------------------------------

    /// Queue an `ESC @` reset and restore the default style state.
    pub fn initialize(&mut self) -> Result<usize, ReciboError> {
        self.style = Style::default();
        Ok(self.write_raw(&commands::init()))
    }

    /// Set bold mode.
    pub fn set_bold(&mut self, on: bool) -> Result<usize, ReciboError> {
        self.ensure_enabled(self.config.disable_bold, "bold mode")?;
        self.style.bold = on;
        Ok(self.write_raw(&text::bold(on)))
    }

    /// Set underline thickness (0-2 dots); invalid values reset to 0.
    pub fn set_underline(&mut self, n: u8) -> Result<usize, ReciboError> {
        self.ensure_enabled(self.config.disable_underline, "underline mode")?;
        self.style.underline = if n > 2 { 0 } else { n };
        Ok(self.write_raw(&text::underline(n)))
    }

    /// Set reverse (white-on-black) printing.
    pub fn set_reverse(&mut self, on: bool) -> Result<usize, ReciboError> {
        self.ensure_enabled(self.config.disable_reverse, "reverse mode")?;
        self.style.reverse = on;
        Ok(self.write_raw(&text::reverse(on)))
    }

    /// Set 90° clockwise rotation.
    pub fn set_rotate(&mut self, on: bool) -> Result<usize, ReciboError> {
        self.ensure_enabled(self.config.disable_rotate, "rotate mode")?;
        self.style.rotate = on;
        Ok(self.write_raw(&text::rotate(on)))
    }

    /// Set upside-down printing.
    pub fn set_upside_down(&mut self, on: bool) -> Result<usize, ReciboError> {
        self.ensure_enabled(self.config.disable_upside_down, "upside-down mode")?;
        self.style.upside_down = on;
        Ok(self.write_raw(&text::upside_down(on)))
    }

    /// Set text justification.
    pub fn set_justify(&mut self, j: Justify) -> Result<usize, ReciboError> {
        self.ensure_enabled(self.config.disable_justify, "justification")?;
        self.style.justify = j;
        Ok(self.write_raw(&text::justify(j)))
    }

    /// Set the character size registers.
    ///
    /// Height and width each clamp independently to `[1, 8]`; the style
    /// state records the clamped values.
    pub fn set_size(&mut self, height: u8, width: u8) -> Result<usize, ReciboError> {
        let (width, height) = text::clamp_size(width, height);
        self.style.width = width;
        self.style.height = height;
        Ok(self.write_raw(&text::size(width, height)))
    }

    /// Select character font A or B.
    pub fn set_font(&mut self, f: Font) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&text::font(f)))
    }

    /// Select the code page used for bytes 0x80-0xFF.
    pub fn set_code_page(&mut self, cp: CodePage) -> usize {
        self.write_raw(&commands::select_code_page(cp as u8))
    }

    // ------------------------------------------------------------------
    // Spacing and feed
    // ------------------------------------------------------------------

    /// Print queued data and feed `n` lines.
    pub fn set_line_feed_n(&mut self, n: u8) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&commands::feed_lines(n)))
    }

    /// Reset line spacing to the printer default (1/6 inch).
    pub fn set_default_line_spacing(&mut self) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&commands::default_line_spacing()))
    }

    /// Set line spacing in motion units.
    pub fn set_line_spacing(&mut self, n: u8) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&commands::line_spacing(n)))
    }

    /// Set the horizontal and vertical motion units (25.4/x mm, 25.4/y mm).
    pub fn set_motion_units(&mut self, x: u8, y: u8) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&commands::motion_units(x, y)))
    }

    // ------------------------------------------------------------------
    // Cutter and drawer
    // ------------------------------------------------------------------

    /// Queue a full cut.
    pub fn cut(&mut self) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&commands::cut()))
    }

    /// Queue a partial cut.
    pub fn partial_cut(&mut self) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&commands::partial_cut()))
    }

    /// Pulse the cash drawer.
    ///
    /// Invalid pins fall back to 0; the pulse duration (x 100 ms) clamps
    /// to `[1, 8]`.
    pub fn open_drawer(&mut self, pin: u8, duration: u8) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&commands::drawer_pulse(pin, duration)))
    }

    // ------------------------------------------------------------------
    // Barcodes
    // ------------------------------------------------------------------

    /// Select where HRI characters print relative to barcodes (0-3).
    ///
    /// The one register that rejects out-of-range input instead of
    /// clamping: there is no safe fallback position.
    pub fn set_hri_position(&mut self, p: u8) -> Result<usize, ReciboError> {
        let frame = text::hri_position(p).ok_or_else(|| {
            ReciboError::InvalidParameter("invalid HRI position: must be between 0-3".into())
        })?;
        Ok(self.write_raw(&frame))
    }

    /// Select the HRI font: `false` = Font A, `true` = Font B.
    pub fn set_hri_font(&mut self, font_b: bool) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&text::hri_font(font_b)))
    }

    /// Set barcode height in dots (full byte range accepted).
    pub fn set_barcode_height(&mut self, n: u8) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&text::barcode_height(n)))
    }

    /// Set barcode module width, clamped to `[2, 6]`.
    pub fn set_barcode_width(&mut self, n: u8) -> Result<usize, ReciboError> {
        Ok(self.write_raw(&text::barcode_width(n)))
    }

    /// Queue a barcode after validating the payload for the symbology.
    pub fn barcode(&mut self, kind: BarcodeType, payload: &str) -> Result<usize, ReciboError> {
        let frame = barcode::frame(kind, payload)?;
        Ok(self.write_raw(&frame))
    }

    /// Queue a barcode from a raw type byte; unknown types are rejected.
    pub fn barcode_raw(&mut self, kind: u8, payload: &str) -> Result<usize, ReciboError> {
        let frame = barcode::frame_raw(kind, payload)?;
        Ok(self.write_raw(&frame))
    }

    /// Queue a UPC-A barcode (11-12 digits).
    pub fn upca(&mut self, payload: &str) -> Result<usize, ReciboError> {
        self.barcode(BarcodeType::UpcA, payload)
    }

    /// Queue a UPC-E barcode (11-12 digits).
    pub fn upce(&mut self, payload: &str) -> Result<usize, ReciboError> {
        self.barcode(BarcodeType::UpcE, payload)
    }

    /// Queue an EAN-13 barcode (12-13 digits).
    pub fn ean13(&mut self, payload: &str) -> Result<usize, ReciboError> {
        self.barcode(BarcodeType::Ean13, payload)
    }

    /// Queue an EAN-8 barcode (7-8 digits).
    pub fn ean8(&mut self, payload: &str) -> Result<usize, ReciboError> {
        self.barcode(BarcodeType::Ean8, payload)
    }

    /// Queue a Code39 barcode.
    pub fn code39(&mut self, payload: &str) -> Result<usize, ReciboError> {
        self.barcode(BarcodeType::Code39, payload)
    }

    /// Queue an ITF barcode (even digit count).
    pub fn itf(&mut self, payload: &str) -> Result<usize, ReciboError> {
        self.barcode(BarcodeType::Itf, payload)
    }

    /// Queue a Codabar barcode.
    pub fn codabar(&mut self, payload: &str) -> Result<usize, ReciboError> {
        self.barcode(BarcodeType::Codabar, payload)
    }

    /// Queue a QR code as the five-frame `GS ( k` sequence.
    ///
    /// `model` and `level` take the raw register values (see
    /// [`qr::MODEL_2`], [`qr::EC_LEVEL_L`] and friends); unknown models
    /// select Model 2, out-of-range levels select L, and the module size
    /// clamps to `[1, 16]`. An oversize payload is a hard error and queues
    /// nothing.
    ///
    /// The five frames are appended independently; if a later flush fails
    /// partway through, the printer's symbol state is undefined and the
    /// session should be reinitialized.
    ///
    /// Returns the byte count of the store-data frame.
    pub fn qr_code(
        &mut self,
        payload: &str,
        model: u8,
        module_size: u8,
        level: u8,
    ) -> Result<usize, ReciboError> {
        qr::validate_capacity(payload, model)?;

        self.write_raw(&qr::select_model(model));
        self.write_raw(&qr::module_size(module_size));
        self.write_raw(&qr::error_correction(level));
        let written = self.write_raw(&qr::store_data(payload.as_bytes()));
        self.write_raw(&qr::print_stored());
        Ok(written)
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Queue an image using threshold binarization at normal density.
    pub fn print_image(&mut self, img: &DynamicImage) -> Result<usize, ReciboError> {
        self.print_image_with(img, ImageProcessing::Threshold, false, false)
    }

    /// Queue an image using the given pixel-reduction strategy.
    ///
    /// The density flags apply to dither mode only; threshold mode always
    /// prints at normal density.
    pub fn print_image_with(
        &mut self,
        img: &DynamicImage,
        processing: ImageProcessing,
        high_density_vertical: bool,
        high_density_horizontal: bool,
    ) -> Result<usize, ReciboError> {
        let frame = match processing {
            ImageProcessing::Dither => {
                raster::dither_frame(img, high_density_vertical, high_density_horizontal)
            }
            ImageProcessing::Threshold => raster::threshold_frame(img),
        };
        Ok(self.write_raw(&frame))
    }

    /// Print a bit image stored in the printer's non-volatile memory.
    pub fn print_nv_bit_image(&mut self, index: u8, mode: u8) -> Result<usize, ReciboError> {
        let frame = commands::nv_bit_image(index, mode)?;
        Ok(self.write_raw(&frame))
    }

    // ------------------------------------------------------------------
    // Real-time status
    // ------------------------------------------------------------------

    /// Send a real-time status request and read the response byte.
    ///
    /// The request flushes the queue immediately (the one operation that
    /// does), waits a fixed settling delay, then performs exactly one read
    /// of up to one byte. A silent printer is not an error: the result is
    /// `None` and the convenience wrappers map it to a defined default.
    pub fn query_status(&mut self, kind: u8) -> Result<Option<u8>, ReciboError> {
        self.write_raw(&status::request(kind));
        self.flush_queue("status request")?;

        thread::sleep(STATUS_SETTLE);

        let mut buf = [0u8; 1];
        let n = self
            .transport
            .read(&mut buf)
            .map_err(|e| ReciboError::transport("status read", e))?;
        if n == 0 {
            log::debug!("status request {kind}: no response");
            return Ok(None);
        }
        log::trace!("status request {kind}: {:#04x}", buf[0]);
        Ok(Some(buf[0]))
    }

    /// Query whether the printer is online.
    ///
    /// A printer that does not answer is reported offline.
    pub fn is_online(&mut self) -> Result<bool, ReciboError> {
        Ok(match self.query_status(status::RT_STATUS_ONLINE)? {
            Some(b) => status::is_online(b),
            None => false,
        })
    }

    /// Query the paper sensors.
    ///
    /// A printer that does not answer is assumed to have adequate paper.
    pub fn paper_status(&mut self) -> Result<PaperLevel, ReciboError> {
        Ok(match self.query_status(status::RT_STATUS_PAPER)? {
            Some(b) => status::paper_level(b),
            None => PaperLevel::Adequate,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read, Write};

    /// In-memory transport: records writes, serves scripted status bytes.
    #[derive(Default)]
    struct MockTransport {
        written: Vec<u8>,
        status: Vec<u8>,
    }

    impl Read for MockTransport {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.status.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.status.remove(0);
            Ok(1)
        }
    }

    impl Write for MockTransport {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Transport for MockTransport {
        fn close(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn printer() -> Printer<MockTransport> {
        Printer::new(MockTransport::default())
    }

    #[test]
    fn test_nothing_on_wire_before_print() {
        let mut p = printer();
        p.set_bold(true).unwrap();
        p.cut().unwrap();
        assert!(p.transport.written.is_empty());
        p.print().unwrap();
        assert_eq!(p.transport.written, vec![0x1B, 0x45, 1, 0x1D, 0x56, 0x41, 0]);
    }

    #[test]
    fn test_setters_queue_one_frame_and_report_count() {
        let mut p = printer();
        assert_eq!(p.set_bold(true).unwrap(), 3);
        assert_eq!(p.set_size(2, 2).unwrap(), 3);
        assert_eq!(p.set_motion_units(10, 20).unwrap(), 4);
    }

    #[test]
    fn test_disabled_bold_errors_and_queues_nothing() {
        let mut p = printer();
        p.set_config(PrinterConfig {
            disable_bold: true,
            ..Default::default()
        });

        let err = p.set_bold(true).unwrap_err();
        assert!(err.to_string().contains("bold mode is disabled"));
        p.print().unwrap();
        assert!(p.transport.written.is_empty());
    }

    #[test]
    fn test_disabled_justify_errors() {
        let mut p = printer();
        p.set_config(PrinterConfig {
            disable_justify: true,
            ..Default::default()
        });
        let err = p.set_justify(Justify::Right).unwrap_err();
        assert!(err.to_string().contains("justification is disabled"));
    }

    #[test]
    fn test_disabled_underline_errors() {
        let mut p = printer();
        p.set_config(PrinterConfig {
            disable_underline: true,
            ..Default::default()
        });
        let err = p.set_underline(1).unwrap_err();
        assert!(err.to_string().contains("underline mode is disabled"));
    }

    #[test]
    fn test_set_underline_invalid_resets_to_none() {
        let mut p = printer();
        p.set_underline(3).unwrap();
        p.print().unwrap();
        assert_eq!(p.transport.written, vec![0x1B, 0x2D, 0x00]);
        assert_eq!(p.style.underline, 0);
    }

    #[test]
    fn test_set_size_clamps_and_updates_style() {
        let mut p = printer();
        p.set_size(0, 9).unwrap();
        p.print().unwrap();
        assert_eq!(p.transport.written, vec![0x1D, 0x21, 112]);
        assert_eq!((p.style.width, p.style.height), (8, 1));
    }

    #[test]
    fn test_hri_position_rejects_out_of_range() {
        let mut p = printer();
        let err = p.set_hri_position(5).unwrap_err();
        assert!(err.to_string().contains("invalid HRI position"));
        p.print().unwrap();
        assert!(p.transport.written.is_empty());
    }

    #[test]
    fn test_write_reemits_style_then_text() {
        let mut p = printer();
        p.set_config(PrinterConfig {
            disable_rotate: true,
            ..Default::default()
        });
        p.style.bold = true;
        let n = p.write("Hi");
        assert_eq!(n, 2);
        p.print().unwrap();

        let out = &p.transport.written;
        // Bold on, underline off, reverse off, (rotate skipped),
        // upside-down off, justify left, size 1x1, then the text.
        assert_eq!(&out[..3], &[0x1B, 0x45, 1]);
        assert!(!out.windows(2).any(|w| w == [0x1B, 0x56]));
        assert_eq!(&out[out.len() - 2..], b"Hi");
    }

    #[test]
    fn test_initialize_resets_style() {
        let mut p = printer();
        p.set_bold(true).unwrap();
        p.set_size(3, 3).unwrap();
        p.initialize().unwrap();
        assert_eq!(p.style, Style::default());
        p.print().unwrap();
        assert_eq!(&p.transport.written[p.transport.written.len() - 2..], &[0x1B, 0x40]);
    }

    #[test]
    fn test_barcode_failure_queues_nothing() {
        let mut p = printer();
        assert!(p.ean13("123456789").is_err());
        assert!(p.barcode_raw(9, "123").is_err());
        p.print().unwrap();
        assert!(p.transport.written.is_empty());
    }

    #[test]
    fn test_qr_code_sequence() {
        let mut p = printer();
        let payload = "https://example.com";
        p.qr_code(payload, qr::MODEL_2, 5, qr::EC_LEVEL_M).unwrap();
        p.print().unwrap();

        let out = p.transport.written.clone();
        let contains = |needle: &[u8]| out.windows(needle.len()).any(|w| w == needle);

        assert!(contains(&[0x1D, b'(', b'k', 4, 0, 49, 65, 50, 0]));
        assert!(contains(&[0x1D, b'(', b'k', 3, 0, 49, 67, 5]));
        assert!(contains(&[0x1D, b'(', b'k', 3, 0, 49, 69, 49]));
        let mut store = vec![0x1D, b'(', b'k', (payload.len() + 3) as u8, 0, 49, 80, 48];
        store.extend_from_slice(payload.as_bytes());
        assert!(contains(&store));
        assert!(contains(&[0x1D, b'(', b'k', 3, 0, 49, 81, 48]));
    }

    #[test]
    fn test_qr_code_invalid_model_defaults_to_model_2() {
        let mut p = printer();
        p.qr_code("test", 48, 5, qr::EC_LEVEL_M).unwrap();
        p.print().unwrap();
        let out = &p.transport.written;
        let model_frame = [0x1D, b'(', b'k', 4, 0, 49, 65, 50, 0];
        assert!(out.windows(model_frame.len()).any(|w| w == model_frame));
    }

    #[test]
    fn test_qr_code_too_long_for_model_1() {
        let mut p = printer();
        let payload = "x".repeat(1200);
        let err = p.qr_code(&payload, qr::MODEL_1, 5, qr::EC_LEVEL_L).unwrap_err();
        assert!(err.to_string().contains("too long"));
        p.print().unwrap();
        assert!(p.transport.written.is_empty());
    }

    #[test]
    fn test_query_status_reads_scripted_byte() {
        let mut p = printer();
        p.transport.status = vec![0x08];
        assert_eq!(p.query_status(status::RT_STATUS_ONLINE).unwrap(), Some(0x08));
        // The request itself was flushed immediately
        assert_eq!(p.transport.written, vec![0x10, 0x04, 1]);
    }

    #[test]
    fn test_query_status_no_response_is_not_an_error() {
        let mut p = printer();
        assert_eq!(p.query_status(status::RT_STATUS_ONLINE).unwrap(), None);
    }

    #[test]
    fn test_is_online_defaults_to_false() {
        let mut p = printer();
        assert!(!p.is_online().unwrap());

        p.transport.status = vec![0x00];
        assert!(p.is_online().unwrap());

        p.transport.status = vec![0x08];
        assert!(!p.is_online().unwrap());
    }

    #[test]
    fn test_paper_status_defaults_to_adequate() {
        let mut p = printer();
        assert_eq!(p.paper_status().unwrap(), PaperLevel::Adequate);

        p.transport.status = vec![0x60];
        assert_eq!(p.paper_status().unwrap(), PaperLevel::Empty);

        p.transport.status = vec![0x0C];
        assert_eq!(p.paper_status().unwrap(), PaperLevel::Low);
    }

    #[test]
    fn test_write_cp437_selects_code_page_and_encodes() {
        let mut p = printer();
        p.write_cp437("ñ");
        p.print().unwrap();
        let out = &p.transport.written;
        assert_eq!(&out[..3], &[0x1B, 0x74, 0]);
        assert_eq!(out.last(), Some(&0xA4));
    }
}
