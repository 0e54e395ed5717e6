//! # Printer Configuration
//!
//! Feature-disable flags for printers that mishandle specific style
//! commands.
//!
//! Some ESC/POS clones lock up or print garbage when they receive style
//! commands they do not implement (rotation and reverse mode are the usual
//! offenders). Disabling a feature here makes the corresponding setter
//! fail loudly instead of silently corrupting output on the device, and
//! removes the style frame from the [`write`] re-emission sequence.
//!
//! [`write`]: crate::printer::Printer::write

/// Feature-disable flags, supplied once after session creation.
///
/// A disabled feature causes the corresponding setter to return a
/// `FeatureDisabled` error rather than silently dropping the frame.
///
/// ## Example
///
/// ```
/// use recibo::printer::PrinterConfig;
///
/// let config = PrinterConfig {
///     disable_rotate: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrinterConfig {
    pub disable_underline: bool,
    pub disable_bold: bool,
    pub disable_reverse: bool,
    pub disable_rotate: bool,
    pub disable_upside_down: bool,
    pub disable_justify: bool,
}
