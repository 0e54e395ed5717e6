//! # Error Types
//!
//! This module defines error types used throughout the recibo library.

use thiserror::Error;

/// Main error type for recibo operations
#[derive(Debug, Error)]
pub enum ReciboError {
    /// A styling feature was switched off via [`PrinterConfig`]
    ///
    /// [`PrinterConfig`]: crate::printer::PrinterConfig
    #[error("{0} is disabled by printer configuration")]
    FeatureDisabled(&'static str),

    /// Parameter rejected rather than clamped (HRI position, NV image index)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Barcode or QR code validation failure (type, length, charset, capacity)
    #[error("Barcode error: {0}")]
    Barcode(String),

    /// Text could not be represented in the target character encoding
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Transport-level I/O failure, wrapped with the operation that hit it
    #[error("{op} failed: {source}")]
    Transport {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReciboError {
    /// Wrap an I/O error with the name of the operation that triggered it.
    ///
    /// Transport failures are never retried; they propagate unchanged to
    /// the caller with enough context to identify the failing command.
    pub(crate) fn transport(op: &'static str, source: std::io::Error) -> Self {
        ReciboError::Transport { op, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_disabled_message_names_feature() {
        let err = ReciboError::FeatureDisabled("bold mode");
        assert!(err.to_string().contains("bold mode is disabled"));
    }

    #[test]
    fn test_transport_message_names_operation() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err = ReciboError::transport("print", io);
        assert!(err.to_string().starts_with("print failed"));
    }
}
