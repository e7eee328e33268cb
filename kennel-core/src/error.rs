//! Error types for Kennel.
//!
//! A single error hierarchy built with `thiserror`. The HTTP layer maps
//! each variant onto a status code, so variants are split by who is at
//! fault: the caller (validation, malformed filters) or the service.

use thiserror::Error;

/// Result type alias using `KennelError`.
pub type Result<T> = std::result::Result<T, KennelError>;

/// Main error type for all Kennel operations.
#[derive(Debug, Error)]
pub enum KennelError {
    // ═══════════════════════════════════════════════════════════════════════════
    // REQUEST ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A registration carried an invalid field.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A search filter could not be interpreted.
    #[error("Malformed filter: {0}")]
    MalformedFilter(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The search deadline passed before every record was compared.
    #[error("Query interrupted after {scanned} records")]
    QueryInterrupted {
        /// Records compared before the deadline was observed
        scanned: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A configuration value could not be parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl KennelError {
    /// Returns true if the caller may retry the same request and expect
    /// a different outcome.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, KennelError::QueryInterrupted { .. })
    }

    /// Returns true if the request itself was at fault.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            KennelError::ValidationError(_)
                | KennelError::MalformedFilter(_)
                | KennelError::HexError(_)
        )
    }
}
