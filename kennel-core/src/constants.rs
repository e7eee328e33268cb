//! Service constants for Kennel.

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTER STATUS
// ═══════════════════════════════════════════════════════════════════════════════

/// Status code returned by a successful registration.
pub const STATUS_OK: i32 = 0;

/// Status code returned when a registration fails validation.
pub const STATUS_VALIDATION_FAILED: i32 = 1;

/// Message returned by a successful registration.
pub const REGISTER_SUCCESS_MESSAGE: &str = "Pet registered successfully";

// ═══════════════════════════════════════════════════════════════════════════════
// RECORD LIMITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default upper bound on a single image payload (8 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

// ═══════════════════════════════════════════════════════════════════════════════
// SERVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Default port of the HTTP server.
pub const DEFAULT_PORT: u16 = 3001;

/// Headroom added to the image limit when sizing the request body limit.
/// Covers hex expansion of the image plus the JSON envelope.
pub const BODY_LIMIT_OVERHEAD: usize = 64 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_distinct() {
        assert_ne!(STATUS_OK, STATUS_VALIDATION_FAILED);
        assert_eq!(STATUS_OK, 0);
    }
}
