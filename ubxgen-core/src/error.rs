//! Error types for ubxgen runtime operations.

use thiserror::Error;

/// Error type for checked record access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Buffer is too short for the requested record.
    #[error("buffer too short: required {required} bytes, available {available} bytes")]
    BufferTooShort {
        /// Required buffer size in bytes.
        required: usize,
        /// Available buffer size in bytes.
        available: usize,
    },
}

/// Result type alias for ubxgen runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a generated dispatcher through its error hook.
///
/// Unknown traffic is expected (newer protocol revisions, vendor extensions),
/// so a dispatcher never panics on it; it hands the frame to the error hook
/// together with one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DispatchError {
    /// The (class ID, message ID) pair is not part of the schema.
    #[error("message not implemented")]
    NotImplemented,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_too_short_display() {
        let err = Error::BufferTooShort {
            required: 28,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "buffer too short: required 28 bytes, available 4 bytes"
        );
    }

    #[test]
    fn test_dispatch_error_display() {
        assert_eq!(
            DispatchError::NotImplemented.to_string(),
            "message not implemented"
        );
    }
}
