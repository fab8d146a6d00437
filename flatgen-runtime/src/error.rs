//! Error types for flatgen runtime operations.

use thiserror::Error;

/// Runtime error type, raised when locating the root of a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Buffer is too short for the requested operation.
    #[error("buffer too short: required {required} bytes, available {available} bytes")]
    BufferTooShort {
        /// Required buffer size in bytes.
        required: usize,
        /// Available buffer size in bytes.
        available: usize,
    },

    /// Offset out of bounds.
    #[error("offset {offset} out of bounds for buffer of size {size}")]
    OffsetOutOfBounds {
        /// Requested offset.
        offset: usize,
        /// Buffer size in bytes.
        size: usize,
    },
}

/// Result type alias for flatgen runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
