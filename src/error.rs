//! Error types for vbyte64 encoding and decoding operations.

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Which of the two parallel streams ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// The nibble-packed width codes
    Key,
    /// The significant value bytes
    Data,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("key"),
            Self::Data => f.write_str("data"),
        }
    }
}

/// Error returned by every fallible codec operation
#[derive(Debug, Error)]
pub enum Error {
    /// The output allocation could not be made; no partial result exists
    #[error("failed to allocate {requested} bytes: {source}")]
    Alloc {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    /// Reading or writing a compressed file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Buffer is too short to contain the header or the key region
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    /// A stream ended before all values were decoded
    #[error("{stream} stream truncated: input is corrupt or the element count is wrong")]
    Truncated { stream: Stream },

    /// A key nibble holds a width code no encoder produces
    #[error("invalid width code {code} for value {index}")]
    InvalidWidth { code: u8, index: usize },

    /// An unframed buffer was decoded without an element count
    #[error("element count required to decode an unframed buffer")]
    MissingLength,

    /// The stored element count does not fit in memory on this platform
    #[error("element count {0} exceeds the addressable range")]
    LengthOverflow(u64),
}

impl Error {
    /// True for errors caused by malformed or inconsistent compressed input
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Self::BufferTooShort { .. } | Self::Truncated { .. } | Self::InvalidWidth { .. } | Self::LengthOverflow(_)
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
