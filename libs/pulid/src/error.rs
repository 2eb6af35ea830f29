//! Error types for PULID parsing, generation and scanning.

use thiserror::Error;

/// Errors that can occur when parsing, generating or scanning PULIDs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PulidError {
    /// The ID has no delimiter-separated, non-empty prefix.
    #[error("pulid: id has no prefix")]
    MissingPrefix,

    /// The sortable part is not the length of an encoded 16-byte ULID.
    #[error("pulid: bad data size when decoding: expected {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The sortable part contains a character outside the accepted alphabet.
    #[error("pulid: invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// The sortable part encodes a value larger than 128 bits.
    #[error("pulid: value overflows 128 bits")]
    Overflow,

    /// A scan received a value that is neither an ID, a string nor null.
    #[error("pulid: scan error, unexpected type {found}")]
    UnsupportedScanSource { found: &'static str },

    /// The timestamp does not fit the 48-bit time field.
    #[error("pulid: timestamp {timestamp_ms}ms does not fit in 48 bits")]
    TimestampOverflow { timestamp_ms: u64 },

    /// All 80 entropy bits were used up within one millisecond.
    #[error("pulid: monotonic entropy exhausted within a single millisecond")]
    EntropyExhausted,
}

impl PulidError {
    /// Returns true if this error was produced while decoding the sortable part.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            PulidError::InvalidLength { .. }
                | PulidError::InvalidCharacter { .. }
                | PulidError::Overflow
        )
    }

    /// Returns true if this error came from a generator rather than from input.
    pub fn is_generation_error(&self) -> bool {
        matches!(
            self,
            PulidError::EntropyExhausted | PulidError::TimestampOverflow { .. }
        )
    }
}
