//! # pulid
//!
//! Prefixed, lexicographically sortable unique identifiers.
//!
//! ## ID Format
//!
//! A PULID is a short type prefix and a ULID joined by a colon:
//! `{prefix}:{ulid}`
//!
//! Examples:
//! - `AA:01FD7SJ7J006AFVGQT5ZYC0GEK`
//! - `USR:01HV4Z2WQXKJNM8GPQY6VBKC3D`
//!
//! The ULID is 128 bits: a 48-bit millisecond timestamp followed by 80 bits
//! of entropy, written as 26 Crockford base32 characters. This gives:
//! - Type hints (the prefix names the entity)
//! - Sortability (IDs with the same prefix sort by creation time)
//! - Uniqueness within a process (entropy increments inside a millisecond)
//!
//! ## Usage
//!
//! ```
//! use pulid::{parse_strict, DeterministicGenerator, Pulid};
//!
//! let id = Pulid::new("USR")?;
//! let (prefix, ulid) = parse_strict(id.as_str())?;
//! assert_eq!(prefix, "USR");
//! assert!(ulid.timestamp_ms() > 0);
//!
//! // Inject a generator for reproducible IDs.
//! let generator = DeterministicGenerator::new();
//! let fixed = Pulid::new_with("AA", &generator)?;
//! assert_eq!(fixed.as_str(), "AA:01FD7SJ7J006AFVGQT5ZYC0GEK");
//! # Ok::<(), pulid::PulidError>(())
//! ```

pub mod base32;
mod error;
pub mod generator;
mod id;
mod scan;
#[cfg(feature = "postgres")]
mod sql;

pub use error::PulidError;
pub use generator::{
    active_generator, restore_generator, set_generator, ActiveGenerator, DeterministicGenerator,
    FixtureEntropy, MonotonicGenerator, UlidGenerator, FIXTURE_TIMESTAMP_MS,
};
pub use id::{parse, parse_strict, split, ParsedPulid, Pulid, DELIMITER};
pub use scan::ScanSource;

/// Re-export ulid for consumers that need raw ULID operations
pub use ulid::Ulid;
