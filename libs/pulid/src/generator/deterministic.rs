//! Reproducible generator for tests and fixtures.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use tracing::debug;
use ulid::Ulid;

use super::monotonic::check_timestamp_ms;
use super::{FixtureEntropy, UlidGenerator};
use crate::PulidError;

/// Timestamp stamped on every deterministic ID: 2021-08-16T15:34:00Z.
pub const FIXTURE_TIMESTAMP_MS: u64 = 1_629_128_040_000;

/// Generator with a fixed timestamp and one seeded entropy stream per prefix.
///
/// Streams are created lazily on the first request for a prefix, all from the
/// same seed. Different prefixes therefore walk the same sequence
/// independently: the first `AA` ID and the first `BB` ID share their
/// sortable part. Fixtures depend on this.
#[derive(Debug)]
pub struct DeterministicGenerator {
    seed: i64,
    timestamp_ms: u64,
    streams: Mutex<HashMap<String, FixtureEntropy>>,
}

impl DeterministicGenerator {
    /// Creates a generator with seed 0 and [`FIXTURE_TIMESTAMP_MS`].
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Creates a generator whose per-prefix streams start from `seed`.
    pub fn with_seed(seed: i64) -> Self {
        Self {
            seed,
            timestamp_ms: FIXTURE_TIMESTAMP_MS,
            streams: Mutex::new(HashMap::new()),
        }
    }

    /// Overrides the fixed timestamp.
    #[must_use]
    pub fn with_timestamp_ms(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}

impl Default for DeterministicGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl UlidGenerator for DeterministicGenerator {
    fn generate(&self, prefix: &str, _timestamp: SystemTime) -> Result<Ulid, PulidError> {
        let timestamp_ms = check_timestamp_ms(self.timestamp_ms)?;

        let mut random = [0u8; 10];
        {
            let mut streams = self.streams.lock().unwrap_or_else(PoisonError::into_inner);
            let stream = streams.entry(prefix.to_owned()).or_insert_with(|| {
                debug!(prefix, seed = self.seed, "created fixture entropy stream");
                FixtureEntropy::new(self.seed)
            });
            stream.read(&mut random);
        }

        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&timestamp_ms.to_be_bytes()[2..]);
        bytes[6..].copy_from_slice(&random);
        Ok(Ulid::from_bytes(bytes))
    }
}
