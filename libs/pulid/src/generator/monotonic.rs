//! Production generator.

use std::sync::{LazyLock, Mutex, PoisonError};
use std::time::{Duration, SystemTime};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::warn;
use ulid::Ulid;

use super::UlidGenerator;
use crate::PulidError;

const RANDOM_BITS: u32 = 80;
const RANDOM_MASK: u128 = (1 << RANDOM_BITS) - 1;
/// Largest timestamp that fits the 48-bit time field.
pub(crate) const MAX_TIMESTAMP_MS: u64 = (1 << 48) - 1;

/// Process-wide entropy, seeded from the OS on first use.
static ENTROPY: LazyLock<Mutex<MonotonicStream<StdRng>>> =
    LazyLock::new(|| Mutex::new(MonotonicStream::new(StdRng::from_os_rng())));

/// Generator backed by the process-wide monotonic entropy stream.
///
/// Every instance shares the same stream, so IDs generated in the same
/// millisecond are strictly increasing across all threads. The prefix does
/// not influence the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicGenerator;

impl UlidGenerator for MonotonicGenerator {
    fn generate(&self, _prefix: &str, timestamp: SystemTime) -> Result<Ulid, PulidError> {
        ENTROPY
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next(timestamp)
    }
}

/// Random entropy that increments instead of re-drawing within a millisecond.
///
/// `newest` only moves forward in time, so a request stamped earlier than it
/// cannot reset the increment point of the newest millisecond. `last` covers
/// runs of backdated requests in the same millisecond.
#[derive(Debug)]
struct MonotonicStream<R> {
    rng: R,
    newest: Option<Ulid>,
    last: Option<Ulid>,
}

impl<R: RngCore> MonotonicStream<R> {
    fn new(rng: R) -> Self {
        Self {
            rng,
            newest: None,
            last: None,
        }
    }

    fn next(&mut self, timestamp: SystemTime) -> Result<Ulid, PulidError> {
        let ms = timestamp_ms(timestamp)?;

        let next = match (self.newest, self.last) {
            (Some(newest), _) if newest.timestamp_ms() == ms => {
                let next = increment(newest)?;
                self.newest = Some(next);
                next
            }
            (_, Some(last)) if last.timestamp_ms() == ms => increment(last)?,
            (newest, _) => {
                let next = Ulid::from_parts(ms, self.rng.random::<u128>() & RANDOM_MASK);
                if newest.is_none_or(|newest| newest.timestamp_ms() < ms) {
                    self.newest = Some(next);
                }
                next
            }
        };

        self.last = Some(next);
        Ok(next)
    }
}

fn increment(previous: Ulid) -> Result<Ulid, PulidError> {
    previous.increment().ok_or_else(|| {
        warn!(timestamp_ms = previous.timestamp_ms(), "monotonic entropy exhausted");
        PulidError::EntropyExhausted
    })
}

/// Milliseconds since the Unix epoch; times before the epoch clamp to zero.
fn timestamp_ms(timestamp: SystemTime) -> Result<u64, PulidError> {
    let since_epoch = timestamp
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    let ms = u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX);
    check_timestamp_ms(ms)
}

/// Rejects timestamps that do not fit the 48-bit time field.
pub(crate) fn check_timestamp_ms(ms: u64) -> Result<u64, PulidError> {
    if ms > MAX_TIMESTAMP_MS {
        return Err(PulidError::TimestampOverflow { timestamp_ms: ms });
    }
    Ok(ms)
}
