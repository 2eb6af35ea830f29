//! Pluggable sources for the sortable part of a PULID.
//!
//! A [`UlidGenerator`] turns a prefix and a timestamp into a 128-bit [`Ulid`].
//! Two implementations ship with the crate:
//!
//! - [`MonotonicGenerator`]: wall-clock timestamps with a process-wide,
//!   OS-seeded entropy stream that increments within a millisecond.
//! - [`DeterministicGenerator`]: a fixed timestamp and one seeded entropy
//!   stream per prefix, for reproducible fixtures.
//!
//! Core constructors take the generator explicitly (see
//! [`Pulid::new_with`](crate::Pulid::new_with)). For glue code that cannot
//! thread a generator through, a process-wide active generator is kept behind
//! an atomic pointer swap; [`Pulid::new`](crate::Pulid::new) reads it.
//! Swapping is atomic but not scoped: callers that replace it in tests must
//! put the previous one back themselves.

mod deterministic;
mod fixture_entropy;
mod monotonic;

use std::sync::{Arc, LazyLock};
use std::time::SystemTime;

use arc_swap::ArcSwap;
use tracing::debug;
use ulid::Ulid;

use crate::PulidError;

pub use deterministic::{DeterministicGenerator, FIXTURE_TIMESTAMP_MS};
pub use fixture_entropy::FixtureEntropy;
pub use monotonic::MonotonicGenerator;

/// Produces the sortable part of an ID.
pub trait UlidGenerator: Send + Sync {
    /// Returns a ULID for `prefix` at `timestamp`.
    ///
    /// Implementations may ignore either argument.
    fn generate(&self, prefix: &str, timestamp: SystemTime) -> Result<Ulid, PulidError>;
}

impl<G: UlidGenerator + ?Sized> UlidGenerator for Arc<G> {
    fn generate(&self, prefix: &str, timestamp: SystemTime) -> Result<Ulid, PulidError> {
        (**self).generate(prefix, timestamp)
    }
}

impl<G: UlidGenerator + ?Sized> UlidGenerator for Box<G> {
    fn generate(&self, prefix: &str, timestamp: SystemTime) -> Result<Ulid, PulidError> {
        (**self).generate(prefix, timestamp)
    }
}

/// Handle to a generator installed as the active one.
pub type ActiveGenerator = Arc<Box<dyn UlidGenerator>>;

static ACTIVE: LazyLock<ArcSwap<Box<dyn UlidGenerator>>> =
    LazyLock::new(|| ArcSwap::from_pointee(Box::new(MonotonicGenerator) as Box<dyn UlidGenerator>));

/// Returns the currently active generator.
pub fn active_generator() -> ActiveGenerator {
    ACTIVE.load_full()
}

/// Installs `generator` as the active generator and returns the previous one.
pub fn set_generator<G>(generator: G) -> ActiveGenerator
where
    G: UlidGenerator + 'static,
{
    let generator: Box<dyn UlidGenerator> = Box::new(generator);
    let previous = ACTIVE.swap(Arc::new(generator));
    debug!(
        generator = std::any::type_name::<G>(),
        "replaced active ULID generator"
    );
    previous
}

/// Reinstalls a generator previously returned by [`set_generator`].
pub fn restore_generator(previous: ActiveGenerator) {
    ACTIVE.store(previous);
    debug!("restored active ULID generator");
}

/// Generates with whatever generator is active at the time of the call.
pub(crate) fn generate_active(prefix: &str, timestamp: SystemTime) -> Result<Ulid, PulidError> {
    ACTIVE.load().generate(prefix, timestamp)
}
