//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a biome type stored in a volume cell.
///
/// The numeric value is opaque to this crate: the world-storage layer
/// decides which biome each id denotes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for BiomeId {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

impl From<BiomeId> for u16 {
    fn from(v: BiomeId) -> Self {
        v.0
    }
}

/// Counter for unique [`StorageInstanceId`] allocation.
static STORAGE_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a biome storage buffer.
///
/// Allocated from a monotonic atomic counter via [`StorageInstanceId::next`].
/// Every view derived from a buffer reports that buffer's id, so two views
/// share storage exactly when their ids are equal. A copy of a volume gets
/// a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageInstanceId(u64);

impl StorageInstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(STORAGE_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for StorageInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
