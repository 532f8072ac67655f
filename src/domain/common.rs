//! Shared traits for entities tracked by the store.

use uuid::Uuid;

/// Exposes a stable identifier for persisted entities.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Optimistic-concurrency metadata for entities written back by sweeps.
pub trait Versioned {
    fn version(&self) -> u64;
    fn bump_version(&mut self);
}
