//! In-memory pet registry.
//!
//! Thread-safe, append-only storage for single-process deployments.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use kennel_core::error::Result;
use kennel_core::traits::PetRegistry;
use kennel_core::types::{Pet, RecordRef, RegistryStats};

/// Everything guarded by the registry lock.
#[derive(Debug, Default)]
struct Inner {
    pets: Vec<Arc<Pet>>,
    stats: RegistryStats,
}

/// In-memory pet registry.
///
/// # Snapshots
///
/// A single [`RwLock`] guards the backing vector. Appends hold the write
/// lock for one push; [`scan`](PetRegistry::scan) holds the read lock only
/// while cloning the `Arc` handles, so readers run in parallel and each
/// scan sees a fixed prefix of the insertion sequence. Appends made after
/// the clone are not visible to that scan.
///
/// The vector itself is never handed out, only clones of its handles.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    inner: RwLock<Inner>,
}

impl MemoryRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                pets: Vec::with_capacity(capacity),
                stats: RegistryStats::new(),
            }),
        }
    }

    /// Returns the current statistics.
    pub fn stats(&self) -> RegistryStats {
        self.inner.read().stats.clone()
    }

    /// Returns the number of stored pets.
    pub fn len(&self) -> usize {
        self.inner.read().pets.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().pets.is_empty()
    }

    /// Returns a snapshot of all pets without going through the trait.
    pub fn snapshot(&self) -> Vec<Arc<Pet>> {
        self.inner.read().pets.clone()
    }
}

#[async_trait]
impl PetRegistry for MemoryRegistry {
    /// Appends a pet at the end of the registry.
    #[instrument(skip(self, pet), fields(name = %pet.name, breed = %pet.breed))]
    async fn append(&self, pet: Pet) -> Result<RecordRef> {
        let mut inner = self.inner.write();
        let record = RecordRef(inner.pets.len());

        inner.stats.add(&pet);
        inner.pets.push(Arc::new(pet));
        drop(inner);

        debug!(%record, "Appended pet");
        Ok(record)
    }

    /// Returns a point-in-time snapshot in insertion order.
    #[instrument(skip(self))]
    async fn scan(&self) -> Result<Vec<Arc<Pet>>> {
        let pets = self.snapshot();
        debug!(count = pets.len(), "Scanned registry");
        Ok(pets)
    }

    #[instrument(skip(self))]
    async fn get(&self, record: RecordRef) -> Result<Option<Arc<Pet>>> {
        Ok(self.inner.read().pets.get(record.position()).cloned())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.len() as u64)
    }
}
