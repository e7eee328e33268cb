//! Common traits for Kennel.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Pet, RecordRef};

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for pet storage.
///
/// The store is append-only. Implementations must preserve insertion order
/// and must make `scan` return a consistent snapshot: a concurrent append
/// is either fully visible or not visible at all.
#[async_trait]
pub trait PetRegistry: Send + Sync {
    /// Appends a pet that has already passed validation.
    ///
    /// Returns the pet's insertion position.
    async fn append(&self, pet: Pet) -> Result<RecordRef>;

    /// Returns every stored pet in insertion order.
    async fn scan(&self) -> Result<Vec<Arc<Pet>>>;

    /// Retrieves the pet stored at `record`.
    async fn get(&self, record: RecordRef) -> Result<Option<Arc<Pet>>>;

    /// Returns the total pet count.
    async fn count(&self) -> Result<u64>;
}
