//! Register/search façade over the registry.
//!
//! Validation happens here, never in the registry: a request that fails
//! to convert into a [`Pet`] or a [`PetFilter`](kennel_core::PetFilter)
//! leaves the store untouched.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use kennel_core::error::Result;
use kennel_core::traits::PetRegistry;
use kennel_core::types::{MatchMode, Pet, RecordRef};
use kennel_registry::query::Query;
use kennel_registry::MemoryRegistry;

use crate::dto::{RegisterRequest, SearchRequest};
use crate::state::ApiConfig;

/// Caller-facing pet service.
#[derive(Debug, Clone)]
pub struct PetService {
    registry: Arc<MemoryRegistry>,
    max_image_bytes: usize,
    search_timeout: Option<Duration>,
    default_mode: MatchMode,
}

impl PetService {
    /// Creates a service over `registry` using the limits in `config`.
    pub fn new(registry: Arc<MemoryRegistry>, config: &ApiConfig) -> Self {
        Self {
            registry,
            max_image_bytes: config.max_image_bytes,
            search_timeout: config.search_timeout,
            default_mode: config.default_match_mode,
        }
    }

    /// Validates and stores a pet.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn register(&self, request: RegisterRequest) -> Result<RecordRef> {
        let pet = request.into_pet(self.max_image_bytes)?;
        let image_bytes = pet.image.len();

        let record = self.registry.append(pet).await?;

        info!(%record, image_bytes, "Registered pet");
        Ok(record)
    }

    /// Parses a filter and runs it against a registry snapshot.
    #[instrument(skip(self, request))]
    pub async fn search(&self, request: SearchRequest) -> Result<(Vec<Arc<Pet>>, MatchMode)> {
        let (filter, mode) = request.into_query(self.default_mode)?;
        debug!(?filter, %mode, "Searching");

        let deadline = self.search_timeout.map(|timeout| Instant::now() + timeout);
        let pets = Query::new(filter)
            .mode(mode)
            .deadline(deadline)
            .run(self.registry.as_ref())
            .await?;

        Ok((pets, mode))
    }

    /// Fetches a pet by insertion position.
    pub async fn get(&self, record: RecordRef) -> Result<Option<Arc<Pet>>> {
        self.registry.get(record).await
    }
}
