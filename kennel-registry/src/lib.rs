//! # Kennel Registry
//!
//! Pet storage and search for the Kennel service.
//!
//! - **[`MemoryRegistry`]**: append-only, thread-safe in-memory store
//! - **[`query`]**: the engine that evaluates a [`PetFilter`](kennel_core::PetFilter)
//!   against a registry snapshot
//!
//! ## Example
//!
//! ```rust,ignore
//! use kennel_core::{MatchMode, Pet, PetFilter};
//! use kennel_registry::{query, MemoryRegistry, Registry};
//!
//! let registry = MemoryRegistry::new();
//! registry.append(Pet::new("Bella", "Female", 3, "Labrador")).await?;
//!
//! let filter = PetFilter::new().breed("Labrador").age(3);
//! let matches = query::search(&registry, &filter, MatchMode::Any).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
pub mod query;

pub use memory::MemoryRegistry;

// Re-export the trait from core
pub use kennel_core::traits::PetRegistry as Registry;
