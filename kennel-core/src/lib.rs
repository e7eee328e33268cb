//! # Kennel Core
//!
//! Core types, errors, and traits for the Kennel pet registry.
//!
//! This crate provides the building blocks shared by the other Kennel crates:
//!
//! - **Types**: the [`Pet`] record, the [`PetFilter`] query and [`MatchMode`]
//! - **Errors**: [`KennelError`] and the crate-wide [`Result`] alias
//! - **Constants**: status codes, messages and limits
//! - **Traits**: the [`PetRegistry`] storage interface
//!
//! ## Example
//!
//! ```rust
//! use kennel_core::{MatchMode, Pet, PetFilter};
//!
//! let pet = Pet::new("Bella", "Female", 3, "Labrador");
//! let filter = PetFilter::new().breed("Labrador").age(7);
//!
//! assert!(filter.matches(&pet, MatchMode::Any));
//! assert!(!filter.matches(&pet, MatchMode::All));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{KennelError, Result};
pub use traits::*;
pub use types::*;
