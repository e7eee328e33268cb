//! Domain types for Kennel.
//!
//! - [`Pet`]: a registered pet profile
//! - [`RecordRef`]: positional handle returned by the registry
//! - [`PetFilter`]: field-optional search criteria
//! - [`MatchMode`]: how set filter fields combine
//! - [`RegistryStats`]: aggregate counts over the stored pets

mod pet;
mod filter;
mod stats;

pub use pet::*;
pub use filter::*;
pub use stats::*;
