//! Aggregate statistics over registered pets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Pet;

/// Registry statistics, updated on every append.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Total number of pets
    pub total_count: u64,
    /// Sum of image payload sizes
    pub image_bytes: u64,
    /// Pets per gender value
    pub by_gender: BTreeMap<String, u64>,
    /// Pets per breed
    pub by_breed: BTreeMap<String, u64>,
}

impl RegistryStats {
    /// Creates empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates stats with a newly stored pet.
    pub fn add(&mut self, pet: &Pet) {
        self.total_count += 1;
        self.image_bytes += pet.image.len() as u64;
        *self.by_gender.entry(pet.gender.clone()).or_insert(0) += 1;
        *self.by_breed.entry(pet.breed.clone()).or_insert(0) += 1;
    }
}
