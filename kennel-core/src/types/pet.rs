//! The pet record stored by the registry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KennelError, Result};

/// A registered pet profile.
///
/// Pets carry no identifier of their own. The registry identifies them by
/// insertion position (see [`RecordRef`]), and never mutates them after
/// they are stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Pet name
    pub name: String,
    /// Free-form gender, usually Male, Female or Null
    pub gender: String,
    /// Age in years
    pub age: u32,
    /// Breed
    pub breed: String,
    /// Opaque image payload, may be empty
    #[serde(with = "hex", default)]
    pub image: Vec<u8>,
}

impl Pet {
    /// Creates a pet without an image.
    pub fn new(
        name: impl Into<String>,
        gender: impl Into<String>,
        age: u32,
        breed: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            gender: gender.into(),
            age,
            breed: breed.into(),
            image: Vec::new(),
        }
    }

    /// Attaches an image payload.
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = image;
        self
    }

    /// Checks the fields a registration must carry.
    ///
    /// Text fields must be non-empty and the image must not exceed
    /// `max_image_bytes`. Age is already non-negative by type.
    pub fn validate(&self, max_image_bytes: usize) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("gender", &self.gender),
            ("breed", &self.breed),
        ] {
            if value.is_empty() {
                return Err(KennelError::ValidationError(format!(
                    "{field} must not be empty"
                )));
            }
        }

        if self.image.len() > max_image_bytes {
            return Err(KennelError::ValidationError(format!(
                "image too large: {} bytes exceeds limit of {}",
                self.image.len(),
                max_image_bytes
            )));
        }

        Ok(())
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.name, self.gender, self.age, self.breed)
    }
}

/// Position of a pet in the registry, assigned at append time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordRef(pub usize);

impl RecordRef {
    /// Returns the zero-based insertion position.
    pub fn position(self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
