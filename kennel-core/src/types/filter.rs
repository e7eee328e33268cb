//! Search criteria and matching rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KennelError;
use crate::types::Pet;

/// How the set fields of a [`PetFilter`] combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// A pet matches if any set field equals (logical OR).
    #[default]
    Any,
    /// A pet matches only if every set field equals (logical AND).
    All,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Any => f.write_str("any"),
            MatchMode::All => f.write_str("all"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = KennelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "or" => Ok(MatchMode::Any),
            "all" | "and" => Ok(MatchMode::All),
            other => Err(KennelError::ConfigError(format!(
                "unknown match mode '{other}', expected 'any' or 'all'"
            ))),
        }
    }
}

/// Field-optional search criteria.
///
/// `None` means the field takes no part in matching. A set field compares
/// by exact, case-sensitive equality; `Some(String::new())` is a real
/// criterion, and so is `age: Some(0)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetFilter {
    /// Exact name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Exact gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Exact age
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Exact breed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
}

impl PetFilter {
    /// Creates a filter with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name criterion.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the gender criterion.
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Sets the age criterion.
    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the breed criterion.
    pub fn breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.set_field_count() == 0
    }

    /// Number of fields that take part in matching.
    pub fn set_field_count(&self) -> usize {
        [
            self.name.is_some(),
            self.gender.is_some(),
            self.age.is_some(),
            self.breed.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Evaluates the filter against one pet.
    ///
    /// An empty filter matches nothing in either mode.
    pub fn matches(&self, pet: &Pet, mode: MatchMode) -> bool {
        let checks = [
            self.name.as_deref().map(|name| pet.name == name),
            self.gender.as_deref().map(|gender| pet.gender == gender),
            self.age.map(|age| pet.age == age),
            self.breed.as_deref().map(|breed| pet.breed == breed),
        ];
        let mut set = checks.into_iter().flatten().peekable();

        if set.peek().is_none() {
            return false;
        }

        match mode {
            MatchMode::Any => set.any(|hit| hit),
            MatchMode::All => set.all(|hit| hit),
        }
    }
}
