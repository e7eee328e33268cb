//! DTOs for API requests and responses.
//!
//! Images travel hex-encoded. Ages arrive as raw JSON so that a
//! non-integer value can be reported as a request error instead of a
//! body rejection: a JSON integer or a decimal string are both accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use kennel_core::error::{KennelError, Result};
use kennel_core::types::{MatchMode, Pet, PetFilter, RecordRef, RegistryStats};

/// Reads an age from raw JSON.
fn parse_age(value: &Value) -> std::result::Result<i64, String> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| format!("age must be an integer, got {n}")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("age must be an integer, got '{s}'")),
        Value::Null => Err("age is required".into()),
        other => Err(format!("age must be an integer, got {other}")),
    }
}

/// Narrows a parsed age to the stored type.
fn to_age(age: i64) -> std::result::Result<u32, String> {
    if age < 0 {
        return Err(format!("age must be non-negative, got {age}"));
    }
    u32::try_from(age).map_err(|_| format!("age out of range: {age}"))
}

/// Request to register a pet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Pet name
    #[serde(default)]
    pub name: String,
    /// Gender
    #[serde(default)]
    pub gender: String,
    /// Age, integer or decimal string
    #[serde(default)]
    pub age: Value,
    /// Breed
    #[serde(default)]
    pub breed: String,
    /// Image payload (hex), empty when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl RegisterRequest {
    /// Builds a request carrying `pet`.
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            gender: pet.gender.clone(),
            age: Value::from(pet.age),
            breed: pet.breed.clone(),
            image: (!pet.image.is_empty()).then(|| hex::encode(&pet.image)),
        }
    }

    /// Converts the request into a validated pet.
    ///
    /// Every failure is a [`KennelError::ValidationError`].
    pub fn into_pet(self, max_image_bytes: usize) -> Result<Pet> {
        let age = parse_age(&self.age)
            .and_then(to_age)
            .map_err(KennelError::ValidationError)?;

        let image = match self.image.as_deref().map(str::trim) {
            Some(encoded) if !encoded.is_empty() => hex::decode(encoded).map_err(|e| {
                KennelError::ValidationError(format!("image must be hex-encoded: {e}"))
            })?,
            _ => Vec::new(),
        };

        let pet = Pet::new(self.name, self.gender, age, self.breed).with_image(image);
        pet.validate(max_image_bytes)?;
        Ok(pet)
    }
}

/// Response for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// 0 on success, non-zero on validation failure
    pub status_code: i32,
    /// Human-readable outcome
    pub message: String,
    /// Position of the new pet, on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordRef>,
}

/// Request to search pets.
///
/// Absent (or `null`) fields do not take part in matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Exact name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Exact gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Exact age, integer or decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    /// Exact breed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// `any` (OR) or `all` (AND); the server default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl SearchRequest {
    /// Builds a request from a typed filter.
    pub fn from_filter(filter: &PetFilter, mode: Option<MatchMode>) -> Self {
        Self {
            name: filter.name.clone(),
            gender: filter.gender.clone(),
            age: filter.age.map(Value::from),
            breed: filter.breed.clone(),
            mode: mode.map(|m| m.to_string()),
        }
    }

    /// Converts the request into a filter and match mode.
    ///
    /// Every failure is a [`KennelError::MalformedFilter`].
    pub fn into_query(self, default_mode: MatchMode) -> Result<(PetFilter, MatchMode)> {
        let age = match self.age {
            None | Some(Value::Null) => None,
            Some(raw) => Some(
                parse_age(&raw)
                    .and_then(to_age)
                    .map_err(KennelError::MalformedFilter)?,
            ),
        };

        let mode = match self.mode {
            Some(raw) => raw
                .parse::<MatchMode>()
                .map_err(|_| KennelError::MalformedFilter(format!("unknown match mode '{raw}'")))?,
            None => default_mode,
        };

        let filter = PetFilter {
            name: self.name,
            gender: self.gender,
            age,
            breed: self.breed,
        };
        Ok((filter, mode))
    }
}

/// Pet as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetDto {
    /// Name
    pub name: String,
    /// Gender
    pub gender: String,
    /// Age
    pub age: u32,
    /// Breed
    pub breed: String,
    /// Image payload (hex)
    pub image: String,
}

impl From<&Pet> for PetDto {
    fn from(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            gender: pet.gender.clone(),
            age: pet.age,
            breed: pet.breed.clone(),
            image: hex::encode(&pet.image),
        }
    }
}

impl TryFrom<PetDto> for Pet {
    type Error = KennelError;

    fn try_from(dto: PetDto) -> Result<Self> {
        let image = hex::decode(&dto.image)?;
        Ok(Pet::new(dto.name, dto.gender, dto.age, dto.breed).with_image(image))
    }
}

/// Response for searching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching pets in registration order
    pub pets: Vec<PetDto>,
    /// Number of matches
    pub total: u64,
    /// Mode the search ran with
    pub mode: MatchMode,
}

/// Registry statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStatsResponse {
    /// Total registered pets
    pub total_pets: u64,
    /// Sum of stored image sizes
    pub image_bytes: u64,
    /// Pets per gender
    pub by_gender: BTreeMap<String, u64>,
    /// Pets per breed
    pub by_breed: BTreeMap<String, u64>,
}

impl From<RegistryStats> for RegistryStatsResponse {
    fn from(stats: RegistryStats) -> Self {
        Self {
            total_pets: stats.total_count,
            image_bytes: stats.image_bytes,
            by_gender: stats.by_gender,
            by_breed: stats.by_breed,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok"
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since the server state was created
    pub uptime_seconds: u64,
    /// Registered pets
    pub pets_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register(body: Value) -> Result<Pet> {
        let req: RegisterRequest = serde_json::from_value(body).unwrap();
        req.into_pet(1024)
    }

    fn search(body: Value) -> Result<(PetFilter, MatchMode)> {
        let req: SearchRequest = serde_json::from_value(body).unwrap();
        req.into_query(MatchMode::Any)
    }

    #[test]
    fn test_register_accepts_integer_and_string_age() {
        let pet = register(json!({"name": "Bella", "gender": "Female", "age": 3, "breed": "Lab"}))
            .unwrap();
        assert_eq!(pet.age, 3);
        assert!(pet.image.is_empty());

        let pet = register(json!({"name": "Bella", "gender": "Female", "age": " 4 ", "breed": "Lab", "image": "ffd8"}))
            .unwrap();
        assert_eq!(pet.age, 4);
        assert_eq!(pet.image, vec![0xFF, 0xD8]);
    }

    #[test]
    fn test_register_rejects_bad_age() {
        for age in [json!(-1), json!(3.5), json!("three"), json!(null), json!(true), json!(u64::MAX)] {
            let err = register(json!({"name": "B", "gender": "F", "age": age.clone(), "breed": "L"}))
                .unwrap_err();
            assert!(matches!(err, KennelError::ValidationError(_)), "age {age}");
        }
    }

    #[test]
    fn test_register_rejects_missing_fields() {
        let err = register(json!({"gender": "F", "age": 1, "breed": "L"})).unwrap_err();
        assert!(err.to_string().contains("name"));

        let err = register(json!({"name": "B", "gender": "F", "age": 1, "breed": "L", "image": "xyz"}))
            .unwrap_err();
        assert!(matches!(err, KennelError::ValidationError(_)));
    }

    #[test]
    fn test_search_fields_optional() {
        let (filter, mode) = search(json!({"breed": "Labrador", "age": 3})).unwrap();
        assert_eq!(filter, PetFilter::new().breed("Labrador").age(3));
        assert_eq!(mode, MatchMode::Any);

        let (filter, _) = search(json!({"age": null})).unwrap();
        assert!(filter.is_empty());

        let (_, mode) = search(json!({"name": "x", "mode": "all"})).unwrap();
        assert_eq!(mode, MatchMode::All);
    }

    #[test]
    fn test_search_rejects_non_integer_age() {
        for age in [json!("old"), json!(2.5), json!(-3)] {
            let err = search(json!({"age": age})).unwrap_err();
            assert!(matches!(err, KennelError::MalformedFilter(_)));
        }

        let err = search(json!({"mode": "most"})).unwrap_err();
        assert!(matches!(err, KennelError::MalformedFilter(_)));
    }

    #[test]
    fn test_request_builders() {
        let pet = Pet::new("Rex", "Male", 5, "Poodle").with_image(vec![1, 2]);
        let back = RegisterRequest::from_pet(&pet).into_pet(1024).unwrap();
        assert_eq!(back, pet);

        let filter = PetFilter::new().gender("Male").age(0);
        let (parsed, mode) = SearchRequest::from_filter(&filter, Some(MatchMode::All))
            .into_query(MatchMode::Any)
            .unwrap();
        assert_eq!(parsed, filter);
        assert_eq!(mode, MatchMode::All);
    }

    #[test]
    fn test_pet_dto_image_hex() {
        let pet = Pet::new("Rex", "Male", 5, "Poodle").with_image(vec![0xAB]);
        let dto = PetDto::from(&pet);
        assert_eq!(dto.image, "ab");
        assert_eq!(Pet::try_from(dto).unwrap(), pet);
    }
}
