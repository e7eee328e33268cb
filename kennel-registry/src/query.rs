//! Query engine.
//!
//! Evaluates a [`PetFilter`] against a registry snapshot with a linear scan.
//! Results keep registry order. An empty filter yields an empty result
//! without touching the registry.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};

use kennel_core::error::{KennelError, Result};
use kennel_core::traits::PetRegistry;
use kennel_core::types::{MatchMode, Pet, PetFilter};

/// A filter bound to a match mode and an optional deadline.
#[derive(Clone, Debug)]
pub struct Query {
    filter: PetFilter,
    mode: MatchMode,
    deadline: Option<Instant>,
}

impl Query {
    /// Creates a query in [`MatchMode::Any`] with no deadline.
    pub fn new(filter: PetFilter) -> Self {
        Self {
            filter,
            mode: MatchMode::Any,
            deadline: None,
        }
    }

    /// Sets how the filter's fields combine.
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Stops evaluation once `deadline` has passed.
    ///
    /// The deadline is checked between record comparisons.
    pub fn deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Returns the filter.
    pub fn filter(&self) -> &PetFilter {
        &self.filter
    }

    /// Evaluates the query against `pets`, keeping their order.
    pub fn evaluate(&self, pets: &[Arc<Pet>]) -> Result<Vec<Arc<Pet>>> {
        if self.filter.is_empty() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for (scanned, pet) in pets.iter().enumerate() {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    return Err(KennelError::QueryInterrupted { scanned });
                }
            }
            if self.filter.matches(pet, self.mode) {
                matches.push(Arc::clone(pet));
            }
        }

        Ok(matches)
    }

    /// Snapshots `registry` and evaluates the query against it.
    #[instrument(skip(self, registry), fields(mode = %self.mode))]
    pub async fn run<R>(&self, registry: &R) -> Result<Vec<Arc<Pet>>>
    where
        R: PetRegistry + ?Sized,
    {
        if self.filter.is_empty() {
            debug!("Empty filter, skipping scan");
            return Ok(Vec::new());
        }

        let snapshot = registry.scan().await?;
        let matches = self.evaluate(&snapshot)?;

        debug!(
            scanned = snapshot.len(),
            matched = matches.len(),
            fields = self.filter.set_field_count(),
            "Query complete"
        );
        Ok(matches)
    }
}

/// Searches `registry` with no deadline.
pub async fn search<R>(registry: &R, filter: &PetFilter, mode: MatchMode) -> Result<Vec<Arc<Pet>>>
where
    R: PetRegistry + ?Sized,
{
    Query::new(filter.clone()).mode(mode).run(registry).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryRegistry;
    use proptest::prelude::*;
    use std::time::Duration;

    async fn labrador_and_poodle() -> MemoryRegistry {
        let registry = MemoryRegistry::new();
        registry
            .append(Pet::new("A", "Female", 5, "Labrador"))
            .await
            .unwrap();
        registry
            .append(Pet::new("B", "Male", 3, "Poodle"))
            .await
            .unwrap();
        registry
    }

    fn names(pets: &[Arc<Pet>]) -> Vec<&str> {
        pets.iter().map(|pet| pet.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_or_semantics_returns_union() {
        let registry = labrador_and_poodle().await;
        let filter = PetFilter::new().breed("Labrador").age(3);

        let found = search(&registry, &filter, MatchMode::Any).await.unwrap();
        assert_eq!(names(&found), ["A", "B"]);
    }

    #[tokio::test]
    async fn test_and_mode_returns_intersection() {
        let registry = labrador_and_poodle().await;

        let filter = PetFilter::new().breed("Labrador").age(3);
        assert!(search(&registry, &filter, MatchMode::All).await.unwrap().is_empty());

        let filter = PetFilter::new().breed("Poodle").age(3);
        let found = search(&registry, &filter, MatchMode::All).await.unwrap();
        assert_eq!(names(&found), ["B"]);
    }

    #[tokio::test]
    async fn test_append_then_find_by_each_field() {
        let registry = labrador_and_poodle().await;
        registry
            .append(Pet::new("Bella", "Null", 7, "Husky").with_image(vec![9; 16]))
            .await
            .unwrap();

        for filter in [
            PetFilter::new().name("Bella"),
            PetFilter::new().gender("Null"),
            PetFilter::new().age(7),
            PetFilter::new().breed("Husky"),
        ] {
            let found = search(&registry, &filter, MatchMode::Any).await.unwrap();
            assert_eq!(names(&found), ["Bella"], "filter {filter:?}");
            assert_eq!(found[0].image, vec![9; 16]);
        }
    }

    #[tokio::test]
    async fn test_no_match_is_empty() {
        let registry = labrador_and_poodle().await;
        let filter = PetFilter::new().breed("Dachshund");

        let found = search(&registry, &filter, MatchMode::Any).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_empty_filter_is_always_empty() {
        let registry = labrador_and_poodle().await;

        for _ in 0..3 {
            for mode in [MatchMode::Any, MatchMode::All] {
                let found = search(&registry, &PetFilter::new(), mode).await.unwrap();
                assert!(found.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_results_keep_store_order() {
        let registry = MemoryRegistry::new();
        for (name, breed) in [("1", "Pug"), ("2", "Corgi"), ("3", "Pug"), ("4", "Pug")] {
            registry
                .append(Pet::new(name, "Male", 1, breed))
                .await
                .unwrap();
        }

        let found = search(&registry, &PetFilter::new().breed("Pug"), MatchMode::Any)
            .await
            .unwrap();
        assert_eq!(names(&found), ["1", "3", "4"]);
    }

    #[tokio::test]
    async fn test_expired_deadline_interrupts() {
        let registry = labrador_and_poodle().await;
        let deadline = Instant::now() - Duration::from_millis(1);

        let result = Query::new(PetFilter::new().age(3))
            .deadline(Some(deadline))
            .run(&registry)
            .await;

        assert!(matches!(result, Err(KennelError::QueryInterrupted { scanned: 0 })));
    }

    #[tokio::test]
    async fn test_generous_deadline_completes() {
        let registry = labrador_and_poodle().await;
        let deadline = Instant::now() + Duration::from_secs(60);

        let found = Query::new(PetFilter::new().age(3))
            .deadline(Some(deadline))
            .run(&registry)
            .await
            .unwrap();
        assert_eq!(names(&found), ["B"]);
    }

    #[test]
    fn test_evaluate_through_trait_object() {
        let registry = MemoryRegistry::new();
        tokio_test::block_on(registry.append(Pet::new("A", "Male", 1, "Pug"))).unwrap();

        let dynamic: &dyn PetRegistry = &registry;
        let found = tokio_test::block_on(search(dynamic, &PetFilter::new().name("A"), MatchMode::Any))
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_results_are_ordered_subsequence(
            ages in proptest::collection::vec(0u32..4, 0..40),
            target in 0u32..4,
        ) {
            let pets: Vec<Arc<Pet>> = ages
                .iter()
                .enumerate()
                .map(|(i, age)| Arc::new(Pet::new(i.to_string(), "Male", *age, "Mutt")))
                .collect();

            let found = Query::new(PetFilter::new().age(target)).evaluate(&pets).unwrap();

            let expected: Vec<String> = ages
                .iter()
                .enumerate()
                .filter(|(_, age)| **age == target)
                .map(|(i, _)| i.to_string())
                .collect();
            let actual: Vec<String> = found.iter().map(|pet| pet.name.clone()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
