use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::domain::risk::{
    entities::RiskResult, policies::classify_ingredient, ports::FoodDatabaseClient,
    value_objects::LookupOutcome,
};

/// Classifies every ingredient, one batch after another.
///
/// Lookups inside a batch run concurrently; the next batch starts only when the
/// whole previous one has settled. The output has one entry per input, in input
/// order, and a failed lookup only degrades its own ingredient.
#[instrument(skip_all, fields(ingredients = ingredients.len(), batch_size = batch_size))]
pub async fn classify_ingredients<FD>(
    food_database: &FD,
    ingredients: &[String],
    conditions: &[String],
    batch_size: usize,
) -> Vec<RiskResult>
where
    FD: FoodDatabaseClient,
{
    let batch_size = batch_size.max(1);
    let mut results = Vec::with_capacity(ingredients.len());

    for (batch_index, batch) in ingredients.chunks(batch_size).enumerate() {
        debug!(batch_index, size = batch.len(), "classifying batch");

        let batch_results = join_all(
            batch
                .iter()
                .map(|ingredient| classify_one(food_database, ingredient, conditions)),
        )
        .await;

        results.extend(batch_results);
    }

    results
}

async fn classify_one<FD>(food_database: &FD, ingredient: &str, conditions: &[String]) -> RiskResult
where
    FD: FoodDatabaseClient,
{
    let name = ingredient.to_lowercase();
    let lookup = LookupOutcome::from(food_database.find_product(name).await);

    if let LookupOutcome::Failed(e) = &lookup {
        warn!(ingredient, error = %e, "food database lookup failed, using keyword fallback");
    }

    RiskResult::new(ingredient, classify_ingredient(ingredient, &lookup, conditions))
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use super::*;
    use crate::domain::{
        common::entities::app_errors::CoreError,
        risk::entities::{ProductFacts, RiskTag},
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Start(String),
        End(String),
    }

    /// Records when each lookup starts and ends so batching can be observed.
    #[derive(Default)]
    struct RecordingFoodDatabase {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingFoodDatabase {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl FoodDatabaseClient for RecordingFoodDatabase {
        async fn find_product(&self, ingredient: String) -> Result<Option<ProductFacts>, CoreError> {
            self.events
                .lock()
                .unwrap()
                .push(Event::Start(ingredient.clone()));
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.events.lock().unwrap().push(Event::End(ingredient.clone()));

            match ingredient.as_str() {
                "ingredient 3" => Err(CoreError::ExternalServiceError("timeout".to_string())),
                "ingredient 7" => Ok(Some(ProductFacts {
                    nova_group: Some(4),
                    ..Default::default()
                })),
                _ => Ok(None),
            }
        }
    }

    fn ingredients(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("ingredient {i}")).collect()
    }

    /// Sizes of the runs of consecutive starts, i.e. the concurrent batches.
    fn batch_sizes(events: &[Event]) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut current = 0;
        for event in events {
            match event {
                Event::Start(_) => current += 1,
                Event::End(_) if current > 0 => {
                    sizes.push(current);
                    current = 0;
                }
                Event::End(_) => {}
            }
        }
        sizes
    }

    fn max_in_flight(events: &[Event]) -> usize {
        let mut in_flight = 0usize;
        let mut max = 0;
        for event in events {
            match event {
                Event::Start(_) => {
                    in_flight += 1;
                    max = max.max(in_flight);
                }
                Event::End(_) => in_flight -= 1,
            }
        }
        max
    }

    #[tokio::test(start_paused = true)]
    async fn test_twelve_ingredients_run_in_three_sequential_batches() {
        let food_database = RecordingFoodDatabase::default();

        let results = classify_ingredients(&food_database, &ingredients(12), &[], 5).await;

        let events = food_database.events();
        assert_eq!(results.len(), 12);
        assert_eq!(batch_sizes(&events), vec![5, 5, 2]);
        assert_eq!(max_in_flight(&events), 5);
        // every lookup of a batch has ended before the next batch starts
        let first_end = events
            .iter()
            .position(|e| matches!(e, Event::End(_)))
            .unwrap();
        assert_eq!(first_end, 5);
        assert!(events[5..10].iter().all(|e| matches!(e, Event::End(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_preserve_input_order_and_degrade_per_ingredient() {
        let food_database = RecordingFoodDatabase::default();
        let mut input = ingredients(9);
        input[1] = "Cane Sugar".to_string();
        input[2] = "Whey Protein".to_string();

        let results = classify_ingredients(&food_database, &input, &[], 5).await;

        let names: Vec<&str> = results.iter().map(|r| r.ingredient.as_str()).collect();
        let expected: Vec<&str> = input.iter().map(String::as_str).collect();
        assert_eq!(names, expected);
        assert_eq!(results[1].risk, RiskTag::Bad);
        assert_eq!(results[2].risk, RiskTag::Good);
        // failed lookup falls back to keywords
        assert_eq!(results[3].risk, RiskTag::Moderate);
        // matched product with NOVA 4
        assert_eq!(results[7].risk, RiskTag::Bad);
    }

    #[tokio::test]
    async fn test_lookup_uses_lower_cased_name_and_conditions() {
        let mut food_database = crate::domain::risk::ports::MockFoodDatabaseClient::new();
        food_database
            .expect_find_product()
            .withf(|name: &String| name == "cane sugar")
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(Some(ProductFacts {
                        nova_group: Some(1),
                        nutriscore_grade: Some("a".to_string()),
                        ..Default::default()
                    }))
                })
            });

        let results = classify_ingredients(
            &food_database,
            &["Cane Sugar".to_string()],
            &["Type 2 Diabetes".to_string()],
            5,
        )
        .await;

        assert_eq!(results, vec![RiskResult::new("Cane Sugar", RiskTag::Bad)]);
    }

    #[tokio::test]
    async fn test_empty_input_issues_no_lookups() {
        let food_database = crate::domain::risk::ports::MockFoodDatabaseClient::new();
        let results = classify_ingredients(&food_database, &[], &[], 5).await;
        assert!(results.is_empty());
    }
}
