use std::future::Future;

use crate::domain::{
    common::{entities::app_errors::CoreError, ports::LLMClient, services::Service},
    history::ports::HistoryRepository,
    presenter::{
        entities::{CardView, IngredientCard},
        value_objects::CardFilter,
    },
    profile::ports::ProfileRepository,
    risk::{entities::RiskResult, ports::FoodDatabaseClient},
    scan::ports::OcrClient,
};

pub fn build_cards(results: &[RiskResult]) -> Vec<IngredientCard> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| IngredientCard::new(index, result))
        .collect()
}

/// Toggles visibility only; every card is returned, in its original order.
pub fn apply_filter(cards: Vec<IngredientCard>, filter: &CardFilter) -> Vec<CardView> {
    let search = filter.search.to_lowercase();

    cards
        .into_iter()
        .map(|card| {
            let visible = card.ingredient.to_lowercase().contains(&search)
                && filter.risk.matches(card.risk);
            CardView { card, visible }
        })
        .collect()
}

/// Service trait for the ingredient cards of the active scan
pub trait PresenterService: Send + Sync {
    fn get_cards(
        &self,
        filter: CardFilter,
    ) -> impl Future<Output = Result<Vec<CardView>, CoreError>> + Send;

    fn get_card(
        &self,
        index: usize,
    ) -> impl Future<Output = Result<IngredientCard, CoreError>> + Send;
}

impl<OCR, LLM, FD, HR, PR> PresenterService for Service<OCR, LLM, FD, HR, PR>
where
    OCR: OcrClient,
    LLM: LLMClient,
    FD: FoodDatabaseClient,
    HR: HistoryRepository,
    PR: ProfileRepository,
{
    async fn get_cards(&self, filter: CardFilter) -> Result<Vec<CardView>, CoreError> {
        let results = self.session.results().await;
        Ok(apply_filter(build_cards(&results), &filter))
    }

    async fn get_card(&self, index: usize) -> Result<IngredientCard, CoreError> {
        let results = self.session.results().await;
        results
            .get(index)
            .map(|result| IngredientCard::new(index, result))
            .ok_or(CoreError::NotFound)
    }
}
