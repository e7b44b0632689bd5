use crate::domain::{common::entities::app_errors::CoreError, risk::entities::ProductFacts};

/// What a single food database lookup produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(ProductFacts),
    NotFound,
    Failed(CoreError),
}

impl From<Result<Option<ProductFacts>, CoreError>> for LookupOutcome {
    fn from(result: Result<Option<ProductFacts>, CoreError>) -> Self {
        match result {
            Ok(Some(product)) => LookupOutcome::Found(product),
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => LookupOutcome::Failed(e),
        }
    }
}
