use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, risk::entities::ProductFacts};

/// Food database client trait used by the risk classifier
#[cfg_attr(test, mockall::automock)]
pub trait FoodDatabaseClient: Send + Sync {
    /// Most popular product tagged with `ingredient`, if any.
    fn find_product(
        &self,
        ingredient: String,
    ) -> impl Future<Output = Result<Option<ProductFacts>, CoreError>> + Send;
}
