use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, profile::entities::Profile};

/// Repository trait for the client-local profile
#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    fn get_profile(&self) -> impl Future<Output = Result<Profile, CoreError>> + Send;

    fn save_profile(
        &self,
        profile: Profile,
    ) -> impl Future<Output = Result<Profile, CoreError>> + Send;
}
