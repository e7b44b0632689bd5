use std::sync::Arc;

use foodguard_core::application::FoodGuardService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: FoodGuardService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: FoodGuardService) -> Self {
        Self { args, service }
    }
}
